//! Creature entity models.
//!
//! [`EntitySummary`] is the lightweight projection shown as a row in the
//! listing; [`EntityDetail`] is the full projection behind the detail view.
//! Both are produced by the PokeAPI projection layer and never mutated
//! afterwards.
//!
//! # Example
//!
//! ```
//! use dexterm::domain::EntitySummary;
//!
//! let pikachu = EntitySummary {
//!     id: 25,
//!     name: "pikachu".to_string(),
//!     categories: vec!["electric".to_string()],
//!     image_url: None,
//! };
//! assert_eq!(pikachu.dex_number(), "#025");
//! assert!(pikachu.has_category("electric"));
//! ```

/// A catalog entry as shown in the listing.
///
/// Built by the listing loader from one detail document per entry of the
/// listing page. The collection keeps page order, which is national index
/// order for the default page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    /// Positive national index number.
    pub id: u32,
    /// Lowercase slug as served by the source (`mr-mime`, `nidoran-f`).
    pub name: String,
    /// Category tags in the order the source declares them. Never empty.
    pub categories: Vec<String>,
    /// Primary sprite URL. The source reports `null` for some forms.
    pub image_url: Option<String>,
}

impl EntitySummary {
    /// Returns `true` if `tag` is one of this entity's categories.
    ///
    /// Comparison is exact and case-sensitive: category tags come from the
    /// source verbatim and the selector only ever offers tags it has seen.
    ///
    /// # Parameters
    ///
    /// * `tag` - Category tag to look for
    ///
    /// # Returns
    ///
    /// `true` if any of `categories` equals `tag`.
    #[must_use]
    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }

    /// Formats the id the way dex numbers are usually shown (`#025`).
    ///
    /// Ids above 999 keep all their digits (`#1025`).
    #[must_use]
    pub fn dex_number(&self) -> String {
        format!("#{:03}", self.id)
    }
}

/// The six base statistics of a creature.
///
/// Values are filled by statistic name, never by position in the payload,
/// so each field always holds the statistic it is named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Source-side names of the statistics, in canonical order.
    pub const NAMES: [&'static str; 6] = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];

    /// Human-readable labels matching [`Self::NAMES`].
    pub const LABELS: [&'static str; 6] = [
        "HP",
        "Attack",
        "Defense",
        "Special Attack",
        "Special Defense",
        "Speed",
    ];

    /// Values in canonical order.
    #[must_use]
    pub const fn as_array(&self) -> [u32; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
    }

    /// Sum of all six statistics.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }
}

/// Full projection of one creature for the detail view.
///
/// A superset of [`EntitySummary`]: the same document projected with the
/// physical measurements, abilities and statistics added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDetail {
    /// Fields shared with the listing row.
    pub summary: EntitySummary,
    /// Height in decimetres, as reported by the source.
    pub height: u32,
    /// Weight in hectograms, as reported by the source.
    pub weight: u32,
    /// Ability slugs in slot order, hidden abilities included.
    pub abilities: Vec<String>,
    /// Base statistics, see [`BaseStats`].
    pub stats: BaseStats,
}

impl EntityDetail {
    /// Height in metres.
    #[must_use]
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}
