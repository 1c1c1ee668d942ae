//! Client-side filtering of the fetched collection.
//!
//! Everything here is pure and synchronous. The app layer recomputes the
//! visible subset and the category universe on every keystroke or category
//! change; nothing is cached between calls.
//!
//! # Matching Rules
//!
//! - **Name**: case-insensitive substring; an empty query matches everything
//! - **Category**: exact tag membership; `Unset` and `All` match everything
//! - **Order**: the visible subset keeps the order of the fetched collection
//!
//! Case folding is done per character with [`char::to_lowercase`], so the
//! same folding drives both [`name_matches`] and the highlight ranges of
//! [`match_range`].
//!
//! # Example
//!
//! ```
//! use dexterm::domain::{category_universe, filter, CategorySelection, EntitySummary};
//!
//! let entity = |id: u32, name: &str, tags: &[&str]| EntitySummary {
//!     id,
//!     name: name.to_string(),
//!     categories: tags.iter().map(ToString::to_string).collect(),
//!     image_url: None,
//! };
//! let entities = vec![
//!     entity(4, "charmander", &["fire"]),
//!     entity(6, "charizard", &["fire", "flying"]),
//!     entity(7, "squirtle", &["water"]),
//! ];
//!
//! let flying = CategorySelection::Tag("flying".to_string());
//! let visible = filter(&entities, "CHAR", &flying);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].name, "charizard");
//! assert_eq!(category_universe(&entities), vec!["fire", "flying", "water"]);
//! ```

use crate::domain::EntitySummary;

/// Which category the listing is restricted to.
///
/// `Unset` (nothing chosen yet) and `All` (explicitly "all categories") are
/// kept apart so the selector can show which one the user picked, but both
/// match every entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category chosen yet. Initial state, and the target of "clear".
    #[default]
    Unset,
    /// Explicitly all categories, reached by cycling past the last tag.
    All,
    /// Only entities carrying this exact tag.
    Tag(String),
}

impl CategorySelection {
    /// Returns `true` if `entity` passes this selection.
    ///
    /// # Parameters
    ///
    /// * `entity` - Entity whose category tags are checked
    ///
    /// # Returns
    ///
    /// `true` for `Unset` and `All`; for `Tag`, whether the entity carries
    /// the tag (see [`EntitySummary::has_category`]).
    #[must_use]
    pub fn matches(&self, entity: &EntitySummary) -> bool {
        match self {
            Self::Unset | Self::All => true,
            Self::Tag(tag) => entity.has_category(tag),
        }
    }

    /// Label shown in the header.
    ///
    /// `Unset` and `All` both read "all types".
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Unset | Self::All => "all types",
            Self::Tag(tag) => tag,
        }
    }

    /// Next selection when cycling forwards through `universe`.
    ///
    /// `Unset` and `All` step to the first tag; the last tag wraps to `All`.
    /// A tag that is no longer in the universe restarts from the first tag.
    ///
    /// # Parameters
    ///
    /// * `universe` - Category universe of the collection, first-seen order
    ///
    /// # Returns
    ///
    /// The following selection, or a clone of `self` if `universe` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use dexterm::domain::CategorySelection;
    ///
    /// let universe = vec!["fire".to_string(), "water".to_string()];
    /// let first = CategorySelection::Unset.next(&universe);
    /// assert_eq!(first, CategorySelection::Tag("fire".to_string()));
    /// assert_eq!(first.next(&universe).next(&universe), CategorySelection::All);
    /// ```
    #[must_use]
    pub fn next(&self, universe: &[String]) -> Self {
        if universe.is_empty() {
            return self.clone();
        }
        match self {
            Self::Unset | Self::All => Self::Tag(universe[0].clone()),
            Self::Tag(tag) => match universe.iter().position(|t| t == tag) {
                Some(i) if i + 1 < universe.len() => Self::Tag(universe[i + 1].clone()),
                Some(_) => Self::All,
                None => Self::Tag(universe[0].clone()),
            },
        }
    }

    /// Previous selection when cycling backwards through `universe`.
    ///
    /// Mirror image of [`next`](Self::next): `Unset` and `All` step to the
    /// last tag and the first tag wraps to `All`.
    ///
    /// # Parameters
    ///
    /// * `universe` - Category universe of the collection, first-seen order
    ///
    /// # Returns
    ///
    /// The preceding selection, or a clone of `self` if `universe` is empty.
    #[must_use]
    pub fn previous(&self, universe: &[String]) -> Self {
        let Some(last) = universe.last() else {
            return self.clone();
        };
        match self {
            Self::Unset | Self::All => Self::Tag(last.clone()),
            Self::Tag(tag) => match universe.iter().position(|t| t == tag) {
                Some(0) => Self::All,
                Some(i) => Self::Tag(universe[i - 1].clone()),
                None => Self::Tag(last.clone()),
            },
        }
    }
}

/// Transient filter input of the listing view.
///
/// Reset when the plugin is reloaded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Name query typed in search mode.
    pub search_text: String,
    /// Category restriction cycled with `t` / `T`.
    pub category: CategorySelection,
}

/// Lowercases `text` one character at a time.
///
/// Returns the folded text and, for every folded character, the index of
/// the original character it came from. A character may fold to several
/// (`İ` becomes `i` plus a combining dot).
fn fold(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }
    (folded, origin)
}

/// Returns `true` if `name` contains `search_text`, ignoring case.
///
/// # Parameters
///
/// * `name` - Entity name to test
/// * `search_text` - Query; empty matches every name
#[must_use]
pub fn name_matches(name: &str, search_text: &str) -> bool {
    search_text.is_empty() || fold(name).0.contains(&fold(search_text).0)
}

/// Derives the visible subset of `entities`.
///
/// An entity is kept iff its name contains `search_text` case-insensitively
/// and `category` matches one of its tags. Input order is preserved, so the
/// result is always an ordered subset of `entities`.
///
/// # Parameters
///
/// * `entities` - Fetched collection, in fetch order
/// * `search_text` - Name query; empty matches everything
/// * `category` - Category restriction
///
/// # Returns
///
/// Clones of the matching entities, never more than `entities.len()`.
///
/// # Example
///
/// ```
/// use dexterm::domain::{filter, CategorySelection, EntitySummary};
///
/// let entities = vec![
///     EntitySummary {
///         id: 4,
///         name: "charmander".to_string(),
///         categories: vec!["fire".to_string()],
///         image_url: None,
///     },
///     EntitySummary {
///         id: 7,
///         name: "squirtle".to_string(),
///         categories: vec!["water".to_string()],
///         image_url: None,
///     },
/// ];
///
/// let visible = filter(&entities, "char", &CategorySelection::All);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name, "charmander");
/// ```
#[must_use]
pub fn filter(
    entities: &[EntitySummary],
    search_text: &str,
    category: &CategorySelection,
) -> Vec<EntitySummary> {
    entities
        .iter()
        .filter(|e| name_matches(&e.name, search_text) && category.matches(e))
        .cloned()
        .collect()
}

/// Distinct category tags across `entities`, in first-observed order.
///
/// # Parameters
///
/// * `entities` - Fetched collection, in fetch order
///
/// # Returns
///
/// Every tag carried by at least one entity, each exactly once. Empty for
/// an empty collection.
#[must_use]
pub fn category_universe(entities: &[EntitySummary]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    entities
        .iter()
        .flat_map(|e| e.categories.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Character range of the first case-insensitive occurrence of
/// `search_text` in `name`, for highlighting.
///
/// The range indexes the characters of the original `name`, also when
/// folding changes the character count. A match that starts or ends inside
/// the folding of one character covers that whole character.
///
/// # Parameters
///
/// * `name` - Displayed entity name
/// * `search_text` - Query being highlighted
///
/// # Returns
///
/// `Some((start, end))` with `end` exclusive, or `None` if the query is
/// empty or does not occur.
#[must_use]
pub fn match_range(name: &str, search_text: &str) -> Option<(usize, usize)> {
    if search_text.is_empty() {
        return None;
    }
    let (haystack, origin) = fold(name);
    let (needle, _) = fold(search_text);
    let byte_start = haystack.find(&needle)?;
    let start = haystack[..byte_start].chars().count();
    let last = start + needle.chars().count() - 1;
    Some((*origin.get(start)?, *origin.get(last)? + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, name: &str, categories: &[&str]) -> EntitySummary {
        EntitySummary {
            id,
            name: name.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
            image_url: Some(format!("https://img/{id}.png")),
        }
    }

    fn starters() -> Vec<EntitySummary> {
        vec![
            entity(1, "bulbasaur", &["grass", "poison"]),
            entity(4, "charmander", &["fire"]),
            entity(6, "charizard", &["fire", "flying"]),
            entity(7, "squirtle", &["water"]),
            entity(12, "butterfree", &["bug", "flying"]),
        ]
    }

    #[test]
    fn search_keeps_only_case_insensitive_matches() {
        let entities = starters();
        let mut selections = vec![CategorySelection::Unset, CategorySelection::All];
        selections.extend(category_universe(&entities).into_iter().map(CategorySelection::Tag));

        for selection in &selections {
            for query in ["", "char", "CHAR", "a", "zzz", "Ur"] {
                let result = filter(&entities, query, selection);
                assert!(result.len() <= entities.len(), "{query} / {selection:?}");
                for e in &result {
                    assert!(e.name.to_lowercase().contains(&query.to_lowercase()));
                    assert!(selection.matches(e), "{} / {selection:?}", e.name);
                }
            }
        }
    }

    #[test]
    fn search_char_selects_charmander_only() {
        let entities = vec![entity(4, "charmander", &["fire"]), entity(7, "squirtle", &["water"])];
        let result = filter(&entities, "char", &CategorySelection::Unset);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "charmander");
    }

    #[test]
    fn category_selects_exactly_tagged_entities() {
        let entities = starters();
        for tag in category_universe(&entities) {
            let result = filter(&entities, "", &CategorySelection::Tag(tag.clone()));
            let expected: Vec<_> = entities.iter().filter(|e| e.has_category(&tag)).cloned().collect();
            assert_eq!(result, expected, "tag {tag}");
        }
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let entities = starters();
        assert!(filter(&entities, "", &CategorySelection::Tag("Fire".to_string())).is_empty());
    }

    #[test]
    fn unset_and_all_return_input_unchanged() {
        let entities = starters();
        assert_eq!(filter(&entities, "", &CategorySelection::Unset), entities);
        assert_eq!(filter(&entities, "", &CategorySelection::All), entities);
    }

    #[test]
    fn search_and_category_combine() {
        let entities = starters();
        let result = filter(&entities, "char", &CategorySelection::Tag("flying".to_string()));
        assert_eq!(result.iter().map(|e| e.id).collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn universe_is_distinct_union_in_first_seen_order() {
        let entities = starters();
        let universe = category_universe(&entities);
        assert_eq!(
            universe,
            vec!["grass", "poison", "fire", "flying", "water", "bug"]
        );

        let mut union: Vec<&String> = entities.iter().flat_map(|e| &e.categories).collect();
        union.sort();
        union.dedup();
        let mut sorted = universe.clone();
        sorted.sort();
        assert_eq!(sorted.iter().collect::<Vec<_>>(), union);
    }

    #[test]
    fn universe_of_empty_collection_is_empty() {
        assert!(category_universe(&[]).is_empty());
    }

    #[test]
    fn selection_cycles_forward_through_universe_and_wraps_to_all() {
        let universe = vec!["fire".to_string(), "water".to_string()];
        let s = CategorySelection::Unset.next(&universe);
        assert_eq!(s, CategorySelection::Tag("fire".to_string()));
        let s = s.next(&universe);
        assert_eq!(s, CategorySelection::Tag("water".to_string()));
        let s = s.next(&universe);
        assert_eq!(s, CategorySelection::All);
        assert_eq!(s.next(&universe), CategorySelection::Tag("fire".to_string()));
    }

    #[test]
    fn selection_cycles_backwards() {
        let universe = vec!["fire".to_string(), "water".to_string()];
        let s = CategorySelection::Unset.previous(&universe);
        assert_eq!(s, CategorySelection::Tag("water".to_string()));
        assert_eq!(s.previous(&universe), CategorySelection::Tag("fire".to_string()));
        assert_eq!(
            CategorySelection::Tag("fire".to_string()).previous(&universe),
            CategorySelection::All
        );
    }

    #[test]
    fn selection_with_vanished_tag_restarts() {
        let universe = vec!["grass".to_string()];
        let stale = CategorySelection::Tag("ghost".to_string());
        assert_eq!(stale.next(&universe), CategorySelection::Tag("grass".to_string()));
        assert_eq!(CategorySelection::Unset.next(&[]), CategorySelection::Unset);
    }

    #[test]
    fn match_range_reports_char_positions() {
        assert_eq!(match_range("Charmander", "MAN"), Some((4, 7)));
        assert_eq!(match_range("charmander", ""), None);
        assert_eq!(match_range("squirtle", "char"), None);
        assert_eq!(match_range("flabébé", "bé"), Some((3, 5)));
    }

    #[test]
    fn match_range_indexes_original_chars_when_folding_expands() {
        // `İ` folds to two chars; the range must still point at `stan`.
        assert_eq!(match_range("İstanbul", "stan"), Some((1, 5)));
        assert_eq!(match_range("İstanbul", "i\u{307}s"), Some((0, 2)));
        assert!(name_matches("İstanbul", "STAN"));
    }

    #[test]
    fn selection_matches_by_tag_membership() {
        let charizard = entity(6, "charizard", &["fire", "flying"]);
        assert!(CategorySelection::Unset.matches(&charizard));
        assert!(CategorySelection::All.matches(&charizard));
        assert!(CategorySelection::Tag("flying".to_string()).matches(&charizard));
        assert!(!CategorySelection::Tag("water".to_string()).matches(&charizard));
    }
}
