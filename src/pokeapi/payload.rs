//! Serde mirrors of the creature API payloads.
//!
//! Only the fields the projections read are declared; everything else in the
//! (large) detail documents is ignored during deserialization. A field that
//! is declared here and missing from a payload fails decoding, which the
//! projection layer reports as a malformed payload.
//!
//! # Shapes
//!
//! ```text
//! GET /pokemon?limit=N  → { results: [{ name, url }] }
//! GET /pokemon/{id}     → { id, name, height, weight,
//!                           types:     [{ type:    { name } }],
//!                           abilities: [{ ability: { name } }],
//!                           stats:     [{ base_stat, stat: { name } }],
//!                           sprites:   { front_default } }
//! ```

use serde::Deserialize;

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct PagePayload {
    /// Reference entries in page order.
    pub results: Vec<ReferenceEntry>,
}

/// One entry of a listing page.
///
/// Only the URL of its detail document is read; the listing row is built
/// from that document, not from the page.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceEntry {
    pub url: String,
}

/// `{ "name": ..., "url": ... }` reference used throughout the API.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// One element of `types`. The name is the category tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// One element of `abilities`.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

/// One element of `stats`, identified by `stat.name`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// The `sprites` object. Only the default front sprite is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Sprites {
    /// `null` for some alternate forms.
    pub front_default: Option<String>,
}

/// The part of `GET /pokemon/{id}` needed for a listing row.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryPayload {
    pub id: u32,
    pub name: String,
    pub types: Vec<TypeSlot>,
    pub sprites: Sprites,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct DetailPayload {
    pub id: u32,
    pub name: String,
    pub types: Vec<TypeSlot>,
    pub sprites: Sprites,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Looked up by name; see `projection::project_detail`.
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}
