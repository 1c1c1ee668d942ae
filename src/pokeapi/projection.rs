//! Projection of API payloads onto domain models.
//!
//! Decoding failures become [`FetchError::MalformedPayload`]. Statistics are
//! looked up by their declared name rather than by position, so a reordered
//! payload still lands in the right fields and a missing statistic is
//! reported as [`FetchError::UnexpectedSchema`] instead of shifting values.

use super::payload::{DetailPayload, PagePayload, StatEntry, SummaryPayload, TypeSlot};
use crate::domain::{BaseStats, EntityDetail, EntitySummary, FetchError};
use serde::de::DeserializeOwned;

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::MalformedPayload {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn malformed(url: &str, message: &str) -> FetchError {
    FetchError::MalformedPayload {
        url: url.to_string(),
        message: message.to_string(),
    }
}

/// Decodes a listing page into the detail URLs of its entries, in page order.
///
/// # Parameters
///
/// * `url` - URL the page was fetched from, carried into errors
/// * `body` - Raw response body
///
/// # Returns
///
/// One detail URL per page entry. An empty page yields an empty vector.
///
/// # Errors
///
/// Returns [`FetchError::MalformedPayload`] if the body is not a page document.
pub fn decode_page(url: &str, body: &[u8]) -> Result<Vec<String>, FetchError> {
    let page: PagePayload = decode(url, body)?;
    Ok(page.results.into_iter().map(|entry| entry.url).collect())
}

fn build_summary(
    url: &str,
    id: u32,
    name: String,
    types: Vec<TypeSlot>,
    image_url: Option<String>,
) -> Result<EntitySummary, FetchError> {
    if id == 0 {
        return Err(malformed(url, "id must be positive"));
    }
    if types.is_empty() {
        return Err(malformed(url, "entity has no types"));
    }
    Ok(EntitySummary {
        id,
        name,
        categories: types.into_iter().map(|slot| slot.kind.name).collect(),
        image_url,
    })
}

/// Projects a detail document onto the listing row model.
///
/// Only identity, types and sprite are read, so a document with missing or
/// odd statistics still makes a valid row.
///
/// # Errors
///
/// Returns [`FetchError::MalformedPayload`] if the body does not decode, the
/// id is zero, or the type list is empty.
pub fn project_summary(url: &str, body: &[u8]) -> Result<EntitySummary, FetchError> {
    let payload: SummaryPayload = decode(url, body)?;
    build_summary(
        url,
        payload.id,
        payload.name,
        payload.types,
        payload.sprites.front_default,
    )
}

fn stat_by_name(url: &str, stats: &[StatEntry], name: &str) -> Result<u32, FetchError> {
    stats
        .iter()
        .find(|entry| entry.stat.name == name)
        .map(|entry| entry.base_stat)
        .ok_or_else(|| FetchError::UnexpectedSchema {
            url: url.to_string(),
            missing: format!("stat `{name}`"),
        })
}

fn project_stats(url: &str, stats: &[StatEntry]) -> Result<BaseStats, FetchError> {
    let [hp, attack, defense, special_attack, special_defense, speed] = BaseStats::NAMES;
    Ok(BaseStats {
        hp: stat_by_name(url, stats, hp)?,
        attack: stat_by_name(url, stats, attack)?,
        defense: stat_by_name(url, stats, defense)?,
        special_attack: stat_by_name(url, stats, special_attack)?,
        special_defense: stat_by_name(url, stats, special_defense)?,
        speed: stat_by_name(url, stats, speed)?,
    })
}

/// Projects a detail document onto the full detail model.
///
/// # Parameters
///
/// * `url` - URL the document was fetched from, carried into errors
/// * `body` - Raw response body
///
/// # Returns
///
/// The detail with abilities in slot order and statistics matched by name.
///
/// # Errors
///
/// Returns [`FetchError::MalformedPayload`] for undecodable bodies or invalid
/// summary fields, and [`FetchError::UnexpectedSchema`] when one of the six
/// named statistics is absent.
///
/// # Example
///
/// ```
/// use dexterm::domain::FetchError;
/// use dexterm::pokeapi::project_detail;
/// use serde_json::json;
///
/// let stat = |name: &str, value: u32| json!({ "base_stat": value, "stat": { "name": name } });
/// let mut document = json!({
///     "id": 25,
///     "name": "pikachu",
///     "height": 4,
///     "weight": 60,
///     "types": [{ "slot": 1, "type": { "name": "electric" } }],
///     "sprites": { "front_default": null },
///     "abilities": [{ "ability": { "name": "static" } }],
///     "stats": [
///         stat("speed", 90),
///         stat("hp", 35),
///         stat("attack", 55),
///         stat("defense", 40),
///         stat("special-attack", 50),
///         stat("special-defense", 50),
///     ],
/// });
///
/// let url = "https://pokeapi.co/api/v2/pokemon/25";
/// let detail = project_detail(url, &serde_json::to_vec(&document)?)?;
/// assert_eq!(detail.stats.speed, 90);
/// assert_eq!(detail.summary.image_url, None);
///
/// if let Some(stats) = document["stats"].as_array_mut() {
///     stats.remove(0);
/// }
/// let missing = project_detail(url, &serde_json::to_vec(&document)?);
/// assert!(matches!(missing, Err(FetchError::UnexpectedSchema { .. })));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn project_detail(url: &str, body: &[u8]) -> Result<EntityDetail, FetchError> {
    let payload: DetailPayload = decode(url, body)?;
    let stats = project_stats(url, &payload.stats)?;
    let summary = build_summary(
        url,
        payload.id,
        payload.name,
        payload.types,
        payload.sprites.front_default,
    )?;

    Ok(EntityDetail {
        summary,
        height: payload.height,
        weight: payload.weight,
        abilities: payload
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        stats,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn stat(name: &str, value: u32) -> Value {
        json!({ "base_stat": value, "effort": 0, "stat": { "name": name, "url": "" } })
    }

    /// A trimmed detail document in the exact shape the API serves.
    pub fn detail(id: u32, name: &str, types: &[&str]) -> Value {
        json!({
            "id": id,
            "name": name,
            "height": 7,
            "weight": 69,
            "types": types
                .iter()
                .enumerate()
                .map(|(i, t)| json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
                .collect::<Vec<_>>(),
            "sprites": { "front_default": format!("https://sprites/{id}.png"), "back_default": null },
            "abilities": [
                { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 },
                { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true, "slot": 3 }
            ],
            "stats": [
                stat("hp", 45),
                stat("attack", 49),
                stat("defense", 49),
                stat("special-attack", 65),
                stat("special-defense", 65),
                stat("speed", 45)
            ],
            "moves": []
        })
    }

    pub fn page(urls: &[&str]) -> Value {
        json!({
            "count": 1302,
            "next": null,
            "previous": null,
            "results": urls
                .iter()
                .enumerate()
                .map(|(i, u)| json!({ "name": format!("entry-{i}"), "url": u }))
                .collect::<Vec<_>>()
        })
    }

    pub fn bytes(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap_or_default()
    }
}
