//! Query canonicalization and serialized query keys.
//!
//! A key is `siteId:json` or just `json`, where `json` is the query with
//! every default-valued option dropped. Keys are stable for a given query
//! and site, so stores can use them to look up cached results.

use crate::config::{DefaultQuery, ThemesConfig};
use crate::json::strict_equals;
use crate::models::{QueryDetails, ThemeQuery};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Optional ASCII site id and colon, then the JSON payload. `.` does not
/// cross line breaks.
static SERIALIZED_QUERY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([0-9]+):)?(.*)$").unwrap());

/// Drop every option whose value strictly equals its default.
pub fn normalize_query(query: &ThemeQuery, defaults: &DefaultQuery) -> ThemeQuery {
    query
        .iter()
        .filter(|(key, value)| {
            !defaults
                .get(key)
                .is_some_and(|default| strict_equals(value, default))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build the cache key for a query, scoped to a site when one is given.
///
/// A site id of `0` is treated as no site.
pub fn serialize_query(
    query: &ThemeQuery,
    defaults: &DefaultQuery,
    site_id: Option<u64>,
) -> String {
    let normalized = normalize_query(query, defaults);
    // A map of JSON values always encodes.
    let json = serde_json::to_string(&normalized).unwrap_or_else(|_| "{}".to_string());

    match site_id {
        Some(site_id) if site_id != 0 => format!("{}:{}", site_id, json),
        _ => json,
    }
}

/// Like [`serialize_query`], ignoring the `page` option.
pub fn serialize_query_without_page(
    query: &ThemeQuery,
    defaults: &DefaultQuery,
    site_id: Option<u64>,
) -> String {
    serialize_query(
        &query.without(ThemesConfig::PAGE_OPTION),
        defaults,
        site_id,
    )
}

/// Recover the site id and query from a serialized key.
///
/// Never fails: an unparseable payload yields `query: None`, and a key that
/// does not match the key format at all yields both fields `None`. A site
/// prefix too large for `u64` is consumed but reported as `site_id: None`.
pub fn deserialize_query(key: &str) -> QueryDetails {
    let Some(captures) = SERIALIZED_QUERY_KEY.captures(key) else {
        debug!("Query key does not match key format: {:?}", key);
        return QueryDetails::default();
    };

    let site_id = captures
        .get(1)
        .and_then(|m| match m.as_str().parse::<u64>() {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Query key site id {:?} is out of range: {}", m.as_str(), e);
                None
            }
        })
        .filter(|id| *id != 0);

    let payload = captures.get(2).map_or("", |m| m.as_str());
    let query = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(options)) => Some(ThemeQuery::from_map(options)),
        Ok(other) => {
            debug!("Query key payload is not an object: {}", other);
            None
        }
        Err(e) => {
            debug!("Query key payload is not JSON: {}", e);
            None
        }
    };

    QueryDetails { site_id, query }
}
