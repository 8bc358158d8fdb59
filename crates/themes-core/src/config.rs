//! Centralized configuration for the themes library.
//!
//! Holds the constants shared by the normalizers, the matcher and the query
//! cache, plus the default-query baseline that every query operation takes
//! as an explicit parameter.

use crate::error::{Result, ThemesError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Theme-domain constants.
pub struct ThemesConfig;

impl ThemesConfig {
    /// Stylesheet prefix that marks a paid theme.
    pub const PREMIUM_STYLESHEET_PREFIX: &'static str = "premium/";
    /// Prefix joining a taxonomy name to its key in `Theme::taxonomies`.
    pub const TAXONOMY_KEY_PREFIX: &'static str = "theme_";
    /// Taxonomy key that normalized `tags` land in.
    pub const FEATURE_TAXONOMY: &'static str = "theme_feature";
    /// Taxonomies whose term names are searched client-side. A Jetpack site
    /// only returns feature terms, so only those are searched.
    pub const SEARCH_TAXONOMIES: &'static [&'static str] = &["feature"];
    /// Query option naming the result page.
    pub const PAGE_OPTION: &'static str = "page";
    /// Query option carrying free-text search.
    pub const SEARCH_OPTION: &'static str = "search";
    /// Query option carrying comma-separated term slugs.
    pub const FILTER_OPTION: &'static str = "filter";
    /// Default number of themes per page in the standard baseline.
    pub const DEFAULT_QUERY_NUMBER: u64 = 20;
}

/// Query results cache configuration.
pub struct CacheConfig;

impl CacheConfig {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
    pub const DEFAULT_MAX_CAPACITY: u64 = 256;
}

/// Default values for recognized query options.
///
/// Treated as an opaque mapping: query operations compare against whatever
/// it holds and never assume particular keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultQuery(Map<String, Value>);

impl DefaultQuery {
    /// Build a baseline from an explicit map.
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// The platform's conventional baseline.
    pub fn standard() -> Self {
        let mut values = Map::new();
        values.insert(ThemesConfig::SEARCH_OPTION.into(), Value::from(""));
        values.insert("tier".into(), Value::from(""));
        values.insert(ThemesConfig::FILTER_OPTION.into(), Value::from(""));
        values.insert(
            "number".into(),
            Value::from(ThemesConfig::DEFAULT_QUERY_NUMBER),
        );
        Self(values)
    }

    /// Parse a baseline from a JSON document, which must be an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(values) => Ok(Self(values)),
            other => {
                warn!("Rejecting default query that is not an object: {}", other);
                Err(ThemesError::Config {
                    message: "default query must be a JSON object".to_string(),
                })
            }
        }
    }

    /// Load a baseline from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ThemesError::io_with_path(e, path))?;
        Self::from_json_str(&contents)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
