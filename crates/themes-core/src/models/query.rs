//! Theme query types.

use crate::config::{DefaultQuery, ThemesConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A theme query: option name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeQuery(Map<String, Value>);

impl ThemeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(options: Map<String, Value>) -> Self {
        Self(options)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// A copy without `key`, other keys keeping their order.
    pub fn without(&self, key: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Defaults first, then this query's entries on top.
    pub fn with_defaults(&self, defaults: &DefaultQuery) -> Self {
        let mut merged = defaults.as_map().clone();
        for (key, value) in &self.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    pub fn search(&self) -> Option<&str> {
        self.get(ThemesConfig::SEARCH_OPTION).and_then(Value::as_str)
    }

    pub fn filter(&self) -> Option<&str> {
        self.get(ThemesConfig::FILTER_OPTION).and_then(Value::as_str)
    }

    pub fn page(&self) -> Option<u64> {
        self.get(ThemesConfig::PAGE_OPTION).and_then(Value::as_u64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl FromIterator<(String, Value)> for ThemeQuery {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The parts recovered from a serialized query key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDetails {
    pub site_id: Option<u64>,
    pub query: Option<ThemeQuery>,
}
