//! Canonical theme types.

use crate::config::ThemesConfig;
use crate::premium::get_theme_id_from_stylesheet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Taxonomy key (e.g. `theme_feature`) to its ordered terms.
pub type Taxonomies = BTreeMap<String, Vec<ThemeTerm>>;

/// A single classification value within a taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTerm {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThemeTerm {
    /// A term known only by its slug.
    pub fn slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: None,
            extra: Map::new(),
        }
    }

    /// A term with a display name.
    pub fn named(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

/// Pricing data. A truthy `number` marks the theme as premium.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A theme in canonical shape.
///
/// Known fields are typed; everything else rides along in `extra` so
/// payloads survive a round trip. Deserialization is total: a known key
/// holding an unexpected JSON type is kept in `extra` instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "descriptionLong", skip_serializing_if = "Option::is_none")]
    pub description_long: Option<String>,
    #[serde(rename = "supportDocumentation", skip_serializing_if = "Option::is_none")]
    pub support_documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<ThemeCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomies: Option<Taxonomies>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Theme {
    fn from(raw: Map<String, Value>) -> Self {
        let mut theme = Theme::default();
        let mut extra = Map::new();

        for (key, value) in raw {
            match key.as_str() {
                "id" => theme.id = string_field(key, value, &mut extra),
                "stylesheet" => theme.stylesheet = string_field(key, value, &mut extra),
                "name" => theme.name = string_field(key, value, &mut extra),
                "author" => theme.author = string_field(key, value, &mut extra),
                "descriptionLong" => {
                    theme.description_long = string_field(key, value, &mut extra)
                }
                "supportDocumentation" => {
                    theme.support_documentation = string_field(key, value, &mut extra)
                }
                "download" => theme.download = string_field(key, value, &mut extra),
                "demo_uri" => theme.demo_uri = string_field(key, value, &mut extra),
                "screenshot" => theme.screenshot = string_field(key, value, &mut extra),
                "cost" => theme.cost = typed_field(key, value, &mut extra),
                "taxonomies" => theme.taxonomies = typed_field(key, value, &mut extra),
                _ => {
                    extra.insert(key, value);
                }
            }
        }

        theme.extra = extra;
        theme
    }
}

fn string_field(key: String, value: Value, extra: &mut Map<String, Value>) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        other => {
            extra.insert(key, other);
            None
        }
    }
}

fn typed_field<T: DeserializeOwned>(
    key: String,
    value: Value,
    extra: &mut Map<String, Value>,
) -> Option<T> {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(typed) => Some(typed),
        Err(_) => {
            extra.insert(key, value);
            None
        }
    }
}

impl Theme {
    /// Terms stored under a taxonomy key such as `theme_feature`.
    pub fn taxonomy(&self, key: &str) -> Option<&[ThemeTerm]> {
        self.taxonomies
            .as_ref()
            .and_then(|t| t.get(key))
            .map(Vec::as_slice)
    }

    /// Feature terms, the taxonomy that vendor `tags` normalize into.
    pub fn features(&self) -> Option<&[ThemeTerm]> {
        self.taxonomy(ThemesConfig::FEATURE_TAXONOMY)
    }

    /// Whether any taxonomy holds a term with exactly this slug.
    pub fn has_term(&self, slug: &str) -> bool {
        self.taxonomies
            .as_ref()
            .is_some_and(|t| t.values().any(|terms| terms.iter().any(|term| term.slug == slug)))
    }

    /// The theme id, or the id derived from the stylesheet when absent.
    pub fn resolved_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or_else(|| self.stylesheet.as_deref().map(get_theme_id_from_stylesheet))
    }

    /// The theme as a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
