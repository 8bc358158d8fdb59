//! Vendor payload normalization.
//!
//! Three services return themes in different shapes:
//! - WordPress.com uses snake_case for a few descriptive fields
//! - WordPress.org uses its own names and sends `tags` as `{slug: name}`
//! - Jetpack sends `tags` as a bare list of slugs, without display names
//!
//! Each normalizer is total: missing fields pass through, unknown fields are
//! kept verbatim, and the input is never modified.

use crate::config::ThemesConfig;
use crate::error::{Result, ThemesError};
use crate::json::is_truthy;
use crate::models::{Taxonomies, Theme, ThemeTerm};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Field renames applied to WordPress.com payloads.
const WPCOM_FIELD_RENAMES: &[(&str, &str)] = &[
    ("description_long", "descriptionLong"),
    ("support_documentation", "supportDocumentation"),
    ("download_uri", "download"),
];

/// Field renames applied to WordPress.org payloads.
const WPORG_FIELD_RENAMES: &[(&str, &str)] = &[
    ("slug", "id"),
    ("preview_url", "demo_uri"),
    ("screenshot_url", "screenshot"),
    ("download_link", "download"),
];

const TAGS_FIELD: &str = "tags";

/// Copy `raw`, renaming keys found in `renames` and keeping the rest.
pub fn rename_fields(raw: &Map<String, Value>, renames: &[(&str, &str)]) -> Map<String, Value> {
    raw.iter()
        .map(|(key, value)| {
            let key = renames
                .iter()
                .find(|(from, _)| *from == key.as_str())
                .map(|(_, to)| (*to).to_string())
                .unwrap_or_else(|| key.clone());
            (key, value.clone())
        })
        .collect()
}

/// Split truthy `tags` off a payload, returning the rest and the tags value.
///
/// Missing or falsy tags (`null`, `""`, `false`, `0`) yield `None`.
fn split_tags(raw: &Map<String, Value>) -> Option<(Map<String, Value>, &Value)> {
    let tags = raw.get(TAGS_FIELD).filter(|tags| is_truthy(tags))?;
    let rest = raw
        .iter()
        .filter(|(key, _)| key.as_str() != TAGS_FIELD)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Some((rest, tags))
}

fn with_features(rest: Map<String, Value>, terms: Vec<ThemeTerm>) -> Theme {
    let mut theme = Theme::from(rest);
    let mut taxonomies = Taxonomies::new();
    taxonomies.insert(ThemesConfig::FEATURE_TAXONOMY.to_string(), terms);
    theme.taxonomies = Some(taxonomies);
    theme
}

/// Normalize a theme from a Jetpack site.
///
/// `tags` (a list of slugs) becomes `taxonomies.theme_feature` with one
/// slug-only term per tag. Any taxonomies the payload carried are replaced.
/// Without truthy tags the payload passes through unchanged.
pub fn normalize_jetpack_theme(raw: &Map<String, Value>) -> Theme {
    let Some((rest, tags)) = split_tags(raw) else {
        return Theme::from(raw.clone());
    };

    let terms = match tags {
        Value::Array(slugs) => slugs
            .iter()
            .filter_map(Value::as_str)
            .map(ThemeTerm::slug)
            .collect(),
        other => {
            debug!("Jetpack theme tags are not a list: {}", other);
            Vec::new()
        }
    };

    with_features(rest, terms)
}

/// Normalize a theme from the WordPress.com API.
pub fn normalize_wpcom_theme(raw: &Map<String, Value>) -> Theme {
    Theme::from(rename_fields(raw, WPCOM_FIELD_RENAMES))
}

/// Normalize a theme from the WordPress.org API.
///
/// `tags` (a `{slug: name}` map) becomes `taxonomies.theme_feature` with
/// named terms in the map's order.
pub fn normalize_wporg_theme(raw: &Map<String, Value>) -> Theme {
    let renamed = rename_fields(raw, WPORG_FIELD_RENAMES);
    let Some((rest, tags)) = split_tags(&renamed) else {
        return Theme::from(renamed);
    };

    let terms = match tags {
        Value::Object(names) => names
            .iter()
            .map(|(slug, name)| match name.as_str() {
                Some(name) => ThemeTerm::named(slug.as_str(), name),
                None => ThemeTerm::slug(slug.as_str()),
            })
            .collect(),
        other => {
            debug!("WordPress.org theme tags are not a map: {}", other);
            Vec::new()
        }
    };

    with_features(rest, terms)
}

/// The service a theme payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSource {
    Jetpack,
    Wpcom,
    Wporg,
}

impl ThemeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeSource::Jetpack => "jetpack",
            ThemeSource::Wpcom => "wpcom",
            ThemeSource::Wporg => "wporg",
        }
    }

    /// Normalize a raw payload from this source.
    pub fn normalize(&self, raw: &Map<String, Value>) -> Theme {
        match self {
            ThemeSource::Jetpack => normalize_jetpack_theme(raw),
            ThemeSource::Wpcom => normalize_wpcom_theme(raw),
            ThemeSource::Wporg => normalize_wporg_theme(raw),
        }
    }
}

impl FromStr for ThemeSource {
    type Err = ThemesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jetpack" => Ok(ThemeSource::Jetpack),
            "wpcom" | "wordpress.com" => Ok(ThemeSource::Wpcom),
            "wporg" | "wordpress.org" => Ok(ThemeSource::Wporg),
            _ => Err(ThemesError::UnknownSource(s.to_string())),
        }
    }
}

impl fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize any JSON value, which must be an object.
pub fn normalize_theme_value(source: ThemeSource, value: &Value) -> Result<Theme> {
    match value {
        Value::Object(raw) => Ok(source.normalize(raw)),
        other => Err(ThemesError::Validation {
            field: "theme".to_string(),
            message: format!("expected a JSON object, got {}", json_type_name(other)),
        }),
    }
}

/// Normalize a single theme object or an array of them.
pub fn normalize_theme_list(source: ThemeSource, value: &Value) -> Result<Vec<Theme>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| normalize_theme_value(source, item))
            .collect(),
        other => Ok(vec![normalize_theme_value(source, other)?]),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_jetpack_without_tags_is_unchanged() {
        let raw = object(json!({ "id": "twentysixteen", "name": "Twenty Sixteen" }));
        let theme = normalize_jetpack_theme(&raw);
        assert_eq!(theme.to_value(), Value::Object(raw));
    }

    #[test]
    fn test_jetpack_tags_become_feature_terms() {
        let raw = object(json!({ "id": "twentysixteen", "tags": ["a", "b"] }));
        let theme = normalize_jetpack_theme(&raw);

        assert_eq!(
            theme.to_value(),
            json!({
                "id": "twentysixteen",
                "taxonomies": { "theme_feature": [{ "slug": "a" }, { "slug": "b" }] }
            })
        );
        assert!(raw.contains_key("tags"));
    }

    #[test]
    fn test_jetpack_tags_replace_existing_taxonomies() {
        let raw = object(json!({
            "tags": ["blue"],
            "taxonomies": { "theme_subject": [{ "slug": "blog" }] }
        }));
        let theme = normalize_jetpack_theme(&raw);
        let taxonomies = theme.taxonomies.unwrap();
        assert_eq!(taxonomies.len(), 1);
        assert_eq!(taxonomies["theme_feature"], vec![ThemeTerm::slug("blue")]);
    }

    #[test]
    fn test_jetpack_malformed_tags() {
        let raw = object(json!({ "tags": ["ok", 3, null] }));
        assert_eq!(
            normalize_jetpack_theme(&raw).features().unwrap(),
            &[ThemeTerm::slug("ok")]
        );

        let raw = object(json!({ "tags": "blue" }));
        let theme = normalize_jetpack_theme(&raw);
        assert!(theme.features().unwrap().is_empty());
        assert!(!theme.extra.contains_key("tags"));
    }

    #[test]
    fn test_wpcom_renames_three_fields() {
        let raw = object(json!({
            "id": "mood",
            "description_long": "<p>Long</p>",
            "support_documentation": "<p>Docs</p>",
            "download_uri": "https://example.com/mood.zip",
            "demo_uri": "https://mooddemo.wordpress.com",
            "price": "$50"
        }));
        let theme = normalize_wpcom_theme(&raw);

        assert_eq!(theme.description_long.as_deref(), Some("<p>Long</p>"));
        assert_eq!(theme.support_documentation.as_deref(), Some("<p>Docs</p>"));
        assert_eq!(theme.download.as_deref(), Some("https://example.com/mood.zip"));
        assert_eq!(theme.demo_uri.as_deref(), Some("https://mooddemo.wordpress.com"));
        assert_eq!(theme.extra.get("price"), Some(&json!("$50")));
        assert!(!theme.extra.contains_key("description_long"));
    }

    #[test]
    fn test_wpcom_keeps_camel_case_fields() {
        let raw = object(json!({ "descriptionLong": "already", "name": "Mood" }));
        let theme = normalize_wpcom_theme(&raw);
        assert_eq!(theme.description_long.as_deref(), Some("already"));
        assert_eq!(theme.name.as_deref(), Some("Mood"));
    }

    #[test]
    fn test_wporg_renames_and_tags() {
        let raw = object(json!({ "slug": "twentysixteen", "tags": { "blue": "Blue" } }));
        let theme = normalize_wporg_theme(&raw);

        assert_eq!(
            theme.to_value(),
            json!({
                "id": "twentysixteen",
                "taxonomies": { "theme_feature": [{ "slug": "blue", "name": "Blue" }] }
            })
        );
    }

    #[test]
    fn test_wporg_full_payload() {
        let raw = object(json!({
            "slug": "twentyfifteen",
            "name": "Twenty Fifteen",
            "preview_url": "https://wp-themes.com/twentyfifteen",
            "screenshot_url": "//ts.w.org/wp-content/themes/twentyfifteen/screenshot.png",
            "download_link": "https://downloads.wordpress.org/theme/twentyfifteen.1.7.zip",
            "version": "1.7",
            "tags": {
                "two-columns": "Two Columns",
                "left-sidebar": "Left Sidebar",
                "accessibility-ready": "Accessibility Ready"
            }
        }));
        let theme = normalize_wporg_theme(&raw);

        assert_eq!(theme.id.as_deref(), Some("twentyfifteen"));
        assert_eq!(theme.demo_uri.as_deref(), Some("https://wp-themes.com/twentyfifteen"));
        assert!(theme.screenshot.as_deref().unwrap().ends_with("screenshot.png"));
        assert!(theme.download.as_deref().unwrap().ends_with(".zip"));
        assert_eq!(theme.extra.get("version"), Some(&json!("1.7")));

        let slugs: Vec<&str> = theme.features().unwrap().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["two-columns", "left-sidebar", "accessibility-ready"]);
    }

    #[test]
    fn test_wporg_without_tags() {
        let raw = object(json!({ "slug": "twentysixteen", "preview_url": "https://x" }));
        let theme = normalize_wporg_theme(&raw);
        assert_eq!(
            theme.to_value(),
            json!({ "id": "twentysixteen", "demo_uri": "https://x" })
        );
        assert_eq!(theme.taxonomies, None);
    }

    #[test]
    fn test_jetpack_null_tags_keep_taxonomies() {
        let raw = object(json!({
            "id": "a",
            "tags": null,
            "taxonomies": { "theme_subject": [{ "slug": "blog", "name": "Blog" }] }
        }));
        let theme = normalize_jetpack_theme(&raw);

        assert_eq!(theme.to_value(), Value::Object(raw));
        assert!(theme.features().is_none());
        assert!(theme.taxonomy("theme_subject").is_some());
    }

    #[test]
    fn test_jetpack_falsy_tags_are_absent() {
        for tags in [json!(""), json!(false), json!(0)] {
            let raw = object(json!({ "id": "a", "tags": tags }));
            assert_eq!(normalize_jetpack_theme(&raw).taxonomies, None);
        }
    }

    #[test]
    fn test_wporg_null_tags_only_rename() {
        let raw = object(json!({ "slug": "a", "tags": null }));
        let theme = normalize_wporg_theme(&raw);

        assert_eq!(theme.to_value(), json!({ "id": "a", "tags": null }));
        assert_eq!(theme.taxonomies, None);
    }

    #[test]
    fn test_wporg_non_string_tag_name() {
        let raw = object(json!({ "tags": { "blue": 7 } }));
        assert_eq!(
            normalize_wporg_theme(&raw).features().unwrap(),
            &[ThemeTerm::slug("blue")]
        );
    }

    #[test]
    fn test_rename_fields_only_touches_table_keys() {
        let raw = object(json!({ "slug": "a", "other": 1 }));
        let renamed = rename_fields(&raw, &[("slug", "id"), ("missing", "x")]);
        assert_eq!(Value::Object(renamed), json!({ "id": "a", "other": 1 }));
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("jetpack".parse::<ThemeSource>().unwrap(), ThemeSource::Jetpack);
        assert_eq!("WordPress.org".parse::<ThemeSource>().unwrap(), ThemeSource::Wporg);
        assert_eq!(ThemeSource::Wpcom.to_string(), "wpcom");
        assert!(matches!(
            "ghost".parse::<ThemeSource>(),
            Err(ThemesError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_normalize_theme_list() {
        let value = json!([{ "slug": "a" }, { "slug": "b" }]);
        let themes = normalize_theme_list(ThemeSource::Wporg, &value).unwrap();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[1].id.as_deref(), Some("b"));

        let single = normalize_theme_list(ThemeSource::Wporg, &json!({ "slug": "c" })).unwrap();
        assert_eq!(single[0].id.as_deref(), Some("c"));

        let err = normalize_theme_list(ThemeSource::Jetpack, &json!([1])).unwrap_err();
        assert!(matches!(err, ThemesError::Validation { .. }));
    }
}
