//! Subcommand implementations. Each returns the text to print.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use themes_core::{
    deserialize_query, filter_themes_for_jetpack, is_premium_theme, normalize_theme_list,
    serialize_query, serialize_query_without_page, DefaultQuery, Theme, ThemeQuery, ThemeSource,
};
use tracing::info;

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn read_themes(path: &Path) -> Result<Vec<Theme>> {
    let value = read_json(path)?;
    if !value.is_array() {
        bail!("{} must hold an array of themes", path.display());
    }
    serde_json::from_value(value).with_context(|| format!("Invalid themes in {}", path.display()))
}

fn parse_query(json: &str) -> Result<ThemeQuery> {
    match serde_json::from_str::<Value>(json).context("Query is not valid JSON")? {
        Value::Object(options) => Ok(ThemeQuery::from_map(options)),
        _ => bail!("Query must be a JSON object"),
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode output")
}

pub fn normalize(source: ThemeSource, file: &Path) -> Result<String> {
    let payload = read_json(file)?;
    let themes = normalize_theme_list(source, &payload)
        .with_context(|| format!("Failed to normalize {} payload", source))?;
    info!("Normalized {} {} theme(s)", themes.len(), source);

    if payload.is_array() {
        pretty(&themes)
    } else {
        pretty(&themes[0])
    }
}

pub fn key(
    query: &str,
    site_id: Option<u64>,
    without_page: bool,
    defaults: &DefaultQuery,
) -> Result<String> {
    let query = parse_query(query)?;
    Ok(if without_page {
        serialize_query_without_page(&query, defaults, site_id)
    } else {
        serialize_query(&query, defaults, site_id)
    })
}

pub fn parse_key(key: &str) -> Result<String> {
    pretty(&deserialize_query(key))
}

pub fn filter(query: &str, file: &Path, defaults: &DefaultQuery) -> Result<String> {
    let query = parse_query(query)?;
    let themes = read_themes(file)?;
    let matched = filter_themes_for_jetpack(&themes, &query, defaults);
    info!("{} of {} theme(s) match", matched.len(), themes.len());
    pretty(&matched)
}

#[derive(Serialize)]
struct PremiumStatus<'a> {
    id: Option<&'a str>,
    premium: bool,
}

pub fn premium(file: &Path) -> Result<String> {
    let themes = read_themes(file)?;
    let statuses: Vec<PremiumStatus<'_>> = themes
        .iter()
        .map(|theme| PremiumStatus {
            id: theme.resolved_id(),
            premium: is_premium_theme(Some(theme)),
        })
        .collect();
    pretty(&statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn json_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_query_rejects_non_objects() {
        assert!(parse_query(r#"{"search":"blue"}"#).is_ok());
        assert!(parse_query("[1]").is_err());
        assert!(parse_query("{").is_err());
    }

    #[test]
    fn test_key_and_parse_key() {
        let defaults = DefaultQuery::standard();
        let key = key(r#"{"search":"blue","page":3}"#, Some(9), true, &defaults).unwrap();
        assert_eq!(key, r#"9:{"search":"blue"}"#);

        let parsed: Value = serde_json::from_str(&parse_key(&key).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({ "siteId": 9, "query": { "search": "blue" } }));
    }

    #[test]
    fn test_normalize_single_object() {
        let file = json_file(r#"{"slug":"twentysixteen","tags":{"blue":"Blue"}}"#);
        let output = normalize(ThemeSource::Wporg, file.path()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], "twentysixteen");
        assert_eq!(value["taxonomies"]["theme_feature"][0]["name"], "Blue");
    }

    #[test]
    fn test_premium_requires_array() {
        let file = json_file(r#"{"id":"mood"}"#);
        assert!(premium(file.path()).is_err());

        let file = json_file(r#"[{"stylesheet":"premium/mood"},{"id":"dara"}]"#);
        let value: Value = serde_json::from_str(&premium(file.path()).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "id": "mood", "premium": true },
                { "id": "dara", "premium": false }
            ])
        );
    }
}
