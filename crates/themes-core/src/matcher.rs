//! Client-side theme matching.
//!
//! Jetpack sites cannot filter themes server-side, so results are fetched
//! in full and narrowed here. Only `search` and `filter` carry meaning;
//! every other query option is accepted as satisfied.

use crate::config::{DefaultQuery, ThemesConfig};
use crate::json::{as_text, is_truthy};
use crate::models::{Theme, ThemeQuery};
use serde_json::Value;

/// Whether `theme` satisfies every constraint of `query`, with missing
/// options filled in from `defaults`.
pub fn is_theme_matching_query(query: &ThemeQuery, theme: &Theme, defaults: &DefaultQuery) -> bool {
    query
        .with_defaults(defaults)
        .iter()
        .all(|(option, value)| match option.as_str() {
            ThemesConfig::SEARCH_OPTION => matches_search(theme, value),
            ThemesConfig::FILTER_OPTION => matches_filter(theme, value),
            _ => true,
        })
}

/// Themes matching `query`, in their original order.
pub fn filter_themes_for_jetpack<'a>(
    themes: &'a [Theme],
    query: &ThemeQuery,
    defaults: &DefaultQuery,
) -> Vec<&'a Theme> {
    themes
        .iter()
        .filter(|theme| is_theme_matching_query(query, theme, defaults))
        .collect()
}

/// Slugs of the terms under `theme_{taxonomy}`.
pub fn get_theme_taxonomy_slugs<'a>(theme: &'a Theme, taxonomy: &str) -> Vec<&'a str> {
    let key = format!("{}{}", ThemesConfig::TAXONOMY_KEY_PREFIX, taxonomy);
    theme
        .taxonomy(&key)
        .map(|terms| terms.iter().map(|term| term.slug.as_str()).collect())
        .unwrap_or_default()
}

fn matches_search(theme: &Theme, value: &Value) -> bool {
    if !is_truthy(value) {
        return true;
    }
    let Some(search) = as_text(value) else {
        return false;
    };
    let search = search.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&search);

    let in_taxonomies = ThemesConfig::SEARCH_TAXONOMIES.iter().any(|taxonomy| {
        let key = format!("{}{}", ThemesConfig::TAXONOMY_KEY_PREFIX, taxonomy);
        theme.taxonomy(&key).is_some_and(|terms| {
            terms
                .iter()
                .any(|term| term.name.as_deref().is_some_and(contains))
        })
    });

    in_taxonomies
        || theme.name.as_deref().is_some_and(contains)
        || theme.author.as_deref().is_some_and(contains)
        || theme.description_long.as_deref().is_some_and(contains)
}

fn matches_filter(theme: &Theme, value: &Value) -> bool {
    if !is_truthy(value) {
        return true;
    }
    let Some(filter) = value.as_str() else {
        return false;
    };

    filter.split(',').all(|slug| theme.has_term(slug))
}
