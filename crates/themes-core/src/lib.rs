//! Themes Core - Headless library for theme payloads and theme queries.
//!
//! This crate turns theme listings from WordPress.com, WordPress.org and
//! Jetpack into one canonical [`Theme`] shape, builds stable cache keys for
//! theme queries, and matches themes against queries client-side for
//! sources that cannot filter on their own. It does no I/O beyond optional
//! configuration loading.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use themes_core::{
//!     deserialize_query, filter_themes_for_jetpack, serialize_query, DefaultQuery, ThemeQuery,
//!     ThemeSource,
//! };
//!
//! let defaults = DefaultQuery::standard();
//! let raw = json!({ "id": "twentysixteen", "name": "Twenty Sixteen", "tags": ["blue"] });
//! let theme = ThemeSource::Jetpack.normalize(raw.as_object().unwrap());
//!
//! let query = ThemeQuery::new().with("filter", "blue").with("number", 20);
//! let key = serialize_query(&query, &defaults, Some(2916284));
//! assert_eq!(key, r#"2916284:{"filter":"blue"}"#);
//! assert_eq!(deserialize_query(&key).site_id, Some(2916284));
//!
//! let themes = vec![theme];
//! assert_eq!(filter_themes_for_jetpack(&themes, &query, &defaults).len(), 1);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod json;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod premium;
pub mod query;

// Re-export commonly used types
pub use cache::ThemeQueryCache;
pub use config::{CacheConfig, DefaultQuery, ThemesConfig};
pub use error::{Result, ThemesError};
pub use matcher::{filter_themes_for_jetpack, get_theme_taxonomy_slugs, is_theme_matching_query};
pub use models::{QueryDetails, Taxonomies, Theme, ThemeCost, ThemeQuery, ThemeTerm};
pub use normalize::{
    normalize_jetpack_theme, normalize_theme_list, normalize_theme_value, normalize_wpcom_theme,
    normalize_wporg_theme, ThemeSource,
};
pub use premium::{get_theme_id_from_stylesheet, is_premium, is_premium_theme};
pub use query::{deserialize_query, normalize_query, serialize_query, serialize_query_without_page};
