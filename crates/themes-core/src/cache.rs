//! In-memory cache of query results keyed by serialized query.
//!
//! Results are stored under [`serialize_query`] keys, so two queries that
//! differ only in default-valued options share an entry. Nothing is
//! persisted; entries expire after the configured TTL.

use crate::config::{CacheConfig, DefaultQuery};
use crate::matcher::filter_themes_for_jetpack;
use crate::models::{Theme, ThemeQuery};
use crate::query::serialize_query;
use mini_moka::sync::Cache;
use std::time::Duration;
use tracing::debug;

/// Query results for one or more sites.
pub struct ThemeQueryCache {
    /// Serialized query key to matching themes.
    results: Cache<String, Vec<Theme>>,
    /// Baseline used to build keys and to match locally.
    defaults: DefaultQuery,
}

impl ThemeQueryCache {
    /// Create a cache with the default TTL and capacity.
    pub fn new(defaults: DefaultQuery) -> Self {
        Self::with_config(
            defaults,
            CacheConfig::DEFAULT_TTL,
            CacheConfig::DEFAULT_MAX_CAPACITY,
        )
    }

    pub fn with_config(defaults: DefaultQuery, ttl: Duration, max_capacity: u64) -> Self {
        Self {
            results: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_capacity)
                .build(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &DefaultQuery {
        &self.defaults
    }

    /// The key a query is stored under.
    pub fn key(&self, site_id: Option<u64>, query: &ThemeQuery) -> String {
        serialize_query(query, &self.defaults, site_id)
    }

    /// Store the themes a source returned for `query`.
    pub fn receive(&self, site_id: Option<u64>, query: &ThemeQuery, themes: Vec<Theme>) {
        let key = self.key(site_id, query);
        debug!("Caching {} themes for '{}'", themes.len(), key);
        self.results.insert(key, themes);
    }

    /// Cached themes for `query`, if present and not expired.
    pub fn get(&self, site_id: Option<u64>, query: &ThemeQuery) -> Option<Vec<Theme>> {
        let key = self.key(site_id, query);
        let cached = self.results.get(&key);
        match &cached {
            Some(themes) => debug!("Cache hit for '{}': {} themes", key, themes.len()),
            None => debug!("Cache miss for '{}'", key),
        }
        cached
    }

    /// Cached themes for `query`, or `all_themes` filtered locally and cached.
    ///
    /// This is the path for sources that return every theme unfiltered.
    pub fn get_or_filter(
        &self,
        site_id: Option<u64>,
        query: &ThemeQuery,
        all_themes: &[Theme],
    ) -> Vec<Theme> {
        if let Some(themes) = self.get(site_id, query) {
            return themes;
        }

        let matched: Vec<Theme> = filter_themes_for_jetpack(all_themes, query, &self.defaults)
            .into_iter()
            .cloned()
            .collect();
        self.receive(site_id, query, matched.clone());
        matched
    }

    /// Drop the entry for one query.
    pub fn invalidate(&self, site_id: Option<u64>, query: &ThemeQuery) {
        let key = self.key(site_id, query);
        self.results.invalidate(&key);
    }
}
