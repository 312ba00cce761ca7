//! The configuration root: provider aggregation and precedence.
//!
//! A [`ConfigRoot`] owns an ordered list of providers, highest precedence
//! first, and answers every query by precedence-ordered scan. Because the
//! builder constructs providers from the last-registered source backwards,
//! **the last source added to the builder wins** for any key present in
//! several layers; this mirrors the "base config plus override layers"
//! usage pattern.
//!
//! Bulk exports go through the combined map: providers are folded from
//! lowest to highest precedence into one mapping, so later (higher
//! precedence) writes overwrite earlier ones. A duplicate key therefore
//! appears exactly once, holding the same value a per-key
//! [`get`](Config::get) would return.
//!
//! The root holds no locks of its own; each provider guarantees snapshot
//! atomicity, so concurrent reads are safe.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::ConfigProvider;
use crate::section::{ArraySection, Section};
use crate::value::{ConfigValue, FlatMap, KeyValuePair};

/// Merged, precedence-ordered view over a set of providers.
///
/// Built by [`ConfigBuilder::build`](crate::ConfigBuilder::build); this is
/// the entry point handed to callers.
pub struct ConfigRoot {
    /// Providers in precedence order: index 0 is consulted first.
    providers: Vec<ConfigProvider>,
}

impl ConfigRoot {
    pub(crate) fn new(providers: Vec<ConfigProvider>) -> Self {
        Self { providers }
    }

    /// Number of providers in this root.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// The providers in precedence order: index 0 is consulted first, and
    /// belongs to the last source registered on the builder.
    #[must_use]
    pub fn providers(&self) -> &[ConfigProvider] {
        &self.providers
    }

    /// Folds every provider into one mapping, lowest precedence first, so a
    /// higher-precedence provider's value overwrites a lower one's.
    fn combined_map(&self) -> FlatMap {
        let mut combined = FlatMap::new();

        for provider in self.providers.iter().rev() {
            for pair in provider.to_key_value_pairs() {
                combined.insert(pair.key, pair.value);
            }
        }

        combined
    }

    /// A path-scoped view rooted at `path`.
    ///
    /// Sections never copy data; they resolve through this root at access
    /// time. The path is normalized to canonical form.
    #[must_use]
    pub fn section(&self, path: &str) -> Section<'_> {
        Section::new(self, path)
    }

    /// An array-scoped view rooted at `path`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotAnArray`] when no element exists at index 0
    /// under `path`; array-ness is a hard precondition, not a soft default.
    pub fn array_section(&self, path: &str) -> Result<ArraySection<'_>> {
        ArraySection::new(self, path)
    }

    /// `true` when `path` is array-shaped in the merged key set.
    #[must_use]
    pub fn is_array(&self, path: &str) -> bool {
        crate::path::is_array_path(&crate::path::combine([path]), &self.keys())
    }

    /// Selectively reloads providers whose change token has fired.
    ///
    /// Providers whose token never fired are left untouched: their data is
    /// preserved and no I/O happens for them. A provider whose reload fails
    /// keeps its last-good snapshot; the sweep continues and the first
    /// failure is returned once every provider has been visited.
    ///
    /// # Errors
    ///
    /// Returns the first reload failure encountered, after completing the
    /// sweep.
    pub fn reload(&self) -> Result<()> {
        let mut first_error = None;

        for provider in &self.providers {
            if !provider.change_token().has_changed() {
                continue;
            }

            tracing::debug!(
                source = provider.source_name(),
                "change token fired, reloading provider",
            );

            if let Err(e) = provider.reload() {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Disposes every provider, stopping live-update bindings and clearing
    /// their snapshots. The root is unusable afterwards.
    pub fn dispose(&mut self) {
        for provider in &mut self.providers {
            provider.dispose();
        }
    }
}

impl Config for ConfigRoot {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        if key.is_empty() {
            return None;
        }

        self.providers.iter().find_map(|p| p.get(key))
    }

    fn set(&self, key: &str, value: ConfigValue) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("key"));
        }

        if self.providers.is_empty() {
            return Err(Error::NoProvider);
        }

        // Route to the first provider already holding the key; fall back to
        // the highest-precedence provider. Never creates a new provider.
        for provider in &self.providers {
            if provider.contains_key(key) {
                return provider.set(key, value);
            }
        }

        self.providers[0].set(key, value)
    }

    fn contains_key(&self, key: &str) -> bool {
        !key.is_empty() && self.providers.iter().any(|p| p.contains_key(key))
    }

    fn keys(&self) -> Vec<String> {
        self.combined_map().into_keys().collect()
    }

    fn values(&self) -> Vec<ConfigValue> {
        self.combined_map().into_values().collect()
    }

    fn to_key_value_pairs(&self) -> Vec<KeyValuePair> {
        self.combined_map()
            .into_iter()
            .map(|(k, v)| KeyValuePair::new(k, v))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.providers.iter().all(|p| p.is_empty())
    }
}

impl std::fmt::Debug for ConfigRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRoot")
            .field("providers", &self.providers)
            .finish()
    }
}
