//! The configuration provider: one source's snapshot and reload lifecycle.
//!
//! There is exactly one provider type. Per-format behavior lives entirely in
//! the injected [`ConfigSource`]; the provider owns the flattened snapshot,
//! the change token, and (with the `watch` feature) the live-update
//! binding.
//!
//! # Snapshot Atomicity
//!
//! The snapshot is an `Arc<FlatMap>` behind a [`parking_lot::RwLock`] and is
//! replaced wholesale by pointer swap, never mutated field-by-field in
//! place. Concurrent readers see either the fully-old or the fully-new
//! mapping. Providers are independent; no cross-provider lock exists.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::changes::ChangeSet;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::source::ConfigSource;
use crate::token::ChangeToken;
use crate::value::{ConfigValue, FlatMap, KeyValuePair};

/// State shared between a provider and its watch threads.
pub(crate) struct ProviderCore {
    pub(crate) source: Arc<dyn ConfigSource>,
    pub(crate) data: RwLock<Arc<FlatMap>>,
    pub(crate) token: ChangeToken,
}

impl ProviderCore {
    /// Reloads from the source, swapping the snapshot only when the diff
    /// against the previous mapping is non-empty.
    ///
    /// Returns the diff to hand to the change callback, or `None` when the
    /// reload failed (previous snapshot retained) or was a no-op.
    #[cfg_attr(not(feature = "watch"), allow(dead_code))]
    pub(crate) fn reload_and_diff(&self) -> Option<ChangeSet> {
        let fresh = match self.source.load() {
            Ok(fresh) => fresh,

            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %e,
                    "live reload failed, keeping previous snapshot",
                );
                return None;
            }
        };

        let previous = self.data.read().clone();
        let diff = ChangeSet::diff(&fresh, &previous);

        if diff.is_empty() {
            tracing::debug!(
                source = self.source.name(),
                "no changes in configuration source, suppressing reload",
            );
            return None;
        }

        *self.data.write() = Arc::new(fresh);
        self.token.mark_changed();

        Some(diff)
    }
}

/// Owns one source's flattened key/value snapshot.
///
/// Created by [`ConfigBuilder::build`](crate::ConfigBuilder::build), which
/// loads the source eagerly; a failing first load aborts the build. Point
/// operations are exact string matches against the snapshot; path
/// composition happens one layer up, in the root and its sections.
pub struct ConfigProvider {
    core: Arc<ProviderCore>,
    disposed: AtomicBool,
    #[cfg(feature = "watch")]
    watch: Option<crate::watch::WatchHandle>,
}

impl ConfigProvider {
    /// Creates a provider over `source`, loading it immediately.
    ///
    /// When the source asks for live updates (a watch path or a poll
    /// interval) and the `watch` feature is enabled, the corresponding
    /// background binding is started here; a binding failure is logged and
    /// leaves the provider functional without live updates.
    ///
    /// # Errors
    ///
    /// Fails when the very first load fails.
    pub fn new(source: Box<dyn ConfigSource>) -> Result<Self> {
        let source: Arc<dyn ConfigSource> = Arc::from(source);
        let initial = source.load()?;

        let core = Arc::new(ProviderCore {
            source,
            data: RwLock::new(Arc::new(initial)),
            token: ChangeToken::new(),
        });

        #[cfg(feature = "watch")]
        let watch = match crate::watch::bind(&core) {
            Ok(handle) => handle,

            Err(e) => {
                tracing::warn!(
                    source = core.source.name(),
                    error = %e,
                    "can't start the watcher, live updates disabled",
                );
                None
            }
        };

        Ok(Self {
            core,
            disposed: AtomicBool::new(false),
            #[cfg(feature = "watch")]
            watch,
        })
    }

    /// The name of the bound source, for logging.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.core.source.name()
    }

    /// The provider's change token.
    ///
    /// The token reads changed from the moment the underlying source
    /// signaled a live update until the next successful [`reload`](Self::reload).
    #[must_use]
    pub fn change_token(&self) -> ChangeToken {
        self.core.token.clone()
    }

    /// Re-invokes the source and replaces the snapshot wholesale.
    ///
    /// On failure the previous snapshot is retained and a warning is logged.
    /// A successful reload resets the change token.
    ///
    /// # Errors
    ///
    /// Propagates the source's load error.
    pub fn reload(&self) -> Result<()> {
        match self.core.source.load() {
            Ok(fresh) => {
                *self.core.data.write() = Arc::new(fresh);
                self.core.token.reset();
                Ok(())
            }

            Err(e) => {
                tracing::warn!(
                    source = self.source_name(),
                    error = %e,
                    "reload failed, keeping previous snapshot",
                );
                Err(e)
            }
        }
    }

    /// Stops any live-update binding and clears the snapshot.
    ///
    /// Terminal but idempotent; subsequent calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        #[cfg(feature = "watch")]
        {
            self.watch = None;
        }

        *self.core.data.write() = Arc::new(FlatMap::new());
    }
}

impl Config for ConfigProvider {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        if key.is_empty() {
            return None;
        }

        self.core.data.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: ConfigValue) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("key"));
        }

        let mut guard = self.core.data.write();
        Arc::make_mut(&mut guard).insert(key.to_string(), value);

        Ok(())
    }

    fn contains_key(&self, key: &str) -> bool {
        !key.is_empty() && self.core.data.read().contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.core.data.read().keys().cloned().collect()
    }

    fn values(&self) -> Vec<ConfigValue> {
        self.core.data.read().values().cloned().collect()
    }

    fn to_key_value_pairs(&self) -> Vec<KeyValuePair> {
        self.core
            .data
            .read()
            .iter()
            .map(|(k, v)| KeyValuePair::new(k, v.clone()))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.core.data.read().is_empty()
    }
}

impl std::fmt::Debug for ConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigProvider")
            .field("source", &self.source_name())
            .field("len", &self.core.data.read().len())
            .field("changed", &self.core.token.has_changed())
            .finish_non_exhaustive()
    }
}
