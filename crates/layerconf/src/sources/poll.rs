//! Fixed-interval polling wrapper.

use std::sync::Arc;
use std::time::Duration;

use crate::changes::{ChangeCallback, ChangeSet};
use crate::error::Result;
use crate::source::ConfigSource;
use crate::value::FlatMap;

/// Wraps any source with a fixed-interval poll loop.
///
/// Backends without native change notification (a remote key-value store, a
/// database table) get live updates by re-loading on a timer and diffing
/// against the previous snapshot; a reload whose diff is empty is suppressed.
/// Requires the `watch` feature to take effect.
///
/// # Example
///
/// ```rust,ignore
/// let remote = PollSource::new(ConsulSource::new(client), Duration::from_secs(30))
///     .on_change(|changes| tracing::info!(n = changes.len(), "remote config changed"));
/// ```
pub struct PollSource {
    inner: Box<dyn ConfigSource>,
    interval: Duration,
    on_change: Option<Arc<ChangeCallback>>,
}

impl PollSource {
    /// Wraps `inner`, polling at the given interval.
    pub fn new(inner: impl ConfigSource + 'static, interval: Duration) -> Self {
        Self {
            inner: Box::new(inner),
            interval,
            on_change: None,
        }
    }

    /// Registers a callback receiving the diff of every non-empty poll
    /// reload.
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ChangeSet) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }
}

impl ConfigSource for PollSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn load(&self) -> Result<FlatMap> {
        self.inner.load()
    }

    fn poll_interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn change_callback(&self) -> Option<Arc<ChangeCallback>> {
        self.on_change.clone()
    }
}
