//! Source abstraction for pluggable configuration backends.
//!
//! A [`ConfigSource`] is anything that can produce a flattened mapping from
//! canonical path to scalar: a file in some format, the process environment,
//! an in-memory seed, or a polled remote backend. The core never inspects a
//! source's internals: one generic [`ConfigProvider`](crate::ConfigProvider)
//! wraps any boxed source, and all format-specific logic lives behind
//! [`ConfigSource::load`].
//!
//! # Built-in Sources
//!
//! - [`MemorySource`](crate::sources::MemorySource) - seedable in-memory map
//! - [`JsonSource`](crate::sources::JsonSource) /
//!   [`TomlSource`](crate::sources::TomlSource) /
//!   [`YamlSource`](crate::sources::YamlSource) - in-memory documents
//! - [`FileSource`](crate::sources::FileSource) - format auto-detected files
//! - [`EnvSource`](crate::sources::EnvSource) - environment snapshot
//! - [`DotenvSource`](crate::sources::DotenvSource) - `.env` files (`dotenv`)
//! - [`PollSource`](crate::sources::PollSource) - fixed-interval polling wrapper
//!
//! # Custom Sources
//!
//! Implement the trait to plug in any backend (a remote key-value store, a
//! database table, ...):
//!
//! ```rust,ignore
//! use layerconf::{ConfigSource, FlatMap, Result};
//!
//! struct ConsulSource { client: ConsulClient }
//!
//! impl ConfigSource for ConsulSource {
//!     fn name(&self) -> &str { "consul" }
//!
//!     fn load(&self) -> Result<FlatMap> {
//!         // Fetch the subtree and flatten it into canonical paths...
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::changes::ChangeCallback;
use crate::error::Result;
use crate::value::FlatMap;

/// A named producer of flattened configuration snapshots.
///
/// `load` must be pure with respect to the core: given the backend's current
/// state it returns a complete mapping from canonical path to scalar, or an
/// error. The provider owns caching, diffing, and the reload lifecycle.
pub trait ConfigSource: Send + Sync {
    /// The source's name for logging and error attribution.
    fn name(&self) -> &str;

    /// Produces a fresh flattened mapping from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceLoad`](crate::Error::SourceLoad) when the raw
    /// input cannot be read or parsed.
    fn load(&self) -> Result<FlatMap>;

    /// The filesystem path to watch for live updates, if any.
    ///
    /// Returning `Some` makes the provider bind a file watcher at
    /// construction (requires the `watch` feature to take effect).
    fn watch_path(&self) -> Option<PathBuf> {
        None
    }

    /// Fixed polling interval for backends without native notifications.
    ///
    /// Returning `Some` makes the provider run a poll loop at this interval
    /// (requires the `watch` feature to take effect).
    fn poll_interval(&self) -> Option<Duration> {
        None
    }

    /// Callback invoked with the diff whenever a live reload produced a
    /// non-empty change set.
    fn change_callback(&self) -> Option<Arc<ChangeCallback>> {
        None
    }
}

/// Extension contract for file-backed sources.
pub trait FileConfigSource: ConfigSource {
    /// The backing file path.
    fn file_path(&self) -> &Path;

    /// Whether the backing file currently exists.
    fn file_exists(&self) -> bool {
        self.file_path().exists()
    }

    /// When `true`, a missing file loads as an empty mapping instead of
    /// failing.
    fn tolerate_missing(&self) -> bool;
}
