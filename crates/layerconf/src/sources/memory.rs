//! In-memory configuration source.

use crate::error::Result;
use crate::path;
use crate::source::ConfigSource;
use crate::value::{ConfigValue, FlatMap};

/// Source backed by a literal in-memory mapping.
///
/// Useful for defaults, overrides built in code, and tests. Keys are
/// normalized to canonical form at insertion.
///
/// # Example
///
/// ```rust
/// use layerconf::sources::MemorySource;
/// use layerconf::{Config, ConfigBuilder};
///
/// let source = MemorySource::new()
///     .with("db/host", "localhost")
///     .with("db/port", 5432u16);
///
/// let root = ConfigBuilder::new().add(source).build().unwrap();
/// assert_eq!(root.try_get_int("/db/port", 0), 5432);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    seed: FlatMap,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry; the key is normalized to canonical form.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.seed.insert(path::combine([key]), value.into());
        self
    }

    /// Adds every entry of an existing mapping.
    #[must_use]
    pub fn with_all<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        for (key, value) in entries {
            self.seed.insert(path::combine([key.as_ref()]), value.into());
        }

        self
    }
}

impl ConfigSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<FlatMap> {
        Ok(self.seed.clone())
    }
}
