//! Builder assembling sources into a configuration root.

use crate::error::Result;
use crate::provider::ConfigProvider;
use crate::root::ConfigRoot;
use crate::source::ConfigSource;

/// Collects sources and materializes a [`ConfigRoot`].
///
/// Registration order defines precedence: providers are constructed from the
/// last-added source backwards, so **the last [`add`](Self::add) wins** for
/// any key present in several sources. Register base configuration first and
/// override layers after it:
///
/// ```rust
/// use layerconf::{Config, ConfigBuilder};
/// use layerconf::sources::MemorySource;
///
/// let root = ConfigBuilder::new()
///     .add(MemorySource::new().with("port", 8080u16))   // base
///     .add(MemorySource::new().with("port", 9090u16))   // override
///     .build()
///     .unwrap();
///
/// assert_eq!(root.get_int("/port").unwrap(), 9090);
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source. Later additions take precedence over earlier
    /// ones.
    #[must_use]
    pub fn add(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Registers an already-boxed source; `None` is ignored.
    #[must_use]
    pub fn add_boxed(mut self, source: Option<Box<dyn ConfigSource>>) -> Self {
        if let Some(source) = source {
            self.sources.push(source);
        }

        self
    }

    /// Number of registered sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Constructs a provider per source and assembles the root.
    ///
    /// Sources are consumed from last-added to first-added, which places the
    /// last-registered source at the highest precedence inside the root.
    /// Every provider loads eagerly here.
    ///
    /// # Errors
    ///
    /// Fails when any source's first load fails.
    pub fn build(self) -> Result<ConfigRoot> {
        let mut providers = Vec::with_capacity(self.sources.len());

        for source in self.sources.into_iter().rev() {
            providers.push(ConfigProvider::new(source)?);
        }

        Ok(ConfigRoot::new(providers))
    }
}

impl std::fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("sources", &self.sources.len())
            .finish()
    }
}
