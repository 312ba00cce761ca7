//! In-memory TOML document source.

use crate::error::Result;
use crate::flatten::flatten;
use crate::source::ConfigSource;
use crate::sources::format::FileFormat;
use crate::value::FlatMap;

/// Source parsing a TOML document held in memory.
#[derive(Clone, Debug)]
pub struct TomlSource {
    content: String,
}

impl TomlSource {
    /// Creates a source over the given TOML text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl ConfigSource for TomlSource {
    fn name(&self) -> &str {
        "toml"
    }

    fn load(&self) -> Result<FlatMap> {
        let document = FileFormat::Toml.parse(&self.content)?;

        Ok(flatten(&document))
    }
}
