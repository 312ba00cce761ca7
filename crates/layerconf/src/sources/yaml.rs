//! In-memory YAML document source.

use crate::error::Result;
use crate::flatten::flatten;
use crate::source::ConfigSource;
use crate::sources::format::FileFormat;
use crate::value::FlatMap;

/// Source parsing a YAML document held in memory.
#[derive(Clone, Debug)]
pub struct YamlSource {
    content: String,
}

impl YamlSource {
    /// Creates a source over the given YAML text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl ConfigSource for YamlSource {
    fn name(&self) -> &str {
        "yaml"
    }

    fn load(&self) -> Result<FlatMap> {
        let document = FileFormat::Yaml.parse(&self.content)?;

        Ok(flatten(&document))
    }
}
