//! In-memory JSON document source.

use crate::error::Result;
use crate::flatten::flatten;
use crate::source::ConfigSource;
use crate::sources::format::FileFormat;
use crate::value::FlatMap;

/// Source parsing a JSON document held in memory.
///
/// For JSON files on disk use [`FileSource`](crate::sources::FileSource);
/// this source suits configuration arriving over the wire or embedded in the
/// binary.
#[derive(Clone, Debug)]
pub struct JsonSource {
    content: String,
}

impl JsonSource {
    /// Creates a source over the given JSON text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl ConfigSource for JsonSource {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<FlatMap> {
        let document = FileFormat::Json.parse(&self.content)?;

        Ok(flatten(&document))
    }
}
