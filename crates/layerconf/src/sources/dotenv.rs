//! `.env` file source.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{self, KEY_DELIMITER};
use crate::source::{ConfigSource, FileConfigSource};
use crate::value::{ConfigValue, FlatMap};

/// Source reading a dotenv-style `KEY=value` file.
///
/// Keys use the same `__` nesting convention as
/// [`EnvSource`](crate::sources::EnvSource); values are type-inferred.
#[derive(Clone, Debug)]
pub struct DotenvSource {
    file_path: PathBuf,
    tolerate_missing: bool,
}

impl DotenvSource {
    /// Creates a source over the given `.env` file.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            tolerate_missing: false,
        }
    }

    /// When enabled, a missing file loads as an empty mapping instead of
    /// failing.
    #[must_use]
    pub fn tolerate_missing(mut self, tolerate: bool) -> Self {
        self.tolerate_missing = tolerate;
        self
    }
}

impl ConfigSource for DotenvSource {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn load(&self) -> Result<FlatMap> {
        if !self.file_exists() {
            if self.tolerate_missing {
                tracing::warn!(
                    path = %self.file_path.display(),
                    "can't find the dotenv file, loading empty",
                );
                return Ok(FlatMap::new());
            }

            return Err(Error::source_load(
                self.name(),
                format!("can't find the dotenv file: {}", self.file_path.display()),
            ));
        }

        let mut out = FlatMap::new();

        for item in dotenvy::from_path_iter(&self.file_path).map_err(|e| {
            Error::source_load_with_cause(self.name(), "can't read the dotenv file", e)
        })? {
            let (name, value) = item.map_err(|e| {
                Error::source_load_with_cause(self.name(), "malformed dotenv entry", e)
            })?;

            let nested = name.replace("__", &KEY_DELIMITER.to_string());
            let key = path::combine([nested.as_str()]);

            out.insert(key, ConfigValue::from_str_infer(&value));
        }

        Ok(out)
    }
}

impl FileConfigSource for DotenvSource {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn tolerate_missing(&self) -> bool {
        self.tolerate_missing
    }
}
