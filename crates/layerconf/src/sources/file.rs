//! File-backed configuration source with optional live reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::changes::{ChangeCallback, ChangeSet};
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::source::{ConfigSource, FileConfigSource};
use crate::sources::format::FileFormat;
use crate::value::FlatMap;

/// Source reading a configuration file from disk.
///
/// The format is detected from the extension unless pinned with
/// [`with_format`](Self::with_format). A missing file is an error by default;
/// [`tolerate_missing`](Self::tolerate_missing) turns it into an empty
/// mapping instead.
///
/// With [`reload_on_change`](Self::reload_on_change) (and the `watch`
/// feature), the provider built over this source binds a file watcher and
/// reloads whenever the file changes on disk; a callback registered via
/// [`on_change`](Self::on_change) receives the diff of every non-empty
/// reload.
///
/// # Example
///
/// ```rust,ignore
/// let source = FileSource::new("config.toml")
///     .tolerate_missing(true)
///     .reload_on_change(true)
///     .on_change(|changes| {
///         for change in changes.changes() {
///             println!("{change}");
///         }
///     });
/// ```
#[derive(Clone)]
pub struct FileSource {
    file_path: PathBuf,
    display_name: String,
    format: Option<FileFormat>,
    tolerate_missing: bool,
    reload_on_change: bool,
    on_change: Option<Arc<ChangeCallback>>,
}

impl FileSource {
    /// Creates a source over the given file path.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let display_name = format!("file:{}", file_path.display());

        Self {
            file_path,
            display_name,
            format: None,
            tolerate_missing: false,
            reload_on_change: false,
            on_change: None,
        }
    }

    /// Pins the format instead of detecting it from the extension.
    #[must_use]
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// When enabled, a missing file loads as an empty mapping instead of
    /// failing.
    #[must_use]
    pub fn tolerate_missing(mut self, tolerate: bool) -> Self {
        self.tolerate_missing = tolerate;
        self
    }

    /// When enabled, the provider binds a file watcher and reloads on
    /// external change. Requires the `watch` feature to take effect.
    #[must_use]
    pub fn reload_on_change(mut self, reload: bool) -> Self {
        self.reload_on_change = reload;
        self
    }

    /// Registers a callback receiving the diff of every non-empty live
    /// reload.
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ChangeSet) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    fn detect_format(&self) -> Result<FileFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        FileFormat::from_path(&self.file_path).ok_or_else(|| {
            Error::source_load(
                &self.display_name,
                "unrecognized file extension; pin the format with with_format",
            )
        })
    }
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("file_path", &self.file_path)
            .field("format", &self.format)
            .field("tolerate_missing", &self.tolerate_missing)
            .field("reload_on_change", &self.reload_on_change)
            .finish_non_exhaustive()
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn load(&self) -> Result<FlatMap> {
        if !self.file_exists() {
            if self.tolerate_missing {
                tracing::warn!(
                    path = %self.file_path.display(),
                    "can't find the configuration file, loading empty",
                );
                return Ok(FlatMap::new());
            }

            return Err(Error::source_load(
                &self.display_name,
                format!(
                    "can't find the configuration file: {}",
                    self.file_path.display()
                ),
            ));
        }

        let content = std::fs::read_to_string(&self.file_path).map_err(|e| {
            Error::source_load_with_cause(
                &self.display_name,
                "can't read the configuration file",
                e,
            )
        })?;

        let document = self.detect_format()?.parse(&content)?;

        Ok(flatten(&document))
    }

    fn watch_path(&self) -> Option<PathBuf> {
        self.reload_on_change.then(|| self.file_path.clone())
    }

    fn change_callback(&self) -> Option<Arc<ChangeCallback>> {
        self.on_change.clone()
    }
}

impl FileConfigSource for FileSource {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn tolerate_missing(&self) -> bool {
        self.tolerate_missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConfigValue;
    use std::io::Write;

    #[test]
    fn loads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        std::fs::write(&file_path, r#"{"db": {"port": 5432}}"#).unwrap();

        let flat = FileSource::new(&file_path).load().unwrap();

        assert_eq!(flat["/db/port"], ConfigValue::UnsignedInteger(5432));
    }

    #[test]
    fn missing_file_fails_unless_tolerated() {
        let source = FileSource::new("/nonexistent/config.json");
        assert!(source.load().is_err());

        let tolerant = FileSource::new("/nonexistent/config.json").tolerate_missing(true);
        assert!(tolerant.load().unwrap().is_empty());
    }

    #[test]
    fn unknown_extension_requires_pinned_format() {
        let mut file = tempfile::Builder::new()
            .suffix(".conf")
            .tempfile()
            .unwrap();
        write!(file, r#"{{"a": 1}}"#).unwrap();

        assert!(FileSource::new(file.path()).load().is_err());

        let pinned = FileSource::new(file.path()).with_format(FileFormat::Json);
        assert_eq!(
            pinned.load().unwrap()["/a"],
            ConfigValue::UnsignedInteger(1)
        );
    }

    #[test]
    fn watch_path_follows_reload_flag() {
        let source = FileSource::new("config.json");
        assert!(source.watch_path().is_none());

        let watched = FileSource::new("config.json").reload_on_change(true);
        assert!(watched.watch_path().is_some());
    }
}
