//! Path-scoped views over a configuration root.
//!
//! A [`Section`] is a `(root, path)` pair: it copies no data, composes its
//! path with every relative key, and delegates to the root at access time,
//! so a section always observes the root's live state, including values
//! that arrived through a reload after the section was created.
//!
//! An [`ArraySection`] is a section over an array-shaped path. Array-ness is
//! validated at construction: a path without an element at index 0 yields
//! [`Error::NotAnArray`] instead of a section.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path;
use crate::root::ConfigRoot;
use crate::value::{ConfigValue, KeyValuePair};

/// A path-scoped read/write view over a [`ConfigRoot`].
///
/// ```rust
/// use layerconf::{Config, ConfigBuilder};
/// use layerconf::sources::JsonSource;
///
/// let root = ConfigBuilder::new()
///     .add(JsonSource::new(r#"{"db": {"host": "localhost", "port": 5432}}"#))
///     .build()
///     .unwrap();
///
/// let db = root.section("/db");
/// assert_eq!(db.get_int("port").unwrap(), 5432);
/// assert_eq!(db.key(), "db");
/// assert_eq!(db.keys().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Section<'a> {
    root: &'a ConfigRoot,
    section_path: String,
}

impl<'a> Section<'a> {
    pub(crate) fn new(root: &'a ConfigRoot, section_path: &str) -> Self {
        Self {
            root,
            section_path: path::combine([section_path]),
        }
    }

    /// The section's full canonical path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.section_path
    }

    /// The last segment of the section's path.
    #[must_use]
    pub fn key(&self) -> &str {
        path::section_key(&self.section_path)
    }

    /// A nested section under this one.
    #[must_use]
    pub fn section(&self, key: &str) -> Section<'a> {
        Section::new(self.root, &self.resolve(key))
    }

    /// A nested array section under this one.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotAnArray`] when the nested path is not
    /// array-shaped.
    pub fn array_section(&self, key: &str) -> Result<ArraySection<'a>> {
        ArraySection::new(self.root, &self.resolve(key))
    }

    /// `true` when this section's path is array-shaped in the live key set.
    #[must_use]
    pub fn is_array(&self) -> bool {
        path::is_array_path(&self.section_path, &self.keys())
    }

    fn resolve(&self, key: &str) -> String {
        path::combine([self.section_path.as_str(), key])
    }
}

impl Config for Section<'_> {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.root.get(&self.resolve(key))
    }

    fn set(&self, key: &str, value: ConfigValue) -> Result<()> {
        self.root.set(&self.resolve(key), value)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(&self.resolve(key))
    }

    fn keys(&self) -> Vec<String> {
        path::child_keys(&self.section_path, &self.root.keys())
    }

    fn values(&self) -> Vec<ConfigValue> {
        self.to_key_value_pairs()
            .into_iter()
            .map(|pair| pair.value)
            .collect()
    }

    fn to_key_value_pairs(&self) -> Vec<KeyValuePair> {
        self.root
            .to_key_value_pairs()
            .into_iter()
            .filter(|pair| path::has_path_in_key(&self.section_path, &pair.key))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.root
            .to_key_value_pairs()
            .iter()
            .all(|pair| !path::has_path_in_key(&self.section_path, &pair.key))
    }
}

/// A section over an array-shaped path.
///
/// ```rust
/// use layerconf::{Config, ConfigBuilder};
/// use layerconf::sources::JsonSource;
///
/// let root = ConfigBuilder::new()
///     .add(JsonSource::new(r#"{"servers": [{"port": 80}, {"port": 81}]}"#))
///     .build()
///     .unwrap();
///
/// let servers = root.array_section("/servers").unwrap();
/// assert_eq!(servers.len(), 2);
/// assert_eq!(servers.index_section(1).get_int("port").unwrap(), 81);
///
/// // A non-array path cannot produce an array section.
/// assert!(root.array_section("/servers/$0").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ArraySection<'a> {
    inner: Section<'a>,
}

impl<'a> ArraySection<'a> {
    pub(crate) fn new(root: &'a ConfigRoot, section_path: &str) -> Result<Self> {
        let inner = Section::new(root, section_path);

        if !inner.is_array() {
            return Err(Error::not_an_array(inner.path()));
        }

        Ok(Self { inner })
    }

    /// The array's full canonical path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.inner.path()
    }

    /// One past the highest index present, recomputed from the live key set.
    #[must_use]
    pub fn len(&self) -> i64 {
        path::array_len(self.inner.path(), &self.inner.keys())
    }

    /// `true` when no element remains under this path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Config::is_empty(&self.inner)
    }

    /// The section addressing the element at `idx`.
    #[must_use]
    pub fn index_section(&self, idx: usize) -> Section<'a> {
        self.inner.section(&path::array_index(idx))
    }

    /// The plain section view over the same path.
    #[must_use]
    pub fn as_section(&self) -> &Section<'a> {
        &self.inner
    }
}

impl Config for ArraySection<'_> {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: ConfigValue) -> Result<()> {
        self.inner.set(key, value)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn values(&self) -> Vec<ConfigValue> {
        self.inner.values()
    }

    fn to_key_value_pairs(&self) -> Vec<KeyValuePair> {
        self.inner.to_key_value_pairs()
    }

    fn is_empty(&self) -> bool {
        Config::is_empty(&self.inner)
    }
}
