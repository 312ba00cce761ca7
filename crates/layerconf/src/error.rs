//! Error types for configuration loading and lookup.
//!
//! All fallible operations in the crate report through the single [`Error`]
//! enum, which integrates with [`miette`] for rich terminal diagnostics.
//!
//! # Error Variants
//!
//! | Variant | When It Occurs |
//! |---------|----------------|
//! | [`Error::InvalidArgument`] | Empty key or other unusable parameter |
//! | [`Error::KeyNotFound`] | Typed getter on an absent key |
//! | [`Error::Conversion`] | Stored value cannot produce the requested type |
//! | [`Error::SourceLoad`] | A source failed to produce its flattened mapping |
//! | [`Error::NoProvider`] | `set` attempted on a root with zero providers |
//! | [`Error::NotAnArray`] | Array section requested over a non-array path |
//! | [`Error::WatchInit`] | File watcher could not be started (`watch`) |
//! | [`Error::WatchPath`] | A specific path could not be watched (`watch`) |
//!
//! Point queries (`get`, `contains_key`) never error; absence is `None`. The
//! `try_get_*` accessor family swallows every variant and substitutes the
//! caller-supplied default, which is the recommended default-safe pattern.

use std::error::Error as StdError;
#[cfg(feature = "watch")]
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// Errors produced by configuration building, loading, and typed access.
#[derive(Debug, ThisError, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was empty or otherwise unusable.
    #[error("invalid argument: {what}")]
    #[diagnostic(code(layerconf::invalid_argument))]
    InvalidArgument {
        /// Description of the offending argument.
        what: String,
    },

    /// A typed getter was called for a key no provider contains.
    #[error("key '{key}' not found in configuration")]
    #[diagnostic(
        code(layerconf::key_not_found),
        help("check the canonical path spelling; keys are matched exactly")
    )]
    KeyNotFound {
        /// The canonical path that was requested.
        key: String,
    },

    /// The stored value's kind or content cannot produce the requested type.
    #[error("can't convert value at '{key}' to {expected}: found {found}")]
    #[diagnostic(code(layerconf::conversion_failed))]
    Conversion {
        /// The canonical path of the value.
        key: String,
        /// The requested target type.
        expected: &'static str,
        /// A short description of the stored value.
        found: String,
    },

    /// A configuration source failed to produce its flattened mapping.
    #[error("configuration source '{source_name}' failed to load: {message}")]
    #[diagnostic(
        code(layerconf::source_load_failed),
        help("check that the underlying file or backend is readable and well-formed")
    )]
    SourceLoad {
        /// Name of the failing source.
        source_name: String,
        /// Human-readable error message.
        message: String,
        /// The underlying error, if available.
        #[source]
        cause: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// `set` was attempted on a root without any provider.
    #[error("there is no configuration provider")]
    #[diagnostic(
        code(layerconf::no_provider),
        help("add at least one source to the builder before writing values")
    )]
    NoProvider,

    /// An array section was requested over a path without a `$0` child.
    #[error("path '{path}' is not array-shaped")]
    #[diagnostic(
        code(layerconf::not_an_array),
        help("an array path must have an element at index 0, e.g. '<path>/$0'")
    )]
    NotAnArray {
        /// The non-array path.
        path: String,
    },

    /// Failed to initialize the file watcher.
    #[cfg(feature = "watch")]
    #[error("failed to initialize file watcher: {message}")]
    #[diagnostic(code(layerconf::watch_init_failed))]
    WatchInit {
        /// Human-readable error message.
        message: String,
        /// The underlying notify error, if available.
        #[source]
        cause: Option<notify::Error>,
    },

    /// Failed to watch a specific path.
    #[cfg(feature = "watch")]
    #[error("failed to watch path '{path}': {message}")]
    #[diagnostic(
        code(layerconf::watch_path_error),
        help("ensure the path (or its parent directory) exists and is readable")
    )]
    WatchPath {
        /// The path that could not be watched.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    pub fn invalid_argument(what: impl Into<String>) -> Self {
        Error::InvalidArgument { what: what.into() }
    }

    /// Creates an [`Error::KeyNotFound`].
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Error::KeyNotFound { key: key.into() }
    }

    /// Creates an [`Error::Conversion`].
    pub fn conversion(
        key: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Error::Conversion {
            key: key.into(),
            expected,
            found: found.into(),
        }
    }

    /// Creates an [`Error::SourceLoad`] without an underlying cause.
    pub fn source_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SourceLoad {
            source_name: source_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an [`Error::SourceLoad`] wrapping an underlying error.
    pub fn source_load_with_cause(
        source_name: impl Into<String>,
        message: impl Into<String>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Error::SourceLoad {
            source_name: source_name.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an [`Error::NotAnArray`].
    pub fn not_an_array(path: impl Into<String>) -> Self {
        Error::NotAnArray { path: path.into() }
    }

    /// Creates an [`Error::WatchInit`].
    #[cfg(feature = "watch")]
    pub fn watch_init(message: impl Into<String>, cause: Option<notify::Error>) -> Self {
        Error::WatchInit {
            message: message.into(),
            cause,
        }
    }

    /// Creates an [`Error::WatchPath`].
    #[cfg(feature = "watch")]
    pub fn watch_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::WatchPath {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
