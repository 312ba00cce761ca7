//! # layerconf
//!
//! A layered configuration aggregation library for Rust.
//!
//! `layerconf` merges multiple named configuration sources (environment
//! variables, JSON/TOML/YAML files, `.env` files, in-memory seeds, polled
//! remote backends) into one lookup surface with typed accessors, change
//! detection, and path-based sectioning.
//!
//! Every source is flattened into a mapping from a **canonical path** to a
//! scalar: nested maps become `/db/port`-style keys, arrays become
//! `/servers/$0` with a reserved `$` index marker. Because all formats share
//! one flat key space, a TOML table, a YAML mapping, and a group of
//! environment variables layer over each other transparently.
//!
//! ## Precedence
//!
//! Sources are registered on a [`ConfigBuilder`]; **the last source added
//! wins** for any key present in several layers. Register base
//! configuration first and override layers after it.
//!
//! ## Quick Start
//!
//! ```rust
//! use layerconf::{Config, ConfigBuilder};
//! use layerconf::sources::{JsonSource, MemorySource};
//!
//! let root = ConfigBuilder::new()
//!     .add(JsonSource::new(r#"{"db": {"host": "localhost", "port": 5432}}"#))
//!     .add(MemorySource::new().with("db/port", 6543u16)) // override layer
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(root.get_int("/db/port").unwrap(), 6543);
//! assert_eq!(root.try_get_string("/db/host", "fallback".into()), "localhost");
//!
//! let db = root.section("/db");
//! assert_eq!(db.get_int("port").unwrap(), 6543);
//! ```
//!
//! ## Live Reload
//!
//! With the `watch` feature, file-backed sources built with
//! `reload_on_change` bind a background watcher; on an external change the
//! provider reloads, diffs against the previous snapshot, swaps atomically,
//! and fires its change token. [`ConfigRoot::reload`] is selective: it only
//! re-loads providers whose token fired, leaving every other provider's data
//! untouched.
//!
//! ```rust,ignore
//! use layerconf::{Config, ConfigBuilder};
//! use layerconf::sources::FileSource;
//!
//! let root = ConfigBuilder::new()
//!     .add(FileSource::new("config.toml")
//!         .reload_on_change(true)
//!         .on_change(|changes| {
//!             for change in changes.changes() {
//!                 tracing::info!("{change}");
//!             }
//!         }))
//!     .build()?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `toml` | TOML file support (default) |
//! | `yaml` | YAML file support (default) |
//! | `dotenv` | `.env` file sources |
//! | `watch` | File watching and fixed-interval polling |
//! | `full` | Everything above |
//!
//! JSON support is always available.
//!
//! ## Error Handling
//!
//! Point queries never fail; absence is `None`. Typed getters surface
//! [`Error`] values; the `try_get_*` family swallows every error kind and
//! returns the caller's default. Errors render with diagnostic codes and
//! help text via [`miette`].

pub mod builder;
pub mod changes;
pub mod config;
pub mod error;
pub mod flatten;
pub mod path;
pub mod provider;
pub mod root;
pub mod section;
pub mod source;
pub mod sources;
pub mod token;
pub mod value;

#[cfg(feature = "watch")]
mod watch;

pub use builder::ConfigBuilder;
pub use changes::{Change, ChangeCallback, ChangeMode, ChangeSet};
pub use config::Config;
pub use error::{Error, Result};
pub use provider::ConfigProvider;
pub use root::ConfigRoot;
pub use section::{ArraySection, Section};
pub use source::{ConfigSource, FileConfigSource};
pub use token::ChangeToken;
pub use value::{ConfigValue, FlatMap, FromConfigValue, KeyValuePair};
