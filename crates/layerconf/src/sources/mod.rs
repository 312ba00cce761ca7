//! Built-in configuration sources.
//!
//! Each source satisfies the narrow [`ConfigSource`](crate::ConfigSource)
//! contract: produce a flattened canonical-path mapping from its backend.
//! Format parsers, the filesystem, the environment, and polling backends all
//! live here; the merge/lookup core never sees anything but the flat maps
//! they return.

#[cfg(feature = "dotenv")]
mod dotenv;
mod env;
mod file;
pub mod format;
mod json;
mod memory;
#[cfg(feature = "watch")]
mod poll;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

#[cfg(feature = "dotenv")]
pub use self::dotenv::DotenvSource;
pub use self::env::EnvSource;
pub use self::file::FileSource;
pub use self::format::FileFormat;
pub use self::json::JsonSource;
pub use self::memory::MemorySource;
#[cfg(feature = "watch")]
pub use self::poll::PollSource;
#[cfg(feature = "toml")]
pub use self::toml::TomlSource;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlSource;
