//! Environment variable source.

use crate::error::Result;
use crate::path::{self, KEY_DELIMITER};
use crate::source::ConfigSource;
use crate::value::{ConfigValue, FlatMap};

/// Separator mapping environment variable names onto nested paths.
///
/// `APP_DB__PORT=5432` with prefix `APP_` lands at `/DB/PORT`.
const NESTING_SEPARATOR: &str = "__";

/// Source snapshotting the process environment.
///
/// With a prefix, only variables starting with it are taken and the prefix
/// is stripped from the key. A double underscore in the remaining name maps
/// to the path delimiter so env groups address nested keys; single
/// underscores are preserved. Values are type-inferred
/// (`"8080"` becomes an unsigned integer, `"true"` a boolean).
///
/// # Example
///
/// ```rust,ignore
/// // APP_DB__HOST=localhost  APP_DEBUG=true
/// let source = EnvSource::with_prefix("APP_");
/// // loads {"/DB/HOST": "localhost", "/DEBUG": true}
/// ```
#[derive(Clone, Debug, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    /// Creates a source over the whole environment.
    #[must_use]
    pub const fn new() -> Self {
        Self { prefix: None }
    }

    /// Creates a source taking only variables with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn key_for(&self, var_name: &str) -> Option<String> {
        let rest = match &self.prefix {
            Some(prefix) => var_name.strip_prefix(prefix.as_str())?,
            None => var_name,
        };

        if rest.is_empty() {
            return None;
        }

        let nested = rest.replace(NESTING_SEPARATOR, &KEY_DELIMITER.to_string());

        Some(path::combine([nested.as_str()]))
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn load(&self) -> Result<FlatMap> {
        let mut out = FlatMap::new();

        for (name, value) in std::env::vars_os() {
            let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
                tracing::debug!("skipping non-unicode environment variable");
                continue;
            };

            if let Some(key) = self.key_for(name) {
                out.insert(key, ConfigValue::from_str_infer(value));
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped_and_filters() {
        let source = EnvSource::with_prefix("APP_");

        assert_eq!(source.key_for("APP_PORT"), Some("/PORT".to_string()));
        assert_eq!(source.key_for("OTHER_PORT"), None);
        assert_eq!(source.key_for("APP_"), None);
    }

    #[test]
    fn double_underscore_nests() {
        let source = EnvSource::with_prefix("APP_");

        assert_eq!(source.key_for("APP_DB__PORT"), Some("/DB/PORT".to_string()));
        assert_eq!(
            source.key_for("APP_LOG_LEVEL"),
            Some("/LOG_LEVEL".to_string())
        );
    }

    #[test]
    fn no_prefix_takes_everything() {
        let source = EnvSource::new();

        assert_eq!(source.key_for("HOME"), Some("/HOME".to_string()));
    }

    #[test]
    fn snapshot_contains_inferred_values() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("LAYERCONF_ENVTEST_NUM", "42") };

        let flat = EnvSource::with_prefix("LAYERCONF_ENVTEST_").load().unwrap();

        assert_eq!(flat["/NUM"], ConfigValue::UnsignedInteger(42));

        unsafe { std::env::remove_var("LAYERCONF_ENVTEST_NUM") };
    }
}
