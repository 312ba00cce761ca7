//! The unified configuration query surface.
//!
//! [`Config`] is implemented by [`ConfigRoot`](crate::ConfigRoot),
//! [`ConfigProvider`](crate::ConfigProvider), and the section views, so the
//! same typed accessors work at every level:
//!
//! ```rust
//! use layerconf::{Config, ConfigBuilder};
//! use layerconf::sources::MemorySource;
//!
//! let root = ConfigBuilder::new()
//!     .add(MemorySource::new().with("db/port", 5432u16))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(root.get_int("/db/port").unwrap(), 5432);
//! assert_eq!(root.try_get_int("/db/missing", 7), 7);
//!
//! let db = root.section("/db");
//! assert_eq!(db.get_int64("port").unwrap(), 5432);
//! ```
//!
//! The `get_*` family surfaces errors ([`KeyNotFound`](crate::Error::KeyNotFound),
//! [`Conversion`](crate::Error::Conversion), ...); the `try_get_*` family
//! swallows every error and substitutes the caller-supplied default, which is
//! the recommended default-safe access pattern.

use num_complex::{Complex32, Complex64};

use crate::error::{Error, Result};
use crate::value::{ConfigValue, FromConfigValue, KeyValuePair};

macro_rules! typed_getters {
    ($($get:ident / $try_get:ident -> $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Typed getter for `", stringify!($t), "`.")]
            ///
            /// # Errors
            ///
            /// Fails with `InvalidArgument` for an empty key, `KeyNotFound`
            /// for an absent key, and `Conversion` when the stored value
            /// cannot produce the target type.
            fn $get(&self, key: &str) -> Result<$t> {
                self.get_as::<$t>(key)
            }

            #[doc = concat!("Defaulting getter for `", stringify!($t), "`; swallows all errors.")]
            fn $try_get(&self, key: &str, default: $t) -> $t {
                self.try_get_as::<$t>(key, default)
            }
        )+
    };
}

/// Point queries, bulk export, and typed access over a flattened key space.
///
/// Point queries never fail: absence is `None`, never an error.
pub trait Config {
    /// Returns the value at `key`, or `None` when absent or the key is
    /// empty.
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// Writes `value` at `key`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` for an empty key, and with
    /// `NoProvider` when there is nowhere to write.
    fn set(&self, key: &str, value: ConfigValue) -> Result<()>;

    /// All keys visible through this surface.
    fn keys(&self) -> Vec<String>;

    /// All values visible through this surface.
    fn values(&self) -> Vec<ConfigValue>;

    /// Bulk export as key/value pairs.
    fn to_key_value_pairs(&self) -> Vec<KeyValuePair>;

    /// `true` when no key/value pair is visible.
    fn is_empty(&self) -> bool;

    /// `true` when `key` holds a value.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value at `key`, or `default` when absent.
    fn try_get(&self, key: &str, default: ConfigValue) -> ConfigValue {
        self.get(key).unwrap_or(default)
    }

    /// Generic typed getter driving the whole `get_*` family.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, `KeyNotFound` when absent,
    /// `Conversion` when the stored kind or content cannot produce `T`.
    fn get_as<T: FromConfigValue>(&self, key: &str) -> Result<T> {
        if key.is_empty() {
            return Err(Error::invalid_argument("key"));
        }

        let value = self.get(key).ok_or_else(|| Error::key_not_found(key))?;

        T::from_config_value(&value)
            .ok_or_else(|| Error::conversion(key, T::TYPE_NAME, value.describe()))
    }

    /// Generic defaulting getter; swallows all error kinds.
    fn try_get_as<T: FromConfigValue>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    typed_getters! {
        get_int / try_get_int -> i32,
        get_int64 / try_get_int64 -> i64,
        get_uint / try_get_uint -> u32,
        get_uint64 / try_get_uint64 -> u64,
        get_float32 / try_get_float32 -> f32,
        get_float64 / try_get_float64 -> f64,
        get_byte / try_get_byte -> u8,
        get_bool / try_get_bool -> bool,
        get_string / try_get_string -> String,
        get_complex64 / try_get_complex64 -> Complex32,
        get_complex128 / try_get_complex128 -> Complex64,
    }
}
