//! Type-erased configuration scalars and their conversions.
//!
//! Every leaf a source produces is a [`ConfigValue`]: a closed union of the
//! scalar kinds a flattened document can hold. Conversions to Rust primitives
//! go through [`FromConfigValue`], which drives the typed accessor surface
//! (`get_int`, `try_get_bool`, ...) on roots, providers, and sections.
//!
//! # Conversion Table
//!
//! | Stored kind | Numeric target | `bool` | `String` | Complex |
//! |-------------|----------------|--------|----------|---------|
//! | `Integer` / `UnsignedInteger` / `Float` | cast (checked range, fraction truncated toward zero) | error | error | real part |
//! | `String` | strict parse | strict parse | passthrough | strict parse |
//! | `Boolean` | error | passthrough | error | error |
//!
//! An `error` cell is a conversion failure; the `try_get_*` accessors
//! substitute the caller-supplied default in that case.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use num_complex::{Complex32, Complex64};
use num_traits::ToPrimitive;

/// The flattened mapping every source produces: canonical path to leaf
/// scalar. No key is a strict prefix of another value-bearing key.
pub type FlatMap = BTreeMap<String, ConfigValue>;

/// An immutable key/value pair used for bulk export.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValuePair {
    /// The canonical path.
    pub key: String,

    /// The stored scalar.
    pub value: ConfigValue,
}

impl KeyValuePair {
    /// Creates a new pair.
    pub fn new(key: impl Into<String>, value: ConfigValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

// ============================================================================
// Macros for reducing boilerplate
// ============================================================================

/// Generates `From<T>` implementations for ConfigValue
macro_rules! impl_from_integer {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(n: $t) -> Self {
                    ConfigValue::$variant(n as _)
                }
            }
        )+
    };
}

/// Generates `to_*` methods that use ToPrimitive
macro_rules! impl_to_primitive {
    ($($method:ident -> $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Converts to `", stringify!($t), "` if possible.")]
            pub fn $method(&self) -> Option<$t> {
                match self {
                    ConfigValue::Integer(n) => n.$method(),

                    ConfigValue::UnsignedInteger(n) => n.$method(),

                    ConfigValue::Float(f) => f.$method(),

                    ConfigValue::String(s) => s.parse().ok(),

                    ConfigValue::Boolean(_) => None,
                }
            }
        )+
    };
}

// ============================================================================
// ConfigValue Enum
// ============================================================================

/// A type-erased configuration scalar.
///
/// Nested structures never appear here: flattening reduces every document to
/// leaf scalars before storage, so arrays and maps exist only as path shapes
/// in the key space.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// A string value.
    String(String),

    /// A signed integer (stored as i64).
    Integer(i64),

    /// An unsigned integer (stored as u64).
    UnsignedInteger(u64),

    /// A floating-point value (stored as f64).
    Float(f64),

    /// A boolean value.
    Boolean(bool),
}

// ============================================================================
// Constructors
// ============================================================================

impl ConfigValue {
    /// Creates from a string with automatic type inference.
    ///
    /// Inference order: bool -> unsigned int -> signed int -> float -> string
    pub fn from_str_infer(s: &str) -> Self {
        // Boolean
        match s.to_ascii_lowercase().as_str() {
            "true" => return ConfigValue::Boolean(true),

            "false" => return ConfigValue::Boolean(false),

            _ => {}
        }

        // Unsigned integer
        if let Ok(n) = s.parse::<u64>() {
            return ConfigValue::UnsignedInteger(n);
        }

        // Signed integer (negative numbers)
        if let Ok(n) = s.parse::<i64>() {
            return ConfigValue::Integer(n);
        }

        // Float (contains decimal or exponent)
        if (s.contains('.') || s.contains('e') || s.contains('E'))
            && let Ok(f) = s.parse::<f64>()
        {
            return ConfigValue::Float(f);
        }

        // Default: string
        ConfigValue::String(s.to_string())
    }

    /// Imports a scalar `serde_json::Value` leaf.
    ///
    /// Returns `None` for nulls and for nested values (objects/arrays), which
    /// never reach storage; the flattener walks into them instead.
    pub fn from_json_leaf(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(ConfigValue::String(s.clone())),

            serde_json::Value::Bool(b) => Some(ConfigValue::Boolean(*b)),

            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Some(ConfigValue::UnsignedInteger(u))
                } else if let Some(i) = n.as_i64() {
                    Some(ConfigValue::Integer(i))
                } else {
                    n.as_f64().map(ConfigValue::Float)
                }
            }

            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }

    /// Short kind descriptor for diagnostics, e.g. `boolean` or `string`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::UnsignedInteger(_) => "unsigned integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Boolean(_) => "boolean",
        }
    }

    /// Kind plus rendered content, used in conversion error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} `{}`", self.kind_name(), self)
    }

    impl_to_primitive! {
        to_i32 -> i32,
        to_i64 -> i64,
        to_u8 -> u8,
        to_u32 -> u32,
        to_u64 -> u64,
        to_f32 -> f32,
        to_f64 -> f64,
    }

    /// Converts to `bool` if the stored kind allows it.
    ///
    /// Only booleans and parseable strings convert; numbers do not.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),

            ConfigValue::String(s) => s.parse().ok(),

            _ => None,
        }
    }

    /// Returns the stored string, or `None` for any other kind.
    ///
    /// Numbers and booleans are deliberately not rendered; a string-typed
    /// read of a non-string value is a conversion failure.
    pub fn to_string_strict(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),

            _ => None,
        }
    }
}

impl_from_integer! {
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    isize => Integer,
    u8 => UnsignedInteger,
    u16 => UnsignedInteger,
    u32 => UnsignedInteger,
    u64 => UnsignedInteger,
    usize => UnsignedInteger,
}

impl From<f32> for ConfigValue {
    fn from(f: f32) -> Self {
        ConfigValue::Float(f64::from(f))
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl Display for ConfigValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{s}"),
            ConfigValue::Integer(n) => write!(f, "{n}"),
            ConfigValue::UnsignedInteger(n) => write!(f, "{n}"),
            ConfigValue::Float(v) => write!(f, "{v}"),
            ConfigValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

// ============================================================================
// FromConfigValue
// ============================================================================

/// Conversion from a stored [`ConfigValue`] to a concrete primitive.
///
/// Implemented for every type the typed accessor surface exposes. `None`
/// means the stored kind or content cannot produce the target; the accessor
/// layer turns that into a conversion error carrying the key.
pub trait FromConfigValue: Sized {
    /// Target type name used in conversion diagnostics.
    const TYPE_NAME: &'static str;

    /// Attempts the conversion.
    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

macro_rules! impl_from_config_value {
    ($($t:ty => $method:ident),+ $(,)?) => {
        $(
            impl FromConfigValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_config_value(value: &ConfigValue) -> Option<Self> {
                    value.$method()
                }
            }
        )+
    };
}

impl_from_config_value! {
    i32 => to_i32,
    i64 => to_i64,
    u8 => to_u8,
    u32 => to_u32,
    u64 => to_u64,
    f32 => to_f32,
    f64 => to_f64,
    bool => to_bool,
    String => to_string_strict,
}

macro_rules! impl_from_config_value_complex {
    ($($t:ty => $ft:ty),+ $(,)?) => {
        $(
            impl FromConfigValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_config_value(value: &ConfigValue) -> Option<Self> {
                    match value {
                        ConfigValue::Integer(n) => {
                            n.to_f64().map(|f| Self::new(f as $ft, 0.0))
                        }

                        ConfigValue::UnsignedInteger(n) => {
                            n.to_f64().map(|f| Self::new(f as $ft, 0.0))
                        }

                        ConfigValue::Float(f) => Some(Self::new(*f as $ft, 0.0)),

                        ConfigValue::String(s) => s.parse().ok(),

                        ConfigValue::Boolean(_) => None,
                    }
                }
            }
        )+
    };
}

impl_from_config_value_complex! {
    Complex32 => f32,
    Complex64 => f64,
}
