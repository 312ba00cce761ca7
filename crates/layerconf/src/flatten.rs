//! Flattening nested documents into the canonical key space.
//!
//! Every format funnels through [`serde_json::Value`] (TOML and YAML are
//! converted first), then [`flatten`] walks the tree depth-first: object
//! members contribute `parent/key`, array elements contribute
//! `parent/$index`, scalars terminate the walk and are stored at the
//! current path. Nulls are dropped.
//!
//! ```rust
//! use layerconf::flatten::flatten;
//! use layerconf::ConfigValue;
//!
//! let doc = serde_json::json!({"db": {"port": 5432, "replicas": ["a", "b"]}});
//! let flat = flatten(&doc);
//!
//! assert_eq!(flat["/db/port"], ConfigValue::UnsignedInteger(5432));
//! assert_eq!(flat["/db/replicas/$0"], ConfigValue::String("a".into()));
//! assert_eq!(flat["/db/replicas/$1"], ConfigValue::String("b".into()));
//! ```

use serde_json::Value;

use crate::path::{self, ROOT_PATH};
use crate::value::{ConfigValue, FlatMap};

/// Flattens a nested document into a canonical path→scalar mapping.
///
/// The resulting map holds leaves only: no key is a strict prefix of another
/// value-bearing key. A top-level scalar document is stored at the root path.
#[must_use]
pub fn flatten(document: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    walk(document, "", &mut out);
    out
}

fn walk(value: &Value, current: &str, out: &mut FlatMap) {
    match value {
        Value::Object(members) => {
            for (key, child) in members {
                let child_path = path::combine([current, key.as_str()]);
                walk(child, &child_path, out);
            }
        }

        Value::Array(elements) => {
            for (idx, child) in elements.iter().enumerate() {
                let child_path = path::array_index_path(current, idx);
                walk(child, &child_path, out);
            }
        }

        Value::Null => {}

        leaf => {
            if let Some(scalar) = ConfigValue::from_json_leaf(leaf) {
                let key = if current.is_empty() {
                    ROOT_PATH.to_string()
                } else {
                    current.to_string()
                };

                out.insert(key, scalar);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_maps_flatten_to_slash_paths() {
        let flat = flatten(&json!({"db": {"host": "localhost", "port": 5432}}));

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["/db/host"], ConfigValue::String("localhost".into()));
        assert_eq!(flat["/db/port"], ConfigValue::UnsignedInteger(5432));
    }

    #[test]
    fn arrays_flatten_to_marker_indices() {
        let flat = flatten(&json!({"servers": [{"name": "a"}, {"name": "b"}]}));

        assert_eq!(flat["/servers/$0/name"], ConfigValue::String("a".into()));
        assert_eq!(flat["/servers/$1/name"], ConfigValue::String("b".into()));
    }

    #[test]
    fn top_level_array() {
        let flat = flatten(&json!(["x", "y"]));

        assert_eq!(flat["/$0"], ConfigValue::String("x".into()));
        assert_eq!(flat["/$1"], ConfigValue::String("y".into()));
    }

    #[test]
    fn nulls_are_dropped() {
        let flat = flatten(&json!({"a": null, "b": 1}));

        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("/b"));
    }

    #[test]
    fn leaves_only_invariant() {
        let flat = flatten(&json!({"a": {"b": {"c": 1}}, "d": [2, 3]}));

        let keys: Vec<&String> = flat.keys().collect();

        for key in &keys {
            for other in &keys {
                if key != other {
                    assert!(
                        !other.starts_with(&format!("{key}/")),
                        "{key} is a strict prefix of {other}"
                    );
                }
            }
        }
    }

    #[test]
    fn top_level_scalar_lands_at_root() {
        let flat = flatten(&json!(42));

        assert_eq!(flat["/"], ConfigValue::UnsignedInteger(42));
    }

    #[test]
    fn empty_object_flattens_to_nothing() {
        assert!(flatten(&json!({})).is_empty());
    }
}
