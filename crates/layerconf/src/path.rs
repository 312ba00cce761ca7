//! Canonical path handling for flattened configuration keys.
//!
//! Every key in a flattened configuration is a canonical path: it starts with
//! the root delimiter (`/`), segments are joined by the same delimiter, and an
//! array element at index `i` under a path `P` is addressed as `P/$i`. The
//! functions in this module are the only place path syntax is interpreted;
//! providers store and compare keys as plain strings.
//!
//! # Canonical Form
//!
//! ```rust
//! use layerconf::path;
//!
//! assert_eq!(path::combine(["db", "port"]), "/db/port");
//! assert_eq!(path::combine(["/", "/db/", "/port"]), "/db/port");
//! assert_eq!(path::section_key("/db/port"), "port");
//! assert_eq!(path::parent_path("/db/port"), "/db");
//! assert_eq!(path::array_index_path("/servers", 2), "/servers/$2");
//! ```
//!
//! Arrays are a naming convention over the flat key space rather than a
//! distinct value kind: a path is array-shaped exactly when a `$0` child
//! exists. This lets JSON arrays, YAML sequences, and env-var groups all
//! share one lookup mechanism.

/// Delimiter between path segments.
pub const KEY_DELIMITER: char = '/';

/// The root path, a single delimiter.
pub const ROOT_PATH: &str = "/";

/// Marker prefixing a numeric array index segment.
pub const ARRAY_MARKER: char = '$';

/// Joins path segments into one canonical path.
///
/// Empty segments are dropped and leading/trailing delimiters inside a
/// segment are collapsed, so `combine(["/", "/test/", "/value"])` and
/// `combine(["test", "value"])` both produce `/test/value`. When every
/// segment is empty (or none are given) the result is [`ROOT_PATH`].
#[must_use]
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();

    for segment in segments {
        let trimmed = segment.as_ref().trim_matches(KEY_DELIMITER);

        if trimmed.is_empty() {
            continue;
        }

        path.push(KEY_DELIMITER);
        path.push_str(trimmed);
    }

    if path.is_empty() {
        return ROOT_PATH.to_string();
    }

    path
}

/// Returns the last segment of a path.
///
/// The whole path is returned when it contains no delimiter, and the root
/// path maps to itself.
#[must_use]
pub fn section_key(path: &str) -> &str {
    if path == ROOT_PATH {
        return ROOT_PATH;
    }

    match path.rfind(KEY_DELIMITER) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Returns the path with its last segment removed.
///
/// Paths whose only delimiter is the leading one (e.g. `/a`), and paths with
/// no delimiter at all, have the root as parent. The empty string and the
/// root path map to themselves.
#[must_use]
pub fn parent_path(path: &str) -> &str {
    if path.is_empty() || path == ROOT_PATH {
        return path;
    }

    match path.rfind(KEY_DELIMITER) {
        Some(0) | None => ROOT_PATH,
        Some(idx) => &path[..idx],
    }
}

/// ASCII case-insensitive prefix test: does `key` live under `path`?
///
/// This is the sole membership predicate for sections; keys are stored
/// case-preserving but matched case-insensitively.
#[must_use]
pub fn has_path_in_key(path: &str, key: &str) -> bool {
    key.get(..path.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(path))
}

/// Filters `keys` down to the ones under `base`.
///
/// The root path owns every key.
pub fn child_keys<'a, I>(base: &str, keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    if base == ROOT_PATH {
        return keys.into_iter().cloned().collect();
    }

    keys.into_iter()
        .filter(|k| has_path_in_key(base, k))
        .cloned()
        .collect()
}

/// Returns `true` iff `segment` is the array marker followed by a valid
/// non-negative integer.
#[must_use]
pub fn is_array_index(segment: &str) -> bool {
    segment
        .strip_prefix(ARRAY_MARKER)
        .is_some_and(|rest| rest.parse::<u64>().is_ok())
}

/// Renders an array index segment, e.g. `$3`.
#[must_use]
pub fn array_index(idx: usize) -> String {
    format!("{ARRAY_MARKER}{idx}")
}

/// Builds the canonical path of the element at `idx` under `path`.
#[must_use]
pub fn array_index_path(path: &str, idx: usize) -> String {
    combine([path, array_index(idx).as_str()])
}

/// Returns `true` iff `path` is array-shaped in the given key set.
///
/// Array-ness is defined by presence of an index-zero child, not by any
/// source-format typing.
#[must_use]
pub fn is_array_path<'a, I>(path: &str, keys: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let zero = array_index_path(path, 0);

    keys.into_iter().any(|k| has_path_in_key(&zero, k))
}

/// Computes the logical length of the array at `path`: one past the highest
/// index found in `keys`, or `-1` when no indexed child exists.
///
/// The length is always recomputed from the live key set, never cached.
#[must_use]
pub fn array_len<'a, I>(path: &str, keys: I) -> i64
where
    I: IntoIterator<Item = &'a String>,
{
    let prefix = combine([path, ARRAY_MARKER.to_string().as_str()]);
    let mut max_index: Option<u64> = None;

    for key in keys {
        if !has_path_in_key(&prefix, key) {
            continue;
        }

        let Some(rest) = key.get(prefix.len()..) else {
            continue;
        };

        let digits = rest
            .split(KEY_DELIMITER)
            .next()
            .unwrap_or(rest);

        if let Ok(idx) = digits.parse::<u64>() {
            max_index = Some(max_index.map_or(idx, |m| m.max(idx)));
        }
    }

    match max_index {
        Some(m) => m as i64 + 1,
        None => -1,
    }
}
