//! Change detection between configuration snapshots.
//!
//! [`ChangeSet::diff`] compares a freshly loaded flattened mapping against
//! the previous one and records every created, removed, or modified key.
//! Providers use the result to suppress no-op reloads: a live update whose
//! diff is empty never reaches the registered callback.

use std::fmt::{self, Display, Formatter};

use crate::value::{ConfigValue, FlatMap};

/// Callback invoked with the diff of a live reload.
///
/// Dispatched from the watch machinery through an explicit queue, never
/// inline with the OS notification.
pub type ChangeCallback = dyn Fn(&ChangeSet) + Send + Sync;

/// How a key differs between two snapshots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChangeMode {
    /// Key present only in the new snapshot.
    Created,

    /// Key present only in the old snapshot.
    Removed,

    /// Key present in both with unequal values.
    Modified,
}

impl Display for ChangeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChangeMode::Created => write!(f, "created"),
            ChangeMode::Removed => write!(f, "removed"),
            ChangeMode::Modified => write!(f, "modified"),
        }
    }
}

/// One changed key with its values on both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    /// The canonical path that changed.
    pub key: String,

    /// The kind of change.
    pub mode: ChangeMode,

    /// Value before the change; `None` for created keys.
    pub prev: Option<ConfigValue>,

    /// Value after the change; `None` for removed keys.
    pub current: Option<ConfigValue>,
}

impl Change {
    fn new(
        key: impl Into<String>,
        mode: ChangeMode,
        prev: Option<ConfigValue>,
        current: Option<ConfigValue>,
    ) -> Self {
        Self {
            key: key.into(),
            mode,
            prev,
            current,
        }
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let render = |v: &Option<ConfigValue>| match v {
            Some(value) => value.to_string(),
            None => "<none>".to_string(),
        };

        write!(
            f,
            "[{}] key: {}, prev: {}, current: {}",
            self.mode,
            self.key,
            render(&self.prev),
            render(&self.current),
        )
    }
}

/// The full diff between two snapshots, ordered by key.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// An empty change set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Computes the diff from `previous` to `current`.
    ///
    /// Keys only in `current` are [`Created`](ChangeMode::Created), keys only
    /// in `previous` are [`Removed`](ChangeMode::Removed), keys in both with
    /// unequal values are [`Modified`](ChangeMode::Modified). Keys with equal
    /// values produce no record.
    #[must_use]
    pub fn diff(current: &FlatMap, previous: &FlatMap) -> Self {
        let mut changes = Vec::new();

        for (key, value) in current {
            match previous.get(key) {
                None => {
                    changes.push(Change::new(
                        key,
                        ChangeMode::Created,
                        None,
                        Some(value.clone()),
                    ));
                }

                Some(prev) if prev != value => {
                    changes.push(Change::new(
                        key,
                        ChangeMode::Modified,
                        Some(prev.clone()),
                        Some(value.clone()),
                    ));
                }

                Some(_) => {}
            }
        }

        for (key, value) in previous {
            if !current.contains_key(key) {
                changes.push(Change::new(
                    key,
                    ChangeMode::Removed,
                    Some(value.clone()),
                    None,
                ));
            }
        }

        changes.sort_by(|a, b| a.key.cmp(&b.key));

        Self { changes }
    }

    /// Number of changed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// `true` when the two snapshots were equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The change records, ordered by key.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }
}

impl Display for ChangeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{change}")?;
        }

        Ok(())
    }
}
