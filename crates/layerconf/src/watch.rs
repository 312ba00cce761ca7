//! Live-update bindings: file watching and fixed-interval polling.
//!
//! Each live-capable provider runs one background thread per active binding.
//! File events from `notify` are funneled through a crossbeam channel into a
//! debounced select loop; on a relevant event the loop reloads the source,
//! diffs against the previous snapshot, and (only when the diff is
//! non-empty) swaps the snapshot, marks the change token, and enqueues the
//! [`ChangeSet`] for the registered callback. The callback runs on a
//! dedicated dispatcher thread, never inline with the OS notification, so
//! the watch loop is never blocked by callback execution.
//!
//! Sources exposing a [`poll_interval`](crate::ConfigSource::poll_interval)
//! instead of a watch path get the same treatment on a timer, which is how
//! backends without native notifications (remote key-value stores) stay
//! live.
//!
//! Dropping the [`WatchHandle`] stops the threads and releases the OS watch
//! handle; the provider does this on dispose.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded, select};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::changes::{ChangeCallback, ChangeSet};
use crate::error::{Error, Result};
use crate::provider::ProviderCore;

/// Debounce window for bursts of file events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Capacity of the notify event channel.
const EVENT_BUFFER: usize = 100;

/// Capacity of the change-set queue feeding the dispatcher.
const CHANGE_BUFFER: usize = 16;

/// Handle to a provider's background watch threads.
///
/// Dropping the handle signals the threads to stop and joins them.
pub(crate) struct WatchHandle {
    stop_tx: Sender<()>,
    threads: Vec<JoinHandle<()>>,
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());

        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Binds the live-update mechanism the source asks for, if any.
pub(crate) fn bind(core: &Arc<ProviderCore>) -> Result<Option<WatchHandle>> {
    if let Some(path) = core.source.watch_path() {
        return bind_file_watch(core.clone(), path).map(Some);
    }

    if let Some(interval) = core.source.poll_interval() {
        return bind_poll(core.clone(), interval).map(Some);
    }

    Ok(None)
}

/// Spawns the dispatcher thread when the source registered a callback.
///
/// Returns the queue producer; `None` when no callback exists (diffs are
/// then dropped after the snapshot swap, the token still marks).
fn spawn_dispatcher(
    callback: Option<Arc<ChangeCallback>>,
    threads: &mut Vec<JoinHandle<()>>,
) -> Option<Sender<ChangeSet>> {
    let callback = callback?;
    let (change_tx, change_rx) = bounded::<ChangeSet>(CHANGE_BUFFER);

    let handle = std::thread::Builder::new()
        .name("layerconf-dispatch".to_string())
        .spawn(move || {
            for change_set in change_rx.iter() {
                callback(&change_set);
            }
        })
        .ok()?;

    threads.push(handle);

    Some(change_tx)
}

fn bind_file_watch(core: Arc<ProviderCore>, path: PathBuf) -> Result<WatchHandle> {
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let (notify_tx, notify_rx) = bounded::<notify::Result<Event>>(EVENT_BUFFER);

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })
    .map_err(|e| Error::watch_init("failed to create file watcher", Some(e)))?;

    watch_target(&mut watcher, &path)?;

    // Track both the configured and the canonical path so events match for
    // symlinked or relatively-addressed files, and for files created after
    // startup.
    let mut watched: HashSet<PathBuf> = HashSet::new();
    watched.insert(path.clone());
    if let Ok(canonical) = path.canonicalize() {
        watched.insert(canonical);
    }

    let mut threads = Vec::new();
    let change_tx = spawn_dispatcher(core.source.change_callback(), &mut threads);

    let watch_thread = std::thread::Builder::new()
        .name("layerconf-watch".to_string())
        .spawn(move || {
            watch_loop(&core, &stop_rx, &notify_rx, change_tx.as_ref(), &watched, watcher);
        })
        .map_err(|e| Error::watch_init(format!("failed to spawn watcher thread: {e}"), None))?;

    threads.push(watch_thread);

    Ok(WatchHandle { stop_tx, threads })
}

/// Watches the file itself, or its parent directory when the file does not
/// exist yet.
fn watch_target(watcher: &mut RecommendedWatcher, path: &Path) -> Result<()> {
    let target = if path.exists() {
        path.to_path_buf()
    } else if let Some(parent) = path.parent().filter(|p| p.exists()) {
        parent.to_path_buf()
    } else {
        return Err(Error::watch_path(
            path,
            "neither file nor parent directory exists",
        ));
    };

    watcher
        .watch(&target, RecursiveMode::NonRecursive)
        .map_err(|e| Error::watch_path(path, format!("failed to watch: {e}")))
}

fn watch_loop(
    core: &Arc<ProviderCore>,
    stop_rx: &Receiver<()>,
    notify_rx: &Receiver<notify::Result<Event>>,
    change_tx: Option<&Sender<ChangeSet>>,
    watched: &HashSet<PathBuf>,
    _watcher: RecommendedWatcher, // Keep watcher alive
) {
    let mut pending = false;
    let mut last_event = Instant::now();

    loop {
        select! {
            recv(stop_rx) -> _ => break,

            recv(notify_rx) -> event_result => {
                match event_result {
                    Ok(Ok(event)) if is_relevant(&event, watched) => {
                        pending = true;
                        last_event = Instant::now();
                    }

                    Ok(_) => {}

                    // Watcher gone; nothing left to observe.
                    Err(_) => break,
                }
            }

            // Debounce timeout - process pending reload
            default(DEBOUNCE) => {
                if pending && last_event.elapsed() >= DEBOUNCE {
                    pending = false;

                    if let Some(diff) = core.reload_and_diff()
                        && let Some(tx) = change_tx
                    {
                        let _ = tx.send(diff);
                    }
                }
            }
        }
    }
}

/// Does this notify event touch a watched path?
fn is_relevant(event: &Event, watched: &HashSet<PathBuf>) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    event.paths.iter().any(|p| {
        watched.contains(p) || p.canonicalize().is_ok_and(|c| watched.contains(&c))
    })
}

fn bind_poll(core: Arc<ProviderCore>, interval: Duration) -> Result<WatchHandle> {
    let (stop_tx, stop_rx) = bounded::<()>(1);

    let mut threads = Vec::new();
    let change_tx = spawn_dispatcher(core.source.change_callback(), &mut threads);

    let poll_thread = std::thread::Builder::new()
        .name("layerconf-poll".to_string())
        .spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                        if let Some(diff) = core.reload_and_diff()
                            && let Some(tx) = change_tx.as_ref()
                        {
                            let _ = tx.send(diff);
                        }
                    }

                    // Stop requested or handle dropped.
                    _ => break,
                }
            }
        })
        .map_err(|e| Error::watch_init(format!("failed to spawn poll thread: {e}"), None))?;

    threads.push(poll_thread);

    Ok(WatchHandle { stop_tx, threads })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_filters_by_path_and_kind() {
        let watched: HashSet<PathBuf> = [PathBuf::from("/tmp/config.json")].into();

        let modify = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/tmp/config.json"));
        assert!(is_relevant(&modify, &watched));

        let other_path = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/tmp/other.json"));
        assert!(!is_relevant(&other_path, &watched));

        let access = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(PathBuf::from("/tmp/config.json"));
        assert!(!is_relevant(&access, &watched));
    }
}
