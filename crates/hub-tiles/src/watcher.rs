//! Package change events and the manifest-directory watcher.
//!
//! Uses tokio::sync::broadcast so every subscriber receives every event.
//! Lagging receivers skip old events; a skipped package event only costs a
//! redundant refresh on the consumer side.

use log::{debug, warn};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Broadcast channel capacity.
/// 64 is enough for burst handling (package churn during an update wave)
/// without memory bloat.
const CHANNEL_CAPACITY: usize = 64;

/// A discrete package change, scoped to the package identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackageEvent {
    Added(String),
    Removed(String),
    Changed(String),
    Replaced(String),
}

impl PackageEvent {
    pub fn package(&self) -> &str {
        match self {
            PackageEvent::Added(pkg)
            | PackageEvent::Removed(pkg)
            | PackageEvent::Changed(pkg)
            | PackageEvent::Replaced(pkg) => pkg,
        }
    }
}

/// Owned broadcast bus for package events. Cloning shares the channel.
#[derive(Clone)]
pub struct PackageEvents {
    tx: Sender<PackageEvent>,
}

impl PackageEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Send an event to all subscribers. Non-blocking; events with no
    /// subscribers are dropped.
    pub fn send(&self, event: PackageEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to the bus. The receiver sees all future events.
    pub fn subscribe(&self) -> Receiver<PackageEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PackageEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Watches manifest directories and translates filesystem changes on
/// `<package>.json` files into package events. Dropping the watcher stops
/// the watch.
pub struct PackageWatcher {
    _watcher: RecommendedWatcher,
}

impl PackageWatcher {
    pub fn spawn(dirs: &[PathBuf], events: &PackageEvents) -> notify::Result<Self> {
        let tx = events.tx.clone();
        let mut watcher =
            notify::recommended_watcher(move |result: notify::Result<Event>| match result {
                Ok(event) => forward_fs_event(&tx, &event),
                Err(e) => warn!("Manifest watch error: {}", e),
            })?;

        for dir in dirs {
            if dir.exists() {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
            }
        }

        Ok(Self { _watcher: watcher })
    }
}

fn forward_fs_event(tx: &Sender<PackageEvent>, event: &Event) {
    for path in &event.paths {
        let Some(package) = manifest_package(path) else {
            continue;
        };
        if let Some(package_event) = classify(&event.kind, package) {
            debug!("Package event: {:?}", package_event);
            let _ = tx.send(package_event);
        }
    }
}

/// Map a filesystem event kind onto the package event it implies.
fn classify(kind: &EventKind, package: String) -> Option<PackageEvent> {
    match kind {
        EventKind::Create(_) => Some(PackageEvent::Added(package)),
        EventKind::Remove(_) => Some(PackageEvent::Removed(package)),
        // A rename over an existing manifest is how package updates land.
        EventKind::Modify(ModifyKind::Name(_)) => Some(PackageEvent::Replaced(package)),
        EventKind::Modify(_) => Some(PackageEvent::Changed(package)),
        _ => None,
    }
}

/// Package name from a manifest path (`<package>.json`).
fn manifest_package(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str()).map(String::from)
}
