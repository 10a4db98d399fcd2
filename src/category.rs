//! Category refresh coordination.
//!
//! Keeps the tile registry in sync with package state and tells listeners
//! which dashboard categories need re-rendering. Reloads run on a single
//! background worker in acceptance order; results are dispatched back on
//! the owner's context from `pump`.

use crossbeam_channel::{Receiver as QueueReceiver, Sender as QueueSender, unbounded};
use hub_tiles::{ComponentName, PackageEvent, PackageEvents, Tile, TileRegistry};
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::thread;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Observer of category changes.
pub trait CategoryListener {
    /// `changed` is the set of categories that have to be refreshed, or
    /// `None` to force refreshing all of them.
    fn on_categories_changed(&self, changed: Option<&HashSet<String>>);
}

/// At most one reload in flight plus one queued behind it. A third request
/// adds no information: the queued reload re-reads the full registry when
/// it runs, so it observes whatever state the dropped request reacted to.
const MAX_PENDING_RELOADS: u8 = 2;

struct ReloadRequest {
    from_broadcast: bool,
}

struct ReloadOutcome {
    changed: Option<HashSet<String>>,
}

/// Coordinates registry reloads against package churn.
///
/// Owned and driven by a single-threaded context: the owner calls `start`
/// and `stop` around its visible lifetime and `pump` from its own event
/// loop. Only the reload itself runs off-thread.
pub struct CategoryCoordinator {
    registry: Arc<TileRegistry>,
    denylist: Arc<RwLock<HashSet<ComponentName>>>,
    events: PackageEvents,
    package_rx: Option<broadcast::Receiver<PackageEvent>>,
    listeners: Vec<Arc<dyn CategoryListener>>,
    task_count: u8,
    // The owner eagerly loads the registry when it builds the coordinator,
    // so the first activation would only repeat that work. Owners that do
    // not pre-load should call request_refresh() after the first start().
    first_start: bool,
    request_tx: QueueSender<ReloadRequest>,
    outcome_rx: QueueReceiver<ReloadOutcome>,
}

impl CategoryCoordinator {
    /// Create the coordinator and spawn its reload worker. The denylist is
    /// owned by the caller and shared by handle; only the owner's thread
    /// may write it (via `add_to_denylist`/`remove_from_denylist`).
    pub fn new(
        registry: Arc<TileRegistry>,
        denylist: Arc<RwLock<HashSet<ComponentName>>>,
        events: &PackageEvents,
    ) -> Self {
        let (request_tx, request_rx) = unbounded::<ReloadRequest>();
        let (outcome_tx, outcome_rx) = unbounded::<ReloadOutcome>();

        let worker_registry = Arc::clone(&registry);
        let worker_denylist = Arc::clone(&denylist);
        thread::spawn(move || {
            reload_worker(worker_registry, worker_denylist, request_rx, outcome_tx);
        });

        Self {
            registry,
            denylist,
            events: events.clone(),
            package_rx: None,
            listeners: Vec::new(),
            task_count: 0,
            first_start: true,
            request_tx,
            outcome_rx,
        }
    }

    /// Begin observing package events. The very first activation after
    /// construction skips the reload; every later activation submits a
    /// full refresh to catch anything missed while stopped. Calling
    /// `start` while started replaces the subscription.
    pub fn start(&mut self) {
        self.package_rx = Some(self.events.subscribe());
        if self.first_start {
            self.first_start = false;
            return;
        }
        self.submit(false);
    }

    /// Stop observing package events. No-op when not started. An accepted
    /// reload still completes and is still dispatched from `pump`.
    pub fn stop(&mut self) {
        self.package_rx = None;
    }

    pub fn is_started(&self) -> bool {
        self.package_rx.is_some()
    }

    /// Explicit full refresh: listeners will be told to refresh everything.
    pub fn request_refresh(&mut self) {
        self.submit(false);
    }

    pub fn add_listener(&mut self, listener: Arc<dyn CategoryListener>) {
        self.listeners.push(listener);
    }

    /// Remove a previously added listener. Unknown listeners are a no-op.
    pub fn remove_listener(&mut self, listener: &Arc<dyn CategoryListener>) {
        if let Some(pos) = self
            .listeners
            .iter()
            .position(|l| Arc::ptr_eq(l, listener))
        {
            self.listeners.remove(pos);
        }
    }

    /// Provisionally hide a component until a reload confirms its disabled
    /// state. Consumed by the next reload; idempotent.
    pub fn add_to_denylist(&mut self, component: ComponentName) {
        self.denylist.write().unwrap().insert(component);
    }

    pub fn remove_from_denylist(&mut self, component: &ComponentName) {
        self.denylist.write().unwrap().remove(component);
    }

    /// Reloads accepted but not yet dispatched.
    pub fn pending_reloads(&self) -> u8 {
        self.task_count
    }

    /// Drain pending package events and completed reloads. Call from the
    /// owner's own single-threaded context; listeners are invoked here.
    pub fn pump(&mut self) {
        self.drain_package_events();
        self.drain_outcomes();
    }

    fn drain_package_events(&mut self) {
        let mut triggered = 0u32;
        if let Some(rx) = self.package_rx.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(event) => {
                        debug!("Package {} changed, scheduling refresh", event.package());
                        triggered += 1;
                    }
                    // Skipped events still mean "something changed".
                    Err(TryRecvError::Lagged(missed)) => {
                        debug!("Lagged behind {} package events", missed);
                        triggered += 1;
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        for _ in 0..triggered {
            self.submit(true);
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.task_count = self.task_count.saturating_sub(1);
            match &outcome.changed {
                Some(changed) if changed.is_empty() => {
                    debug!("Reload produced no visible change");
                }
                changed => self.notify_listeners(changed.as_ref()),
            }
        }
    }

    fn submit(&mut self, from_broadcast: bool) {
        if self.task_count >= MAX_PENDING_RELOADS {
            debug!(
                "Dropping refresh request, {} reloads already pending",
                self.task_count
            );
            return;
        }
        self.task_count += 1;
        // The worker holds its receiver for the coordinator's lifetime.
        let _ = self.request_tx.send(ReloadRequest { from_broadcast });
    }

    fn notify_listeners(&self, changed: Option<&HashSet<String>>) {
        for listener in &self.listeners {
            listener.on_categories_changed(changed);
        }
    }
}

/// Processes reload requests strictly in acceptance order. Exits when the
/// coordinator drops either channel end.
fn reload_worker(
    registry: Arc<TileRegistry>,
    denylist: Arc<RwLock<HashSet<ComponentName>>>,
    requests: QueueReceiver<ReloadRequest>,
    outcomes: QueueSender<ReloadOutcome>,
) {
    for request in requests.iter() {
        let previous = registry.tile_by_component_map();
        registry.reload();
        let denied = denylist.read().unwrap().clone();
        registry.apply_denylist(&denied);

        let changed = if request.from_broadcast {
            Some(changed_categories(
                &previous,
                &registry.tile_by_component_map(),
            ))
        } else {
            // No well-defined baseline for an explicit refresh; have
            // listeners refresh everything.
            None
        };

        if outcomes.send(ReloadOutcome { changed }).is_err() {
            return;
        }
    }
}

/// Compute which categories changed between two snapshots: additions and
/// title/summary edits mark the current tile's category, removals mark the
/// previous tile's category. May legitimately be empty.
pub fn changed_categories(
    previous: &HashMap<ComponentName, Tile>,
    current: &HashMap<ComponentName, Tile>,
) -> HashSet<String> {
    let mut changed = HashSet::new();

    for (component, tile) in current {
        match previous.get(component) {
            None => {
                info!("Tile added: {}", component);
                changed.insert(tile.category.clone());
            }
            Some(previous_tile) => {
                if tile.title != previous_tile.title || tile.summary != previous_tile.summary {
                    info!("Tile changed: {}", component);
                    changed.insert(tile.category.clone());
                }
            }
        }
    }

    for (component, tile) in previous {
        if !current.contains_key(component) {
            info!("Tile removed: {}", component);
            changed.insert(tile.category.clone());
        }
    }

    changed
}
