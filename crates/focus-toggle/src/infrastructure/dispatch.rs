//! Per-tab event dispatch.
//!
//! Host events arrive on one tokio `mpsc` channel.  The dispatcher fans them
//! out so that:
//!
//! - events for the same tab are handled strictly in arrival order, one at a
//!   time, by that tab's worker task;
//! - events for different tabs are handled concurrently;
//! - `Installed` is global and handled inline by the dispatcher itself.
//!
//! ```text
//! host events ──► EventDispatcher ──┬──► worker(tab#1) ──► ToggleFocusUseCase
//!                                   ├──► worker(tab#2) ──► ToggleFocusUseCase
//!                                   └──► handle_install (inline)
//! ```
//!
//! # Never blocking on one tab
//!
//! A style call may never resolve.  Each tab's queue is unbounded and the
//! dispatcher only ever does a non-blocking send, so a stuck tab piles up its
//! own events without holding back the host channel or any other tab.
//!
//! # Closed tabs and reused ids
//!
//! A worker is spawned on the first event for a tab and exits after it has
//! processed that tab's `TabClosed`.  Until it has, it is kept as the tab's
//! *retiring* worker: if the host reuses the id, the new worker first waits
//! for the retiring one, so the close still runs before anything that
//! arrived after it.
//!
//! Failures are logged and counted, never propagated: one bad trigger must
//! not stop the others.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use focus_core::{HostEvent, TabId, TriggerEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::toggle_focus::{ToggleFocusUseCase, ToggleOutcome};

/// Counters updated by the workers.
#[derive(Debug, Default)]
pub struct DispatchStats {
    toggled: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Triggers that changed a tab's state.
    pub toggled: u64,
    /// Triggers on pages outside the allow-list.
    pub skipped: u64,
    /// Triggers, installs, and closes that failed.
    pub failed: u64,
}

impl DispatchStats {
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            toggled: self.toggled.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    fn record(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Work item for a tab's worker.
#[derive(Debug)]
enum TabCommand {
    Trigger(TriggerEvent),
    Close,
}

struct TabWorker {
    tx: mpsc::UnboundedSender<TabCommand>,
    handle: JoinHandle<()>,
}

/// Fans host events out to per-tab workers.
pub struct EventDispatcher {
    use_case: Arc<ToggleFocusUseCase>,
    stats: Arc<DispatchStats>,
    workers: HashMap<TabId, TabWorker>,
    /// Workers that were sent `Close` and may still be running, by tab.
    retiring: HashMap<TabId, JoinHandle<()>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no tab workers yet.
    pub fn new(use_case: Arc<ToggleFocusUseCase>) -> Self {
        Self {
            use_case,
            stats: Arc::new(DispatchStats::default()),
            workers: HashMap::new(),
            retiring: HashMap::new(),
        }
    }

    /// Shared handle to the counters, readable while the dispatcher runs.
    pub fn stats(&self) -> Arc<DispatchStats> {
        Arc::clone(&self.stats)
    }

    /// Number of tabs with a live worker.
    pub fn active_tabs(&self) -> usize {
        self.workers.len()
    }

    /// Processes events until the channel closes, then drains every worker.
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> DispatchSummary {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
        self.shutdown().await
    }

    /// Routes one event.
    ///
    /// Only `Installed` is awaited here; tab events are queued without waiting.
    pub async fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Installed => {
                if let Err(e) = self.use_case.handle_install().await {
                    warn!("could not initialise focus indicator: {e}");
                    self.stats.record(&self.stats.failed);
                }
            }
            HostEvent::Trigger(trigger) => {
                let tab = trigger.tab_id;
                self.enqueue(tab, TabCommand::Trigger(trigger));
            }
            HostEvent::TabClosed { tab_id } => {
                self.enqueue(tab_id, TabCommand::Close);
                // Queued behind any pending triggers, so they finish first.
                if let Some(worker) = self.workers.remove(&tab_id) {
                    self.retiring.insert(tab_id, worker.handle);
                }
            }
        }
    }

    /// Drops every sender and waits for all workers to finish their queues.
    pub async fn shutdown(mut self) -> DispatchSummary {
        let mut handles: Vec<JoinHandle<()>> = self
            .workers
            .drain()
            .map(|(_, worker)| worker.handle)
            .collect();
        handles.extend(self.retiring.drain().map(|(_, handle)| handle));
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("tab worker ended abnormally: {e}");
            }
        }
        let summary = self.stats.summary();
        info!(
            toggled = summary.toggled,
            skipped = summary.skipped,
            failed = summary.failed,
            "dispatcher drained"
        );
        summary
    }

    fn enqueue(&mut self, tab: TabId, command: TabCommand) {
        let tx = self.worker_for(tab);
        if tx.send(command).is_err() {
            // Only happens if the worker panicked.
            warn!(%tab, "tab worker stopped; dropping event");
            self.workers.remove(&tab);
            self.stats.record(&self.stats.failed);
        }
    }

    fn worker_for(&mut self, tab: TabId) -> mpsc::UnboundedSender<TabCommand> {
        if let Some(worker) = self.workers.get(&tab) {
            return worker.tx.clone();
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let predecessor = self.retiring.remove(&tab);
        let handle = tokio::spawn(tab_worker(
            tab,
            Arc::clone(&self.use_case),
            Arc::clone(&self.stats),
            predecessor,
            rx,
        ));
        debug!(%tab, "spawned tab worker");
        self.workers.insert(
            tab,
            TabWorker {
                tx: tx.clone(),
                handle,
            },
        );
        tx
    }
}

/// Handles one tab's commands in order until closed.
///
/// `predecessor` is the retiring worker of an earlier tab with the same id;
/// nothing is handled until it has finished.
async fn tab_worker(
    tab: TabId,
    use_case: Arc<ToggleFocusUseCase>,
    stats: Arc<DispatchStats>,
    predecessor: Option<JoinHandle<()>>,
    mut commands: mpsc::UnboundedReceiver<TabCommand>,
) {
    if let Some(previous) = predecessor {
        if let Err(e) = previous.await {
            warn!(%tab, "previous tab worker ended abnormally: {e}");
        }
    }

    while let Some(command) = commands.recv().await {
        match command {
            TabCommand::Trigger(trigger) => match use_case.handle_trigger(&trigger).await {
                Ok(ToggleOutcome::Toggled { .. }) => stats.record(&stats.toggled),
                Ok(ToggleOutcome::Skipped) => stats.record(&stats.skipped),
                Err(e) => {
                    warn!(%tab, source = %trigger.source, "focus toggle failed; state unchanged: {e}");
                    stats.record(&stats.failed);
                }
            },
            TabCommand::Close => {
                if let Err(e) = use_case.handle_tab_closed(tab).await {
                    warn!(%tab, "could not drop focus state of closed tab: {e}");
                    stats.record(&stats.failed);
                }
                break;
            }
        }
    }
    debug!(%tab, "tab worker finished");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
