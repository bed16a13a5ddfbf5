//! ToggleFocusUseCase: the per-tab focus mode state machine.
//!
//! This use case is the heart of the toggle.  On every trigger it decides
//! whether the page qualifies, flips the tab's recorded state, and makes the
//! rendered page agree with the record.
//!
//! # Transition (for one trigger)
//!
//! ```text
//! url not allow-listed ──► Skipped (no read, no style call, no write)
//!
//! prev = read(tab) ?? OFF
//! next = !prev
//! next == ON  ──► apply(tab, style)
//! next == OFF ──► reverse(tab, style)
//! write(tab, next)
//! ```
//!
//! The style call always completes before the write.  If it fails, nothing
//! is written and the tab stays recorded at `prev`.  If the write fails after
//! a successful style call, the inverse style call puts the page back so the
//! badge never shows a state that is not rendered.
//!
//! # Architecture
//!
//! This use case depends only on traits (`TabStateStore`, `StyleApplicator`)
//! and domain types from `focus-core`.  All host adapters are injected at
//! construction time, making the use case fully unit-testable.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use focus_core::{AllowedPrefixSet, FocusState, StyleResource, TabId, TriggerEvent};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::application::tab_locks::TabLocks;

// ── Port errors ───────────────────────────────────────────────────────────────

/// Failures of the host's per-tab state (badge) facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The host capability is unavailable or rejected the call.
    #[error("tab state store unavailable: {0}")]
    Unavailable(String),

    /// The badge holds text that is neither `ON` nor `OFF`.
    #[error("unrecognized badge text {text:?} on {tab}")]
    UnrecognizedBadge { tab: TabId, text: String },
}

/// Failures of the host's style injection facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The tab closed or navigated away during the call.
    #[error("{0} is no longer available")]
    TabGone(TabId),

    /// The style resource could not be loaded.
    #[error("style resource {0} could not be loaded")]
    ResourceUnavailable(StyleResource),

    /// Any other rejection reported by the host.
    #[error("host rejected style call: {0}")]
    Host(String),
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Per-tab focus state, backed by the host's badge text.
///
/// Writing a state is also what the user sees: there is no separate display
/// step, so the badge cannot drift from the record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabStateStore: Send + Sync {
    /// Returns the last state written for `tab`, or `None` if never written.
    async fn read(&self, tab: TabId) -> Result<Option<FocusState>, StoreError>;

    /// Records `state` for `tab`, replacing any previous value.
    async fn write(&self, tab: TabId, state: FocusState) -> Result<(), StoreError>;

    /// Sets the global (not tab-scoped) indicator.
    async fn write_default(&self, state: FocusState) -> Result<(), StoreError>;

    /// Drops everything recorded for a closed tab.
    async fn forget(&self, tab: TabId) -> Result<(), StoreError>;
}

/// Host capability that installs or removes a style sheet on a tab.
///
/// Not idempotent: applying twice may install the sheet twice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StyleApplicator: Send + Sync {
    /// Installs `resource` on `tab`.
    async fn apply(&self, tab: TabId, resource: &StyleResource) -> Result<(), StyleError>;

    /// Removes `resource` from `tab`.
    async fn reverse(&self, tab: TabId, resource: &StyleResource) -> Result<(), StyleError>;
}

// ── Use case errors and outcomes ──────────────────────────────────────────────

/// Why a trigger did not change anything.
///
/// In every case the recorded state of the tab is unchanged, so the next
/// trigger retries the same transition.
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("could not read focus state of {tab}: {source}")]
    StateRead {
        tab: TabId,
        #[source]
        source: StoreError,
    },

    #[error("could not switch {tab} to {target}: {source}")]
    StyleApplication {
        tab: TabId,
        target: FocusState,
        #[source]
        source: StyleError,
    },

    #[error("could not record {target} for {tab}: {source}")]
    StateWrite {
        tab: TabId,
        target: FocusState,
        #[source]
        source: StoreError,
    },
}

impl ToggleError {
    /// The tab the failed trigger targeted.
    pub fn tab(&self) -> TabId {
        match self {
            ToggleError::StateRead { tab, .. }
            | ToggleError::StyleApplication { tab, .. }
            | ToggleError::StateWrite { tab, .. } => *tab,
        }
    }
}

/// Result of a trigger that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The page is outside the allow-list; nothing was touched.
    Skipped,
    /// The tab moved from `from` to `to`.
    Toggled { from: FocusState, to: FocusState },
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleOutcome::Skipped => f.write_str("skipped"),
            ToggleOutcome::Toggled { from, to } => write!(f, "{from} -> {to}"),
        }
    }
}

// ── Use case ──────────────────────────────────────────────────────────────────

/// The Toggle Focus use case.
///
/// Both trigger sources (toolbar click and keyboard shortcut) call
/// [`handle_trigger`](Self::handle_trigger); the source is only logged.
pub struct ToggleFocusUseCase {
    prefixes: AllowedPrefixSet,
    style: StyleResource,
    store: Arc<dyn TabStateStore>,
    applicator: Arc<dyn StyleApplicator>,
    locks: TabLocks,
}

impl ToggleFocusUseCase {
    /// Creates a new use case instance.
    pub fn new(
        prefixes: AllowedPrefixSet,
        style: StyleResource,
        store: Arc<dyn TabStateStore>,
        applicator: Arc<dyn StyleApplicator>,
    ) -> Self {
        Self {
            prefixes,
            style,
            store,
            applicator,
            locks: TabLocks::new(),
        }
    }

    /// The configured style resource.
    pub fn style(&self) -> &StyleResource {
        &self.style
    }

    /// The configured allow-list.
    pub fn prefixes(&self) -> &AllowedPrefixSet {
        &self.prefixes
    }

    /// Resets the global indicator to `OFF` after installation.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the badge could not be written.
    pub async fn handle_install(&self) -> Result<(), StoreError> {
        self.store.write_default(FocusState::Off).await?;
        info!("installed; global focus indicator set to {}", FocusState::Off);
        Ok(())
    }

    /// Runs one transition for the trigger's tab.
    ///
    /// Triggers on the same tab are serialized: a second call waits until the
    /// first has written its state (or failed).
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError`] when the store read, the style call, or the
    /// store write fails.  The recorded state is unchanged in every case.
    pub async fn handle_trigger(&self, trigger: &TriggerEvent) -> Result<ToggleOutcome, ToggleError> {
        let tab = trigger.tab_id;

        if !self.prefixes.matches(&trigger.url) {
            debug!(%tab, url = %trigger.url, source = %trigger.source, "page not allow-listed; ignoring trigger");
            return Ok(ToggleOutcome::Skipped);
        }

        let _in_flight = self.locks.acquire(tab).await;

        let recorded = self
            .store
            .read(tab)
            .await
            .map_err(|source| ToggleError::StateRead { tab, source })?;
        let prev = FocusState::resolve(recorded);
        let next = prev.toggled();

        self.render(tab, next)
            .await
            .map_err(|source| ToggleError::StyleApplication {
                tab,
                target: next,
                source,
            })?;

        if let Err(source) = self.store.write(tab, next).await {
            self.compensate(tab, prev).await;
            return Err(ToggleError::StateWrite {
                tab,
                target: next,
                source,
            });
        }

        info!(%tab, source = %trigger.source, "focus mode {prev} -> {next}");
        Ok(ToggleOutcome::Toggled {
            from: prev,
            to: next,
        })
    }

    /// Forgets a closed tab.
    ///
    /// Waits for any in-flight trigger on the tab before pruning.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the entry could not be removed.
    pub async fn handle_tab_closed(&self, tab: TabId) -> Result<(), StoreError> {
        let in_flight = self.locks.acquire(tab).await;
        self.store.forget(tab).await?;
        self.locks.retire(tab, in_flight);
        debug!(%tab, "tab closed; focus state dropped");
        Ok(())
    }

    /// Makes the page show `state`.
    async fn render(&self, tab: TabId, state: FocusState) -> Result<(), StyleError> {
        match state {
            FocusState::On => self.applicator.apply(tab, &self.style).await,
            FocusState::Off => self.applicator.reverse(tab, &self.style).await,
        }
    }

    /// Puts the page back to `prev` after a failed write.
    async fn compensate(&self, tab: TabId, prev: FocusState) {
        if let Err(e) = self.render(tab, prev).await {
            error!(%tab, "could not restore page to {prev} after failed state write: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
