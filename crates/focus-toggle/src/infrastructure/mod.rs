//! Infrastructure layer for the focus toggle.
//!
//! Contains the host-facing adapters, the event dispatch machinery, and
//! configuration loading.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `focus_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`badge_store`** – `TabStateStore` backed by per-tab badge text, the
//!   same place the user sees the state.
//!
//! - **`style_injector`** – `StyleApplicator` that keeps the installed sheets
//!   per tab in memory; stands in for the host's style insertion API.
//!
//! - **`dispatch`** – Per-tab worker queues that serialize each tab's events
//!   while letting different tabs run concurrently.
//!
//! - **`event_source`** – Reads JSON-lines host events and feeds the dispatcher;
//!   `run_session` runs one pump-plus-dispatcher session to completion.
//!
//! - **`storage`** – TOML configuration file.

pub mod badge_store;
pub mod dispatch;
pub mod event_source;
pub mod storage;
pub mod style_injector;

pub use badge_store::BadgeStateStore;
pub use dispatch::{DispatchSummary, EventDispatcher};
pub use event_source::{pump_events, run_session, PumpSummary, SessionReport};
pub use style_injector::InMemoryStyleInjector;
