//! Application layer use cases for the focus toggle.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `focus-core`) and the infrastructure (host APIs,
//! channels, files).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal ("flip this tab
//!   into focus mode").
//! - **Depend on abstractions** (traits) rather than concrete host adapters,
//!   so the in-memory adapters used in tests and the harness can be swapped
//!   for real host bindings without changing this code.
//!
//! # Sub-modules
//!
//! - **`toggle_focus`** – The toggle state machine: page gate, read, flip,
//!   style call, write.  Also defines the `TabStateStore` and
//!   `StyleApplicator` ports.
//!
//! - **`tab_locks`** – Per-tab in-flight locks that keep two triggers on the
//!   same tab from interleaving between the read and the write.

pub mod tab_locks;
pub mod toggle_focus;

pub use tab_locks::TabLocks;
pub use toggle_focus::{
    StoreError, StyleApplicator, StyleError, TabStateStore, ToggleError, ToggleFocusUseCase,
    ToggleOutcome,
};
