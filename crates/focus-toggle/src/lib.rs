//! focus-toggle library crate.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host browser (install / trigger / tab-closed events)
//!         ↓
//! [focus-toggle]
//!   ├── application/      ToggleFocusUseCase + its ports
//!   │                     (TabStateStore, StyleApplicator), per-tab locks
//!   └── infrastructure/
//!         ├── dispatch/       per-tab worker queues (tokio mpsc)
//!         ├── event_source/   JSON-lines host events → channel
//!         ├── badge_store/    in-memory badge text = tab state
//!         ├── style_injector/ in-memory style sheet injection
//!         └── storage/        TOML configuration
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `focus-core` and its own port traits only.
//! - `infrastructure` implements the ports and owns every tokio task.

/// Application layer: the toggle state machine and its ports.
pub mod application;

/// Infrastructure layer: host adapters, dispatch, and configuration.
pub mod infrastructure;
