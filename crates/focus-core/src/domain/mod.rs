//! Domain entities for the tab focus toggle.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a Clean Architecture codebase is the **domain**.
//! Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from host APIs, async runtimes, or storage drivers.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the rules are small but strict: a tab is either in focus mode or not,
//! "never seen" counts as "not", and only pages under an allow-listed URL
//! prefix are ever touched.

/// The two-valued per-tab mode and its badge text encoding.
pub mod focus_state;

/// The page matcher gate that runs ahead of the state machine.
pub mod page_match;

/// Host-supplied identifiers and configured resources.
pub mod tab;
