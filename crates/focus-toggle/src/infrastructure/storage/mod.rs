//! Storage infrastructure: configuration file loading.
//!
//! The toggle keeps no state on disk (per-tab state lives only as long as the
//! tab).  The one file it reads is the TOML configuration declaring the
//! allowed URL prefixes, the style resource, and the keyboard shortcut.

pub mod config;
