//! # focus-core
//!
//! Shared library for the tab focus toggle containing the domain types, the
//! page matcher, and the host event protocol.
//!
//! This crate has zero dependencies on async runtimes, host APIs, or I/O.
//!
//! # Architecture overview (for beginners)
//!
//! The focus toggle lets a user flip a browser tab between its normal layout
//! and a distraction-free "focus" layout with a single trigger (toolbar icon
//! or keyboard shortcut).  The host browser owns the tabs, the badge, and the
//! style injection; this workspace owns the decisions.
//!
//! This crate (`focus-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business types: the two-valued [`FocusState`], the
//!   host-supplied [`TabId`], the opaque [`StyleResource`], and the
//!   [`AllowedPrefixSet`] used by the page matcher to decide whether a trigger
//!   may act on a page at all.
//!
//! - **`protocol`** – The shape of events delivered by the host (install,
//!   trigger, tab closed) and the JSON codec that turns one line of host
//!   output into a typed [`HostEvent`].

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `focus_core::FocusState` instead of `focus_core::domain::focus_state::FocusState`.
pub use domain::focus_state::{FocusState, StateParseError};
pub use domain::page_match::{matches, AllowedPrefixSet, PrefixError};
pub use domain::tab::{StyleResource, TabId};
pub use protocol::codec::{decode_event, encode_event, ProtocolError};
pub use protocol::events::{HostEvent, TriggerEvent, TriggerSource};
