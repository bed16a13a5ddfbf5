//! Host-supplied tab identifiers and the configured style resource.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a browser tab, unique for the tab's lifetime.
///
/// The host assigns these; the toggle never invents one.  On the wire the id
/// is a bare JSON integer (`"tabId": 7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

impl From<u32> for TabId {
    fn from(id: u32) -> Self {
        TabId(id)
    }
}

/// Opaque reference to the focus style sheet (a file path or host resource id).
///
/// The toggle never reads the sheet; it only hands the reference to the host's
/// style applicator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleResource(String);

impl StyleResource {
    /// Wraps a resource reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as passed to the host.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
