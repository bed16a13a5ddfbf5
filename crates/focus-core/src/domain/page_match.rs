//! Page matcher: the gate in front of the toggle state machine.
//!
//! A trigger only acts on pages whose URL starts with one of the configured
//! prefixes.  Everything else is a silent no-op, which keeps the toggle from
//! styling (or recording state for) arbitrary pages.
//!
//! # Matching rules
//!
//! - Plain byte-prefix comparison (`str::starts_with`), case-sensitive.
//! - A URL matches if *any* prefix matches; order only affects how soon the
//!   scan short-circuits, never the result.
//! - Malformed URLs are not an error.  They simply fail to match.
//!
//! # Example
//!
//! ```rust
//! use focus_core::AllowedPrefixSet;
//!
//! let prefixes = AllowedPrefixSet::new([
//!     "https://developer.chrome.com/docs/extensions",
//!     "https://developer.chrome.com/docs/webstore",
//! ])
//! .unwrap();
//!
//! assert!(prefixes.matches("https://developer.chrome.com/docs/extensions/mv3/"));
//! assert!(!prefixes.matches("https://example.com/"));
//! ```

use thiserror::Error;

/// Error type for building an [`AllowedPrefixSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    /// The set would be empty, so no page could ever be toggled.
    #[error("allowed prefix set is empty")]
    Empty,

    /// An empty prefix would match every page.
    #[error("allowed prefix at index {0} is empty")]
    EmptyPrefix(usize),
}

/// Returns `true` iff `url` starts with at least one of `prefixes`.
///
/// Pure and total.  Stops at the first matching prefix.
pub fn matches<I, S>(url: &str, prefixes: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    prefixes
        .into_iter()
        .any(|prefix| url.starts_with(prefix.as_ref()))
}

/// The configured URL prefixes, fixed for the process lifetime.
///
/// Duplicates are dropped at construction; the first occurrence keeps its
/// position so the most common prefix can be listed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedPrefixSet {
    prefixes: Vec<String>,
}

impl AllowedPrefixSet {
    /// Builds a prefix set.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixError::Empty`] when no prefixes are given and
    /// [`PrefixError::EmptyPrefix`] when one of them is the empty string.
    pub fn new<I, S>(prefixes: I) -> Result<Self, PrefixError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for (index, prefix) in prefixes.into_iter().enumerate() {
            let prefix = prefix.into();
            if prefix.is_empty() {
                return Err(PrefixError::EmptyPrefix(index));
            }
            if !unique.contains(&prefix) {
                unique.push(prefix);
            }
        }

        if unique.is_empty() {
            return Err(PrefixError::Empty);
        }

        Ok(Self { prefixes: unique })
    }

    /// Returns `true` iff `url` starts with one of the configured prefixes.
    pub fn matches(&self, url: &str) -> bool {
        matches(url, &self.prefixes)
    }

    /// Iterates the prefixes in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
