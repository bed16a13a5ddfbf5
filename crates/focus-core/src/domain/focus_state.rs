//! The per-tab focus mode.
//!
//! A tab is either in focus mode (`ON`) or showing its normal layout (`OFF`).
//! The host displays the state as badge text on the toolbar icon, so the
//! textual form of a [`FocusState`] is part of the wire contract: exactly
//! `"ON"` and `"OFF"`.
//!
//! # Unknown state
//!
//! A tab the toggle has never touched has no state at all.  Callers model that
//! as `Option<FocusState>` and collapse `None` to [`FocusState::Off`] through
//! [`FocusState::resolve`] before computing a transition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when badge text is not one of the two known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized focus state text: {0:?}")]
pub struct StateParseError(pub String);

/// Whether focus mode is currently shown on a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FocusState {
    /// Focus style installed on the page.
    #[serde(rename = "ON")]
    On,
    /// Normal page layout.
    #[serde(rename = "OFF")]
    #[default]
    Off,
}

impl FocusState {
    /// Badge text for `On`.
    pub const ON_TEXT: &'static str = "ON";
    /// Badge text for `Off`.
    pub const OFF_TEXT: &'static str = "OFF";

    /// Returns the opposite state.  There is no third outcome.
    pub fn toggled(self) -> Self {
        match self {
            FocusState::On => FocusState::Off,
            FocusState::Off => FocusState::On,
        }
    }

    /// Collapses an unknown state to `Off`.
    pub fn resolve(state: Option<FocusState>) -> FocusState {
        state.unwrap_or(FocusState::Off)
    }

    /// The badge text the host shows for this state.
    pub fn as_badge_text(self) -> &'static str {
        match self {
            FocusState::On => Self::ON_TEXT,
            FocusState::Off => Self::OFF_TEXT,
        }
    }

    /// Returns `true` for `On`.
    pub fn is_on(self) -> bool {
        matches!(self, FocusState::On)
    }
}

impl fmt::Display for FocusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_badge_text())
    }
}

impl FromStr for FocusState {
    type Err = StateParseError;

    /// Parses badge text.  Matching is exact; the host never alters the case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ON_TEXT => Ok(FocusState::On),
            Self::OFF_TEXT => Ok(FocusState::Off),
            other => Err(StateParseError(other.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips_off_to_on() {
        assert_eq!(FocusState::Off.toggled(), FocusState::On);
    }

    #[test]
    fn test_toggled_flips_on_to_off() {
        assert_eq!(FocusState::On.toggled(), FocusState::Off);
    }

    #[test]
    fn test_double_toggle_returns_to_original() {
        for state in [FocusState::On, FocusState::Off] {
            assert_eq!(state.toggled().toggled(), state);
        }
    }

    #[test]
    fn test_resolve_unknown_is_off() {
        assert_eq!(FocusState::resolve(None), FocusState::Off);
    }

    #[test]
    fn test_resolve_known_state_is_unchanged() {
        assert_eq!(FocusState::resolve(Some(FocusState::On)), FocusState::On);
        assert_eq!(FocusState::resolve(Some(FocusState::Off)), FocusState::Off);
    }

    #[test]
    fn test_default_is_off() {
        assert_eq!(FocusState::default(), FocusState::Off);
    }

    #[test]
    fn test_badge_text_values() {
        assert_eq!(FocusState::On.as_badge_text(), "ON");
        assert_eq!(FocusState::Off.as_badge_text(), "OFF");
        assert_eq!(FocusState::On.to_string(), "ON");
    }

    #[test]
    fn test_parse_badge_text() {
        assert_eq!("ON".parse::<FocusState>(), Ok(FocusState::On));
        assert_eq!("OFF".parse::<FocusState>(), Ok(FocusState::Off));
    }

    #[test]
    fn test_parse_rejects_other_case() {
        // Arrange / Act
        let result = "on".parse::<FocusState>();

        // Assert
        assert_eq!(result, Err(StateParseError("on".to_string())));
    }

    #[test]
    fn test_serde_uses_badge_text() {
        let json = serde_json::to_string(&FocusState::On).unwrap();
        assert_eq!(json, "\"ON\"");
        let back: FocusState = serde_json::from_str("\"OFF\"").unwrap();
        assert_eq!(back, FocusState::Off);
    }
}
