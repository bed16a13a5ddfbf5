//! Events delivered by the host browser.
//!
//! The host reports three things the toggle cares about:
//!
//! - the extension was installed (reset the global badge),
//! - the user triggered the toggle on a tab,
//! - a tab was closed (drop whatever we remember about it).
//!
//! # JSON discriminant
//!
//! Every event is a JSON object with a `"type"` field that identifies the
//! variant.  Field names follow the host's callback payloads (camelCase):
//!
//! ```json
//! {"type":"installed"}
//! {"type":"trigger","tabId":7,"url":"https://developer.chrome.com/docs/extensions/mv3/","source":"shortcut"}
//! {"type":"tabClosed","tabId":7}
//! ```
//!
//! # Two trigger sources, one event
//!
//! Clicking the toolbar icon and pressing the keyboard shortcut both arrive as
//! [`HostEvent::Trigger`].  The [`TriggerSource`] is kept for logging only; the
//! state machine never branches on it.

use serde::{Deserialize, Serialize};

use crate::domain::tab::TabId;

/// Which user gesture produced a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerSource {
    /// Pointer activation of the toolbar icon.
    #[default]
    Action,
    /// The configured key combination.
    Shortcut,
}

impl std::fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TriggerSource::Action => "action",
            TriggerSource::Shortcut => "shortcut",
        })
    }
}

/// A request to flip the focus mode of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// The tab the gesture targeted.
    pub tab_id: TabId,
    /// The tab's URL at the time of the gesture.
    pub url: String,
    /// Absent in older host payloads; those were always icon clicks.
    #[serde(default)]
    pub source: TriggerSource,
}

impl TriggerEvent {
    /// Builds a trigger from a toolbar icon click.
    pub fn action(tab_id: TabId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            url: url.into(),
            source: TriggerSource::Action,
        }
    }

    /// Builds a trigger from the keyboard shortcut.
    pub fn shortcut(tab_id: TabId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            url: url.into(),
            source: TriggerSource::Shortcut,
        }
    }
}

/// All events the host can deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    /// The extension was installed or updated.
    Installed,

    /// The user asked to toggle focus mode on a tab.
    Trigger(TriggerEvent),

    /// A tab was closed; its id will never be reused for this tab again.
    #[serde(rename_all = "camelCase")]
    TabClosed {
        /// The closed tab.
        tab_id: TabId,
    },
}

impl HostEvent {
    /// The tab this event concerns, if any.  `Installed` is global.
    pub fn tab_id(&self) -> Option<TabId> {
        match self {
            HostEvent::Installed => None,
            HostEvent::Trigger(trigger) => Some(trigger.tab_id),
            HostEvent::TabClosed { tab_id } => Some(*tab_id),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_source_defaults_to_action() {
        assert_eq!(TriggerSource::default(), TriggerSource::Action);
    }

    #[test]
    fn test_constructors_set_source() {
        let click = TriggerEvent::action(TabId(1), "https://a.test/");
        let key = TriggerEvent::shortcut(TabId(1), "https://a.test/");
        assert_eq!(click.source, TriggerSource::Action);
        assert_eq!(key.source, TriggerSource::Shortcut);
        assert_eq!(click.url, key.url);
    }

    #[test]
    fn test_tab_id_of_each_event() {
        assert_eq!(HostEvent::Installed.tab_id(), None);
        assert_eq!(
            HostEvent::Trigger(TriggerEvent::action(TabId(3), "x")).tab_id(),
            Some(TabId(3))
        );
        assert_eq!(HostEvent::TabClosed { tab_id: TabId(9) }.tab_id(), Some(TabId(9)));
    }

    #[test]
    fn test_trigger_serializes_with_camel_case_fields() {
        // Arrange
        let event = HostEvent::Trigger(TriggerEvent::shortcut(TabId(7), "https://a.test/"));

        // Act
        let json = serde_json::to_value(&event).unwrap();

        // Assert
        assert_eq!(json["type"], "trigger");
        assert_eq!(json["tabId"], 7);
        assert_eq!(json["url"], "https://a.test/");
        assert_eq!(json["source"], "shortcut");
    }

    #[test]
    fn test_tab_closed_serializes_with_camel_case_tag() {
        let json = serde_json::to_value(HostEvent::TabClosed { tab_id: TabId(2) }).unwrap();
        assert_eq!(json["type"], "tabClosed");
        assert_eq!(json["tabId"], 2);
    }
}
