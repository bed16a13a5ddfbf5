//! In-memory badge store: the tab state *is* the badge text.
//!
//! The host keeps a badge text per tab plus one global text that shows on any
//! tab without its own.  This adapter models exactly that, so the toggle's
//! state and what the user sees on the toolbar icon come from one map.
//!
//! # Read semantics
//!
//! [`TabStateStore::read`] only looks at the tab's own text.  The global
//! fallback is a display concern ([`BadgeStateStore::badge_text`]); a tab that
//! was never toggled reads as unknown even after install set the global text
//! to `OFF`.
//!
//! The host uses the empty string for "no badge", so an empty per-tab text
//! also reads as unknown.

use std::collections::HashMap;

use async_trait::async_trait;
use focus_core::{FocusState, TabId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::application::toggle_focus::{StoreError, TabStateStore};

/// Per-tab badge text held in memory for the tab's lifetime.
#[derive(Default)]
pub struct BadgeStateStore {
    tabs: RwLock<HashMap<TabId, String>>,
    global: RwLock<String>,
}

impl BadgeStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text the host would display on `tab`: its own text, else the global one.
    pub async fn badge_text(&self, tab: TabId) -> String {
        if let Some(text) = self.tabs.read().await.get(&tab) {
            return text.clone();
        }
        self.global.read().await.clone()
    }

    /// The global (install-time) badge text.
    pub async fn global_text(&self) -> String {
        self.global.read().await.clone()
    }

    /// Sets raw badge text the way the host (or another extension page) could.
    pub async fn set_badge_text(&self, tab: TabId, text: impl Into<String>) {
        self.tabs.write().await.insert(tab, text.into());
    }

    /// Number of tabs with their own badge text.
    pub async fn tracked_tabs(&self) -> usize {
        self.tabs.read().await.len()
    }
}

#[async_trait]
impl TabStateStore for BadgeStateStore {
    async fn read(&self, tab: TabId) -> Result<Option<FocusState>, StoreError> {
        match self.tabs.read().await.get(&tab) {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => text
                .parse()
                .map(Some)
                .map_err(|_| StoreError::UnrecognizedBadge {
                    tab,
                    text: text.clone(),
                }),
        }
    }

    async fn write(&self, tab: TabId, state: FocusState) -> Result<(), StoreError> {
        self.tabs
            .write()
            .await
            .insert(tab, state.as_badge_text().to_string());
        debug!(%tab, "badge set to {state}");
        Ok(())
    }

    async fn write_default(&self, state: FocusState) -> Result<(), StoreError> {
        *self.global.write().await = state.as_badge_text().to_string();
        Ok(())
    }

    async fn forget(&self, tab: TabId) -> Result<(), StoreError> {
        self.tabs.write().await.remove(&tab);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_written_tab_reads_unknown() {
        let store = BadgeStateStore::new();
        assert_eq!(store.read(TabId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read_returns_state() {
        // Arrange
        let store = BadgeStateStore::new();

        // Act
        store.write(TabId(1), FocusState::On).await.unwrap();

        // Assert
        assert_eq!(store.read(TabId(1)).await.unwrap(), Some(FocusState::On));
        assert_eq!(store.badge_text(TabId(1)).await, "ON");
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_value() {
        let store = BadgeStateStore::new();
        store.write(TabId(1), FocusState::On).await.unwrap();
        store.write(TabId(1), FocusState::Off).await.unwrap();
        assert_eq!(store.read(TabId(1)).await.unwrap(), Some(FocusState::Off));
    }

    #[tokio::test]
    async fn test_tabs_are_independent() {
        let store = BadgeStateStore::new();
        store.write(TabId(1), FocusState::On).await.unwrap();
        assert_eq!(store.read(TabId(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_global_default_is_display_only() {
        // Arrange
        let store = BadgeStateStore::new();

        // Act
        store.write_default(FocusState::Off).await.unwrap();

        // Assert: the user sees OFF, but the tab's state is still unknown
        assert_eq!(store.global_text().await, "OFF");
        assert_eq!(store.badge_text(TabId(3)).await, "OFF");
        assert_eq!(store.read(TabId(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_badge_reads_unknown() {
        let store = BadgeStateStore::new();
        store.set_badge_text(TabId(1), "").await;
        assert_eq!(store.read(TabId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_foreign_badge_text_is_an_error() {
        // Arrange
        let store = BadgeStateStore::new();
        store.set_badge_text(TabId(4), "42").await;

        // Act
        let result = store.read(TabId(4)).await;

        // Assert
        assert_eq!(
            result,
            Err(StoreError::UnrecognizedBadge {
                tab: TabId(4),
                text: "42".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_forget_prunes_tab() {
        let store = BadgeStateStore::new();
        store.write(TabId(1), FocusState::On).await.unwrap();

        store.forget(TabId(1)).await.unwrap();

        assert_eq!(store.tracked_tabs().await, 0);
        assert_eq!(store.read(TabId(1)).await.unwrap(), None);
    }
}
