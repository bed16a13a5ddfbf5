//! In-memory style injector.
//!
//! Stands in for the host's style insertion API in the headless harness and in
//! tests.  It keeps the list of sheets currently installed on each tab, so a
//! double apply shows up as the same sheet installed twice instead of being
//! silently absorbed, just as it would on a real page.
//!
//! # Simulating host failures
//!
//! [`InMemoryStyleInjector::detach_tab`] makes every later call on that tab
//! fail with [`StyleError::TabGone`], which is what the host reports when the
//! tab navigates away or closes mid-call.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use focus_core::{StyleResource, TabId};
use tracing::debug;

use crate::application::toggle_focus::{StyleApplicator, StyleError};

/// One call made on the injector, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleCall {
    Apply(TabId, StyleResource),
    Reverse(TabId, StyleResource),
}

#[derive(Default)]
struct InjectorState {
    installed: HashMap<TabId, Vec<StyleResource>>,
    detached: HashSet<TabId>,
    calls: Vec<StyleCall>,
}

/// Records installed sheets per tab.
#[derive(Default)]
pub struct InMemoryStyleInjector {
    state: Mutex<InjectorState>,
}

impl InMemoryStyleInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheets currently installed on `tab`, in install order.
    pub fn installed(&self, tab: TabId) -> Vec<StyleResource> {
        self.lock().installed.get(&tab).cloned().unwrap_or_default()
    }

    /// Every successful call so far, in order.
    pub fn calls(&self) -> Vec<StyleCall> {
        self.lock().calls.clone()
    }

    /// Makes later calls on `tab` fail as if it had navigated away.
    pub fn detach_tab(&self, tab: TabId) {
        self.lock().detached.insert(tab);
    }

    /// Undoes [`detach_tab`](Self::detach_tab).
    pub fn reattach_tab(&self, tab: TabId) {
        self.lock().detached.remove(&tab);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InjectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StyleApplicator for InMemoryStyleInjector {
    async fn apply(&self, tab: TabId, resource: &StyleResource) -> Result<(), StyleError> {
        let mut state = self.lock();
        if state.detached.contains(&tab) {
            return Err(StyleError::TabGone(tab));
        }
        state
            .installed
            .entry(tab)
            .or_default()
            .push(resource.clone());
        state.calls.push(StyleCall::Apply(tab, resource.clone()));
        debug!(%tab, %resource, "style sheet inserted");
        Ok(())
    }

    /// Removing a sheet that is not installed is a no-op, as on the host.
    async fn reverse(&self, tab: TabId, resource: &StyleResource) -> Result<(), StyleError> {
        let mut state = self.lock();
        if state.detached.contains(&tab) {
            return Err(StyleError::TabGone(tab));
        }
        if let Some(sheets) = state.installed.get_mut(&tab) {
            if let Some(pos) = sheets.iter().position(|s| s == resource) {
                sheets.remove(pos);
            }
            if sheets.is_empty() {
                state.installed.remove(&tab);
            }
        }
        state.calls.push(StyleCall::Reverse(tab, resource.clone()));
        debug!(%tab, %resource, "style sheet removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> StyleResource {
        StyleResource::new("focus-mode.css")
    }

    #[tokio::test]
    async fn test_apply_installs_sheet() {
        let injector = InMemoryStyleInjector::new();
        injector.apply(TabId(1), &sheet()).await.unwrap();
        assert_eq!(injector.installed(TabId(1)), vec![sheet()]);
    }

    #[tokio::test]
    async fn test_double_apply_installs_twice() {
        // The host does not deduplicate; neither does the injector.
        let injector = InMemoryStyleInjector::new();
        injector.apply(TabId(1), &sheet()).await.unwrap();
        injector.apply(TabId(1), &sheet()).await.unwrap();
        assert_eq!(injector.installed(TabId(1)).len(), 2);
    }

    #[tokio::test]
    async fn test_reverse_removes_one_instance() {
        let injector = InMemoryStyleInjector::new();
        injector.apply(TabId(1), &sheet()).await.unwrap();
        injector.reverse(TabId(1), &sheet()).await.unwrap();
        assert!(injector.installed(TabId(1)).is_empty());
    }

    #[tokio::test]
    async fn test_reverse_without_apply_is_noop() {
        let injector = InMemoryStyleInjector::new();
        injector.reverse(TabId(1), &sheet()).await.unwrap();
        assert!(injector.installed(TabId(1)).is_empty());
        assert_eq!(injector.calls(), vec![StyleCall::Reverse(TabId(1), sheet())]);
    }

    #[tokio::test]
    async fn test_detached_tab_fails_and_records_nothing() {
        // Arrange
        let injector = InMemoryStyleInjector::new();
        injector.detach_tab(TabId(2));

        // Act
        let result = injector.apply(TabId(2), &sheet()).await;

        // Assert
        assert_eq!(result, Err(StyleError::TabGone(TabId(2))));
        assert!(injector.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reattach_restores_calls() {
        let injector = InMemoryStyleInjector::new();
        injector.detach_tab(TabId(2));
        injector.reattach_tab(TabId(2));
        assert!(injector.apply(TabId(2), &sheet()).await.is_ok());
    }
}
