//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::nav_layout::{NavLayout, Page};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Layout the sidebar renders (published or local draft)
    pub nav_layout: NavLayout,
    /// True while the sidebar shows an unpublished draft
    pub nav_is_draft: bool,
    /// Unread inbox messages, shown as a sidebar badge
    pub unread_messages: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            nav_layout: NavLayout::default_layout(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the sidebar layout; it is normalized so every page appears once
pub fn store_set_layout(store: &AppStore, layout: NavLayout, is_draft: bool) {
    store.nav_layout().set(layout.normalized());
    store.nav_is_draft().set(is_draft);
}

/// First visible page in sidebar order, used when the current one gets hidden
pub fn store_first_visible_page(store: &AppStore) -> Page {
    store
        .nav_layout()
        .read()
        .visible_sections()
        .iter()
        .flat_map(|section| section.entries.iter())
        .map(|entry| entry.page)
        .next()
        .unwrap_or(Page::Navigation)
}

pub fn store_set_unread(store: &AppStore, unread: usize) {
    store.unread_messages().set(unread);
}
