//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::nav_layout::Page;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Screen shown in the main area - read
    pub current_page: ReadSignal<Page>,
    /// Screen shown in the main area - write
    set_current_page: WriteSignal<Page>,
    /// Trigger to reload the navigation layout - read
    pub layout_trigger: ReadSignal<u32>,
    /// Trigger to reload the navigation layout - write
    set_layout_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        current_page: (ReadSignal<Page>, WriteSignal<Page>),
        layout_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            current_page: current_page.0,
            set_current_page: current_page.1,
            layout_trigger: layout_trigger.0,
            set_layout_trigger: layout_trigger.1,
        }
    }

    /// Switch the main area to another screen
    pub fn navigate(&self, page: Page) {
        if page != Page::Unknown {
            self.set_current_page.set(page);
        }
    }

    /// Re-read the navigation layout (draft first, then server)
    pub fn reload_layout(&self) {
        self.set_layout_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
