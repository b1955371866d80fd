//! FieldOps Admin App
//!
//! Sidebar plus the current page. The sidebar layout is loaded from the
//! local draft if one exists, otherwise from the server.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::SidebarNav;
use crate::context::AppContext;
use crate::logging;
use crate::nav_layout::{load_draft, NavLayout, Page};
use crate::pages::render_page;
use crate::store::{store_first_visible_page, store_set_layout, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(signal(Page::Customers), signal(0u32));
    let store: AppStore = Store::new(AppState::new());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Load the layout on mount and on every reload_layout()
    Effect::new(move |_| {
        let trigger = ctx.layout_trigger.get();
        if let Some(draft) = load_draft() {
            logging::info("NAV", format!("using local layout draft, trigger={}", trigger));
            store_set_layout(&store, draft, true);
            return;
        }
        spawn_local(async move {
            let layout = match api::load_navigation().await {
                Ok(layout) => layout,
                Err(err) => {
                    logging::warn("NAV", format!("falling back to default layout: {}", err));
                    NavLayout::default_layout()
                }
            };
            store_set_layout(&store, layout, false);
        });
    });

    // A page hidden by the new layout falls back to the first visible one
    Effect::new(move |_| {
        let shown = store.nav_layout().with(|layout| {
            layout.visible_sections().iter().any(|s| s.entries.iter().any(|e| e.page == ctx.current_page.get_untracked()))
        });
        if !shown {
            ctx.navigate(store_first_visible_page(&store));
        }
    });

    view! {
        <div class="app-layout">
            <SidebarNav />
            <main class="main-content">
                {move || render_page(ctx.current_page.get())}
            </main>
        </div>
    }
}
