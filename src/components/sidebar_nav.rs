//! Sidebar Navigation Component
//!
//! Renders the configured layout: visible entries grouped by section,
//! highlighting the current page.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::nav_layout::Page;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SidebarNav() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let sections = Memo::new(move |_| store.nav_layout().with(|layout| layout.visible_sections()));

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"FieldOps Admin"</div>
            <Show when=move || store.nav_is_draft().get()>
                <div class="sidebar-draft" title="Unpublished layout draft">"Draft layout"</div>
            </Show>
            {move || sections.get().into_iter().map(|section| view! {
                <div class="sidebar-section">
                    <div class="sidebar-section-title">{section.title.clone()}</div>
                    {section.entries.into_iter().map(|entry| {
                        let page = entry.page;
                        let label = entry.display_label().to_string();
                        view! {
                            <button
                                class="sidebar-link"
                                class:active=move || ctx.current_page.get() == page
                                on:click=move |_| ctx.navigate(page)
                            >
                                <span>{label}</span>
                                {(page == Page::Messages).then(|| view! {
                                    <Show when=move || { store.unread_messages().get() > 0 }>
                                        <span class="sidebar-badge">{move || store.unread_messages().get()}</span>
                                    </Show>
                                })}
                            </button>
                        }
                    }).collect_view()}
                </div>
            }).collect_view()}
        </nav>
    }
}
