//! Page Header Component
//!
//! Title bar of every screen: heading, record count, action buttons.

use leptos::prelude::*;

#[component]
pub fn PageHeader(
    title: &'static str,
    /// Records currently shown
    count: Signal<usize>,
    children: Children,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-title">
                <h1>{title}</h1>
                <span class="page-count">{move || format!("{} shown", count.get())}</span>
            </div>
            <div class="page-actions">{children()}</div>
        </header>
    }
}
