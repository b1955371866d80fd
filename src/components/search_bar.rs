//! Search Bar Component
//!
//! Free-text box driving a list's case-insensitive substring search.

use leptos::prelude::*;

#[component]
pub fn SearchBar(
    value: RwSignal<String>,
    #[prop(default = "Search…")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || !value.with(|v| v.is_empty())>
                <button class="search-clear" title="Clear" on:click=move |_| value.set(String::new())>
                    "×"
                </button>
            </Show>
        </div>
    }
}
