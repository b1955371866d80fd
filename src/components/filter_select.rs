//! Filter Select Component
//!
//! Exact-match dropdown filter. The leading "All" option carries the
//! empty value, which the list query ignores.

use leptos::prelude::*;

#[component]
pub fn FilterSelect(
    label: &'static str,
    value: RwSignal<String>,
    /// (value, label) pairs
    options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <label class="filter-select">
            <span>{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="" selected=move || value.with(|v| v.is_empty())>"All"</option>
                {move || options.get().into_iter().map(|(option, text)| {
                    let current = option.clone();
                    view! {
                        <option value=option selected=move || value.with(|v| *v == current)>
                            {text}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}

/// Dropdown options from distinct raw values (value doubles as label)
pub fn plain_options(values: Vec<String>) -> Vec<(String, String)> {
    values.into_iter().map(|v| (v.clone(), v)).collect()
}
