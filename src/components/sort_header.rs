//! Sortable Column Header
//!
//! Clicking the active column flips direction; any other column sorts ascending.

use leptos::prelude::*;

use crate::listing::SortSpec;

#[component]
pub fn SortHeader(
    label: &'static str,
    key: &'static str,
    sort: RwSignal<Option<SortSpec>>,
) -> impl IntoView {
    let arrow = move || match sort.get() {
        Some(spec) if spec.key == key => spec.direction.arrow(),
        _ => "",
    };

    view! {
        <th
            class="sortable"
            class:sorted=move || sort.with(|s| s.map(|spec| spec.key) == Some(key))
            on:click=move |_| sort.update(|s| *s = Some(SortSpec::toggle(*s, key)))
        >
            {label}
            <span class="sort-arrow">{arrow}</span>
        </th>
    }
}
