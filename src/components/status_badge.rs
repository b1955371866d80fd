//! Status Badge Component

use leptos::prelude::*;

use crate::models::Tone;

#[component]
pub fn StatusBadge(#[prop(into)] label: String, tone: Tone) -> impl IntoView {
    view! { <span class=tone.class()>{label}</span> }
}
