//! Modal Dialog Component
//!
//! Overlay panel for create/edit forms and record details. Clicking the
//! backdrop or the × closes it.

use leptos::prelude::*;

#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    open: RwSignal<bool>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let panel_class = if wide { "modal-panel wide" } else { "modal-panel" };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <div class=panel_class on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>{move || title.get()}</h2>
                        <button class="modal-close" on:click=move |_| open.set(false)>"×"</button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
