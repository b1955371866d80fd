//! Navigation Page
//!
//! Sidebar layout editor. Entries are dragged between sections, hidden,
//! or renamed on a local copy of the layout. "Save draft" keeps it in
//! this browser; "Publish" sends it to the server for everyone.

use leptos::prelude::*;
use leptos_dragdrop::{DragState, DropTarget};

use crate::api;
use crate::components::PageHeader;
use crate::context::use_app_context;
use crate::logging;
use crate::nav_layout::{clear_draft, save_draft, NavLayout, Page};
use crate::notify;
use crate::resource::dispatch;
use crate::store::{store_set_layout, use_app_store, AppStateStoreFields};

/// Apply a drop from the editor; false when the drop changed nothing
pub fn apply_drop(layout: &mut NavLayout, key: u32, target: DropTarget) -> bool {
    let Some(page) = Page::from_id(key) else { return false };
    let Some(len) = layout.sections.iter().find(|s| s.id == target.container()).map(|s| s.entries.len()) else {
        return false;
    };
    layout.move_entry(page, target.container(), target.insertion_index(len))
}

#[component]
pub fn NavigationPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let layout = RwSignal::new(store.nav_layout().get_untracked());
    let dirty = RwSignal::new(false);

    // Saved, discarded or published layouts replace the working copy
    Effect::new(move |_| {
        let current = store.nav_layout().get();
        layout.set(current);
        dirty.set(false);
    });

    let edit = move |change: &dyn Fn(&mut NavLayout)| {
        layout.update(|l| change(l));
        dirty.set(true);
    };

    let drag = DragState::<u32>::new();
    drag.bind_listeners(move |key, target| {
        let mut moved = false;
        layout.try_update(|l| moved = apply_drop(l, key, target));
        if moved {
            logging::info("NAV", format!("moved page {} to section {}", key, target.container()));
            dirty.try_set(true);
        }
    });

    let add_section = move |_: web_sys::MouseEvent| {
        if let Some(title) = notify::prompt("Section title", "") {
            edit(&|l| {
                l.add_section(&title);
            });
        }
    };
    let remove_section = move |id: u32| {
        let mut removed = false;
        layout.update(|l| removed = l.remove_section(id));
        if removed {
            dirty.set(true);
        } else {
            notify::alert("Move the pages out of this section before removing it.");
        }
    };

    let save = move |_: web_sys::MouseEvent| {
        let current = layout.get_untracked();
        save_draft(&current);
        store_set_layout(&store, current, true);
        notify::toast("Draft saved in this browser");
    };
    let discard = move |_: web_sys::MouseEvent| {
        if !notify::confirm("Discard the draft and go back to the published layout?") {
            return;
        }
        clear_draft();
        ctx.reload_layout();
    };
    let reset = move |_: web_sys::MouseEvent| {
        if notify::confirm("Start over from the default layout? Nothing is published until you publish.") {
            layout.set(NavLayout::default_layout());
            dirty.set(true);
        }
    };
    let publish = move |_: web_sys::MouseEvent| {
        if !notify::confirm("Publish this layout for every user?") {
            return;
        }
        let current = layout.get_untracked().normalized();
        let body = current.clone();
        dispatch(
            "Could not publish navigation",
            "Navigation published",
            async move { api::publish_navigation(&body).await },
            move || {
                clear_draft();
                store_set_layout(&store, current, false);
            },
        );
    };

    view! {
        <section class="page navigation-page">
            <PageHeader title="Navigation" count=Signal::derive(move || layout.with(|l| l.sections.len()))>
                <Show when=move || dirty.get()>
                    <span class="header-stat warning">"Unsaved changes"</span>
                </Show>
                <button class="btn" on:click=add_section>"+ Section"</button>
                <button class="btn" on:click=reset>"Reset to default"</button>
                <Show when=move || store.nav_is_draft().get()>
                    <button class="btn" on:click=discard>"Discard draft"</button>
                </Show>
                <button class="btn" on:click=save>"Save draft"</button>
                <button class="btn primary" on:click=publish>"Publish"</button>
            </PageHeader>

            <p class="muted">"Drag pages between sections. Hidden pages stay reachable here."</p>

            <div class="nav-editor" class:dragging=move || drag.dragging().is_some()>
                {move || layout.get().sections.into_iter().map(|section| {
                    let section_id = section.id;
                    let count = section.entries.len();
                    let end_slot = DropTarget::Slot { container: section_id, index: count };
                    view! {
                        <div
                            class="nav-editor-section"
                            class:drop-target=move || drag.is_target(DropTarget::Container(section_id))
                            on:mouseenter=drag.on_enter(DropTarget::Container(section_id))
                            on:mouseleave=drag.on_leave()
                        >
                            <div class="nav-editor-section-header">
                                <input
                                    type="text"
                                    class="section-title"
                                    prop:value=section.title.clone()
                                    on:change=move |ev| {
                                        let title = event_target_value(&ev);
                                        edit(&|l| l.rename_section(section_id, &title));
                                    }
                                />
                                {(count == 0).then(|| view! {
                                    <button class="btn small danger" on:click=move |_| remove_section(section_id)>"Remove"</button>
                                })}
                            </div>
                            {section.entries.into_iter().enumerate().map(|(index, entry)| {
                                let page = entry.page;
                                let key = page.id();
                                let slot = DropTarget::Slot { container: section_id, index };
                                let pinned = page == Page::Navigation;
                                view! {
                                    <div
                                        class="nav-editor-entry"
                                        class:hidden-entry=!entry.visible
                                        class:dragging=move || drag.is_dragging(key)
                                        class:drop-before=move || drag.is_target(slot)
                                        on:mousedown=drag.on_mousedown(key)
                                        on:mouseenter=drag.on_enter(slot)
                                    >
                                        <span class="drag-handle">"⠿"</span>
                                        <input
                                            type="checkbox"
                                            title="Show in sidebar"
                                            prop:checked=entry.visible
                                            disabled=pinned
                                            on:change=move |_| edit(&|l| l.toggle_visible(page))
                                        />
                                        <input
                                            type="text"
                                            placeholder=page.label()
                                            prop:value=entry.label.clone()
                                            on:change=move |ev| {
                                                let label = event_target_value(&ev);
                                                edit(&|l| l.rename_entry(page, &label));
                                            }
                                        />
                                        <span class="muted">{page.label()}</span>
                                    </div>
                                }
                            }).collect_view()}
                            <div
                                class="nav-editor-end"
                                class:drop-before=move || drag.is_target(end_slot)
                                on:mouseenter=drag.on_enter(end_slot)
                            >
                                {(count == 0).then_some("Drop pages here")}
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_drop_moves_between_sections() {
        let mut layout = NavLayout::default_layout();
        let target = DropTarget::Slot { container: 5, index: 0 };
        assert!(apply_drop(&mut layout, Page::Bills.id(), target));
        assert_eq!(layout.sections[4].entries[0].page, Page::Bills);

        assert!(apply_drop(&mut layout, Page::Customers.id(), DropTarget::Container(4)));
        assert_eq!(layout.sections[3].entries.last().map(|e| e.page), Some(Page::Customers));
    }

    #[test]
    fn test_apply_drop_rejects_unknown_keys() {
        let mut layout = NavLayout::default_layout();
        assert!(!apply_drop(&mut layout, 999, DropTarget::Container(1)));
        assert!(!apply_drop(&mut layout, Page::Sites.id(), DropTarget::Container(77)));
        assert_eq!(layout, NavLayout::default_layout());
    }
}
