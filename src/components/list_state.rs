//! Loading / Empty States
//!
//! Which body a list renders: a spinner before the first load, an empty
//! message when nothing is left after filtering, or the rows.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    /// The collection itself is empty
    Empty,
    /// Records exist but none pass the current search/filters
    NoMatches,
    Rows,
}

pub fn list_phase(loading: bool, total: usize, shown: usize) -> ListPhase {
    match (loading, total, shown) {
        (true, 0, _) => ListPhase::Loading,
        (false, 0, _) => ListPhase::Empty,
        (_, _, 0) => ListPhase::NoMatches,
        _ => ListPhase::Rows,
    }
}

#[component]
pub fn LoadingState() -> impl IntoView {
    view! { <div class="list-state loading">"Loading…"</div> }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="list-state empty">{message}</div> }
}

/// Renders the phase's placeholder, or the children once there are rows to show
#[component]
pub fn ListBody(
    phase: Signal<ListPhase>,
    /// Plural noun for the empty message
    noun: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    move || match phase.get() {
        ListPhase::Loading => view! { <LoadingState /> }.into_any(),
        ListPhase::Empty => view! { <EmptyState message=format!("No {} yet.", noun) /> }.into_any(),
        ListPhase::NoMatches => {
            view! { <EmptyState message=format!("No {} match the current filters.", noun) /> }.into_any()
        }
        ListPhase::Rows => children().into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_phase() {
        assert_eq!(list_phase(true, 0, 0), ListPhase::Loading);
        assert_eq!(list_phase(false, 0, 0), ListPhase::Empty);
        assert_eq!(list_phase(false, 5, 0), ListPhase::NoMatches);
        assert_eq!(list_phase(false, 5, 2), ListPhase::Rows);
        // Reloads keep showing the previous rows
        assert_eq!(list_phase(true, 5, 5), ListPhase::Rows);
    }

    #[test]
    fn test_list_body_takes_element_children() {
        let owner = Owner::new();
        owner.with(|| {
            let phase = Signal::stored(ListPhase::Loading);
            let _body = view! {
                <ListBody phase=phase noun="invoices">
                    <table class="data-table"></table>
                </ListBody>
            };
        });
    }
}
