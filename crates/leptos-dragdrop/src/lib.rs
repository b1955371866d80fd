//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for reordering entries across containers.
//! A press only becomes a drag after the pointer moves past a threshold,
//! so plain clicks on draggable rows still work.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long the click after a drop is ignored
const CLICK_SUPPRESS_MS: u64 = 100;

/// Where a dragged entry would land
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Anywhere on a container (append)
    Container(u32),
    /// Gap before position `index` inside a container
    Slot { container: u32, index: usize },
}

impl DropTarget {
    pub fn container(&self) -> u32 {
        match *self {
            DropTarget::Container(id) => id,
            DropTarget::Slot { container, .. } => container,
        }
    }

    /// Insertion index in a container holding `len` entries
    pub fn insertion_index(&self, len: usize) -> usize {
        match *self {
            DropTarget::Container(_) => len,
            DropTarget::Slot { index, .. } => index.min(len),
        }
    }
}

/// True once the pointer has moved far enough to count as a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Drag state signals, keyed by whatever identifies a draggable entry
pub struct DragState<K: Send + Sync + 'static> {
    pending: RwSignal<Option<K>>,
    dragging: RwSignal<Option<K>>,
    target: RwSignal<Option<DropTarget>>,
    start: RwSignal<(i32, i32)>,
    just_ended: RwSignal<bool>,
}

impl<K: Send + Sync + 'static> Clone for DragState<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DragState<K> {}

impl<K> DragState<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
            dragging: RwSignal::new(None),
            target: RwSignal::new(None),
            start: RwSignal::new((0, 0)),
            just_ended: RwSignal::new(false),
        }
    }

    pub fn dragging(&self) -> Option<K> {
        self.dragging.get()
    }

    pub fn is_dragging(&self, key: K) -> bool {
        self.dragging.get() == Some(key)
    }

    pub fn is_target(&self, target: DropTarget) -> bool {
        self.dragging.get().is_some() && self.target.get() == Some(target)
    }

    /// Suppresses the click that follows a drop
    pub fn just_ended(&self) -> bool {
        self.just_ended.get_untracked()
    }

    /// mousedown on a draggable entry; inputs and buttons inside it keep their clicks
    pub fn on_mousedown(self, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
        move |ev: web_sys::MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            self.pending.set(Some(key));
            self.start.set((ev.client_x(), ev.client_y()));
        }
    }

    pub fn on_enter(self, target: DropTarget) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
        move |_ev: web_sys::MouseEvent| {
            if self.dragging.get_untracked().is_some() {
                self.target.set(Some(target));
            }
        }
    }

    pub fn on_leave(self) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
        move |_ev: web_sys::MouseEvent| {
            if self.dragging.get_untracked().is_some() {
                self.target.set(None);
            }
        }
    }

    fn end(&self) {
        self.dragging.try_set(None);
        self.target.try_set(None);
        self.pending.try_set(None);
        self.just_ended.try_set(true);

        let clear = self.just_ended;
        set_timeout(move || {
            clear.try_set(false);
        }, Duration::from_millis(CLICK_SUPPRESS_MS));
    }

    /// Window-level mousemove/mouseup listeners; `on_drop` receives the
    /// dragged key and where it was released. The listeners are removed
    /// when the calling owner is cleaned up.
    pub fn bind_listeners<F>(self, on_drop: F)
    where
        F: Fn(K, DropTarget) + 'static,
    {
        let on_mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
            let Some(pending) = self.pending.try_get_untracked().flatten() else { return };
            if self.dragging.try_get_untracked().flatten().is_some() {
                return;
            }
            let start = self.start.try_get_untracked().unwrap_or_default();
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                self.dragging.try_set(Some(pending));
            }
        });

        let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
            let dragged = self.dragging.try_get_untracked().flatten();
            let target = self.target.try_get_untracked().flatten();
            let was_pending = self.pending.try_get_untracked().flatten().is_some();
            if dragged.is_none() && !was_pending {
                return;
            }
            self.end();
            if let Some((dragged, target)) = released_on(dragged, target) {
                on_drop(dragged, target);
            }
        });

        on_cleanup(move || {
            on_mousemove.remove();
            on_mouseup.remove();
        });
    }
}

/// A release only drops when a drag was active over a target
pub fn released_on<K>(dragged: Option<K>, target: Option<DropTarget>) -> Option<(K, DropTarget)> {
    match (dragged, target) {
        (Some(dragged), Some(target)) => Some((dragged, target)),
        _ => None,
    }
}

impl<K> Default for DragState<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (10, 10)));
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_release_without_drag_or_target_does_not_drop() {
        let slot = DropTarget::Slot { container: 1, index: 0 };
        assert_eq!(released_on(Some(3u32), Some(slot)), Some((3, slot)));
        assert_eq!(released_on(None::<u32>, Some(slot)), None);
        assert_eq!(released_on(Some(3u32), None), None);
    }

    #[test]
    fn test_insertion_index() {
        assert_eq!(DropTarget::Container(2).insertion_index(4), 4);
        assert_eq!(DropTarget::Slot { container: 2, index: 1 }.insertion_index(4), 1);
        assert_eq!(DropTarget::Slot { container: 2, index: 9 }.insertion_index(4), 4);
        assert_eq!(DropTarget::Slot { container: 7, index: 0 }.container(), 7);
    }
}
