//! Leptos DragDrop Utilities
//!
//! Kanban-style drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag and
//! closest-corners collision detection to pick the target column.
//!
//! Markup contract: columns carry `data-dnd-column="<id>"`, cards carry
//! `data-dnd-card="<id>"` and live inside their column element.

use std::str::FromStr;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long the click following a drop is swallowed
const CLICK_SUPPRESS_MS: i32 = 100;

pub const COLUMN_ATTR: &str = "data-dnd-column";
pub const CARD_ATTR: &str = "data-dnd-card";

/// Ids usable for cards and columns
pub trait DndId: Copy + PartialEq + FromStr + Send + Sync + 'static {}
impl<T: Copy + PartialEq + FromStr + Send + Sync + 'static> DndId for T {}

/// Where a card would land: column and index among the other cards
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropTarget<Id> {
    pub column: Id,
    pub index: usize,
}

/// Axis-aligned client rectangle
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_dom(r: &web_sys::DomRect) -> Self {
        Self::new(r.left(), r.top(), r.width(), r.height())
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    fn corners(&self) -> [(f64, f64); 4] {
        let right = self.left + self.width;
        let bottom = self.top + self.height;
        [
            (self.left, self.top),
            (right, self.top),
            (self.left, bottom),
            (right, bottom),
        ]
    }
}

/// Candidate whose corners are nearest (summed distance) to the active rect's corners
pub fn closest_corners<T: Copy>(active: &Rect, candidates: &[(T, Rect)]) -> Option<T> {
    let from = active.corners();
    candidates
        .iter()
        .map(|(id, rect)| {
            let distance: f64 = rect
                .corners()
                .iter()
                .zip(from.iter())
                .map(|((x1, y1), (x2, y2))| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                .sum();
            (*id, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Insertion index for a pointer at `pointer_y` among ordered card rects
pub fn drop_index(pointer_y: f64, cards: &[Rect]) -> usize {
    cards.iter().filter(|r| r.mid_y() < pointer_y).count()
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<Id: DndId> {
    pub dragging_id_read: ReadSignal<Option<Id>>,
    pub dragging_id_write: WriteSignal<Option<Id>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<Id>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<Id>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<Id>>,
    pub pending_id_write: WriteSignal<Option<Id>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Card rect at mousedown, moved with the pointer for collision checks
    pub origin_rect_read: ReadSignal<Rect>,
    pub origin_rect_write: WriteSignal<Rect>,
    /// Current pointer position while dragging (for the overlay)
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
}

impl<Id: DndId> DndSignals<Id> {
    /// Column currently under the dragged card
    pub fn over_column(&self) -> Option<Id> {
        self.drop_target_read.get().map(|t| t.column)
    }
}

pub fn create_dnd_signals<Id: DndId>() -> DndSignals<Id> {
    let (dragging_id_read, dragging_id_write) = signal(None::<Id>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<Id>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<Id>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (origin_rect_read, origin_rect_write) = signal(Rect::default());
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        origin_rect_read,
        origin_rect_write,
        pointer_read,
        pointer_write,
    }
}

/// End drag operation
pub fn end_drag<Id: DndId>(dnd: &DndSignals<Id>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable cards.
/// Records pending drag with start position and the card's rect.
pub fn make_on_mousedown<Id: DndId>(dnd: DndSignals<Id>, card_id: Id) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
        }
        if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            dnd.origin_rect_write.set(Rect::from_dom(&el.get_bounding_client_rect()));
        }
        dnd.pending_id_write.set(Some(card_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

fn parse_attr<Id: DndId>(el: &web_sys::Element, attr: &str) -> Option<Id> {
    el.get_attribute(attr)?.parse().ok()
}

fn elements(root: &web_sys::Element, attr: &str) -> Vec<web_sys::Element> {
    let Ok(list) = root.query_selector_all(&format!("[{}]", attr)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// Measure rendered columns and cards to find the drop target for the
/// dragged card at pointer (x, y)
fn resolve_target<Id: DndId>(dnd: &DndSignals<Id>, dragged: Id, x: i32, y: i32) -> Option<DropTarget<Id>> {
    let root = web_sys::window()?.document()?.document_element()?;
    let (start_x, start_y) = dnd.start_read.get_untracked();
    let active = dnd
        .origin_rect_read
        .get_untracked()
        .translate(f64::from(x - start_x), f64::from(y - start_y));

    let columns: Vec<(web_sys::Element, Rect)> = elements(&root, COLUMN_ATTR)
        .into_iter()
        .map(|el| {
            let rect = Rect::from_dom(&el.get_bounding_client_rect());
            (el, rect)
        })
        .collect();
    let candidates: Vec<(usize, Rect)> = columns.iter().enumerate().map(|(i, (_, r))| (i, *r)).collect();
    let (column_el, _) = &columns[closest_corners(&active, &candidates)?];
    let column = parse_attr::<Id>(column_el, COLUMN_ATTR)?;

    let cards: Vec<Rect> = elements(column_el, CARD_ATTR)
        .into_iter()
        .filter(|el| parse_attr::<Id>(el, CARD_ATTR) != Some(dragged))
        .map(|el| Rect::from_dom(&el.get_bounding_client_rect()))
        .collect();

    Some(DropTarget {
        column,
        index: drop_index(active.mid_y(), &cards),
    })
}

/// Document mousemove: starts the drag past the threshold, then tracks the target
fn bind_global_mousemove<Id: DndId>(dnd: DndSignals<Id>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id_read.get_untracked() else {
            return;
        };
        let (x, y) = (ev.client_x(), ev.client_y());

        if dnd.dragging_id_read.get_untracked().is_none() {
            let (start_x, start_y) = dnd.start_read.get_untracked();
            let dx = (x - start_x).abs();
            let dy = (y - start_y).abs();
            if dx <= DRAG_THRESHOLD_PX && dy <= DRAG_THRESHOLD_PX {
                return;
            }
            dnd.dragging_id_write.set(Some(pending));
        }

        dnd.pointer_write.set((x, y));
        let target = resolve_target(&dnd, pending, x, y);
        if dnd.drop_target_read.get_untracked() != target {
            dnd.drop_target_write.set(target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection (also binds mousemove)
pub fn bind_global_mouseup<Id, F>(dnd: DndSignals<Id>, on_drop: F)
where
    Id: DndId,
    F: Fn(Id, DropTarget<Id>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        // A plain click never started dragging; let its click event through
        if dragging_id.is_none() {
            dnd.pending_id_write.set(None);
            return;
        }
        end_drag(&dnd);

        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_corners_picks_overlapping_column() {
        let columns = [
            (1u32, Rect::new(0.0, 0.0, 200.0, 600.0)),
            (2u32, Rect::new(220.0, 0.0, 200.0, 600.0)),
            (3u32, Rect::new(440.0, 0.0, 200.0, 600.0)),
        ];
        let card = Rect::new(250.0, 40.0, 180.0, 60.0);
        assert_eq!(closest_corners(&card, &columns), Some(2));
    }

    #[test]
    fn test_closest_corners_empty() {
        let card = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(closest_corners::<u32>(&card, &[]), None);
    }

    #[test]
    fn test_drop_index_uses_card_midpoints() {
        let cards = [
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(0.0, 50.0, 100.0, 40.0),
            Rect::new(0.0, 100.0, 100.0, 40.0),
        ];
        assert_eq!(drop_index(5.0, &cards), 0);
        assert_eq!(drop_index(30.0, &cards), 1);
        assert_eq!(drop_index(75.0, &cards), 2);
        assert_eq!(drop_index(500.0, &cards), 3);
        assert_eq!(drop_index(10.0, &[]), 0);
    }

    #[test]
    fn test_translate_keeps_size() {
        let moved = Rect::new(10.0, 10.0, 50.0, 20.0).translate(5.0, -5.0);
        assert_eq!(moved, Rect::new(15.0, 5.0, 50.0, 20.0));
        assert_eq!(moved.mid_y(), 15.0);
    }
}
