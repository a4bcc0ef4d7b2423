//! Task Item Component
//!
//! Draggable task card.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DndSignals};
use uuid::Uuid;

use crate::context::use_task_details;
use crate::models::Task;

/// Label, size and priority chips
#[component]
fn TaskBadges(task: Task) -> impl IntoView {
    let chip = |label: String, color: String, kind: &'static str| {
        view! {
            <span class=format!("chip chip-{}", kind) style=format!("border-color: {};", color)>
                {label}
            </span>
        }
    };

    view! {
        <div class="task-badges">
            {task.labels.into_iter().map(|l| chip(l.label, l.color, "label")).collect_view()}
            {task.size.map(|s| chip(s.label, s.color, "size"))}
            {task.priority.map(|p| chip(p.label, p.color, "priority"))}
        </div>
    }
}

#[component]
pub fn TaskItem(
    task: Task,
    project_name: String,
    dnd: DndSignals<Uuid>,
) -> impl IntoView {
    let details = use_task_details();
    let id = task.id;
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);

    let on_click = move |_: web_sys::MouseEvent| {
        // Ignore the click that ends a drag
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        details.open(id);
    };

    view! {
        <div
            class=move || if is_dragging() { "task-item dragging" } else { "task-item" }
            data-dnd-card=id.to_string()
            on:mousedown=make_on_mousedown(dnd, id)
            on:click=on_click
        >
            <div class="task-project">{project_name}</div>
            <div class="task-title">{task.title.clone()}</div>
            <TaskBadges task=task />
        </div>
    }
}

/// Floating copy of the dragged card following the pointer
#[component]
pub fn DragOverlay(
    tasks: Signal<Vec<Task>>,
    project_name: String,
    dnd: DndSignals<Uuid>,
) -> impl IntoView {
    let active_task = move || {
        let id = dnd.dragging_id_read.get()?;
        tasks.with(|list| list.iter().find(|t| t.id == id).cloned())
    };

    view! {
        {move || active_task().map(|task| {
            let (x, y) = dnd.pointer_read.get();
            view! {
                <div class="drag-overlay" style=format!("left: {}px; top: {}px;", x + 8, y + 8)>
                    <div class="task-item">
                        <div class="task-project">{project_name.clone()}</div>
                        <div class="task-title">{task.title.clone()}</div>
                        <TaskBadges task=task />
                    </div>
                </div>
            }
        })}
    }
}
