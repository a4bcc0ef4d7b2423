//! Column Container Component
//!
//! One board lane: header actions, task cards and a new-task form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DndSignals;
use uuid::Uuid;

use crate::board::POSITION_STEP;
use crate::commands;
use crate::components::ui::{ConfirmDialog, TextInput};
use crate::components::TaskItem;
use crate::context::use_toast;
use crate::models::{Status, Task};

/// Inline title form appending a task to the column
#[component]
fn NewTaskForm(
    project_id: Uuid,
    status_id: Uuid,
    tasks: Signal<Vec<Task>>,
    on_task_created: Callback<Task>,
) -> impl IntoView {
    let toast = use_toast();
    let (title, set_title) = signal(String::new());
    let (adding, set_adding) = signal(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get().trim().to_string();
        if text.is_empty() { return; }
        let position = tasks.with(|list| list.last().map(|t| t.status_position + POSITION_STEP).unwrap_or(POSITION_STEP));

        spawn_local(async move {
            match commands::create_task(project_id, status_id, position, &text).await {
                Ok(task) => {
                    set_title.set(String::new());
                    set_adding.set(false);
                    on_task_created.run(task);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] Error creating task: {}", e).into());
                    toast.error("Failed to create task");
                }
            }
        });
    };

    view! {
        {move || if adding.get() {
            view! {
                <form class="new-task-form" on:submit=create_task>
                    <TextInput value=title set_value=set_title placeholder="Task title" />
                    <button type="submit" class="btn btn-sm">"Add"</button>
                    <button type="button" class="btn btn-sm btn-outline" on:click=move |_| set_adding.set(false)>"×"</button>
                </form>
            }.into_any()
        } else {
            view! {
                <button class="new-task-btn" on:click=move |_| set_adding.set(true)>"+ Add item"</button>
            }.into_any()
        }}
    }
}

#[component]
pub fn ColumnContainer(
    project_id: Uuid,
    project_name: String,
    column: Status,
    tasks: Signal<Vec<Task>>,
    dnd: DndSignals<Uuid>,
    is_over: Signal<bool>,
    on_task_created: Callback<Task>,
    on_column_update: Callback<Status>,
    on_column_delete: Callback<Uuid>,
    on_column_hide: Callback<Uuid>,
) -> impl IntoView {
    let toast = use_toast();
    let column_id = column.id;
    let (editing, set_editing) = signal(false);
    let (label, set_label) = signal(column.label.clone());
    let (confirm_delete, set_confirm_delete) = signal(false);
    let column = StoredValue::new(column);

    let save_label = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_label = label.get().trim().to_string();
        if new_label.is_empty() { return; }
        let mut updated = column.get_value();
        updated.label = new_label;

        spawn_local(async move {
            match commands::update_column(&updated).await {
                Ok(saved) => {
                    column.set_value(saved.clone());
                    on_column_update.run(saved);
                    toast.success("Column updated successfully");
                    set_editing.set(false);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] Error updating column: {}", e).into());
                    toast.error("Failed to update column");
                }
            }
        });
    };

    let delete_column = move || {
        spawn_local(async move {
            match commands::delete_column(column_id).await {
                Ok(()) => {
                    on_column_delete.run(column_id);
                    toast.success("Column deleted successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] Error deleting column: {}", e).into());
                    toast.error("Failed to delete column");
                }
            }
            set_confirm_delete.set(false);
        });
    };

    view! {
        <div
            class=move || if is_over.get() { "column-container over" } else { "column-container" }
            data-dnd-column=column_id.to_string()
        >
            <div class="column-header">
                {move || if editing.get() {
                    view! {
                        <form class="column-rename-form" on:submit=save_label>
                            <TextInput value=label set_value=set_label />
                            <button type="submit" class="btn btn-sm">"Save"</button>
                        </form>
                    }.into_any()
                } else {
                    let (name, color) = column.with_value(|c| (c.label.clone(), c.color.clone()));
                    view! {
                        <span class="column-color-dot" style=format!("background-color: {};", color)></span>
                        <span class="column-label">{name}</span>
                        <span class="column-count">{move || tasks.with(|t| t.len())}</span>
                    }.into_any()
                }}
                <div class="column-actions">
                    <button class="icon-btn" title="Rename" on:click=move |_| set_editing.update(|v| *v = !*v)>"✎"</button>
                    <button class="icon-btn" title="Hide column" on:click=move |_| on_column_hide.run(column_id)>"◌"</button>
                    <button class="icon-btn" title="Delete column" on:click=move |_| set_confirm_delete.set(true)>"×"</button>
                </div>
            </div>

            <div class="column-tasks">
                <For
                    each=move || tasks.get()
                    key=|t| (t.id, t.status_position.to_bits(), t.title.clone())
                    children={
                        let project_name = project_name.clone();
                        move |task| view! { <TaskItem task=task project_name=project_name.clone() dnd=dnd /> }
                    }
                />
            </div>

            <NewTaskForm
                project_id=project_id
                status_id=column_id
                tasks=tasks
                on_task_created=on_task_created
            />

            <ConfirmDialog
                open=confirm_delete
                title=Signal::derive(|| "Delete column".to_string())
                description=Signal::derive(move || column.with_value(|c| format!("Delete the \"{}\" column?", c.label)))
                confirm_label="Delete"
                destructive=true
                on_open_change=Callback::new(move |open: bool| set_confirm_delete.set(open))
                on_confirm=Callback::new(move |_| delete_column())
            />
        </div>
    }
}
