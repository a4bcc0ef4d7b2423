//! Board Page
//!
//! Kanban board for one project. Task moves are applied optimistically and
//! rolled back when the backend rejects them; updates touching labels, size
//! or priority re-fetch the whole task list instead of patching it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DropTarget};
use reactive_stores::Store;
use uuid::Uuid;

use crate::board::{self, DropMove, TaskChanges, UpdatePlan};
use crate::commands::{self, ApiResult};
use crate::components::{ColumnContainer, CreateFieldOptionModal, DragOverlay, TaskDetailsDrawer};
use crate::context::{use_toast, TaskDetailsContext, ToastContext};
use crate::models::{CustomFieldData, Task};
use crate::store::{self as board_store, BoardState, BoardStateStoreFields, BoardStore};

/// Re-fetch all tasks unless a reload is already running
fn reload_tasks(store: BoardStore, project_id: Uuid, toast: ToastContext) {
    if !board_store::store_begin_reload(&store) {
        return;
    }
    spawn_local(async move {
        match commands::list_tasks(project_id).await {
            Ok(tasks) => board_store::store_set_tasks(&store, tasks),
            Err(e) => {
                web_sys::console::error_1(&format!("[BOARD] Error reloading tasks: {}", e).into());
                toast.error("Failed to update task");
            }
        }
        board_store::store_end_reload(&store);
    });
}

/// Persist every slot a drop assigned, dragged task first
async fn save_drop(mv: &DropMove) -> ApiResult<()> {
    for slot in mv.slots() {
        let Some(status_id) = slot.status_id else { continue };
        commands::update_task_position(slot.task_id, status_id, slot.status_position).await?;
    }
    Ok(())
}

#[component]
pub fn BoardPage(project_id: Uuid) -> impl IntoView {
    let toast = use_toast();
    let store: BoardStore = Store::new(BoardState::default());
    provide_context(store);

    let (project_name, set_project_name) = signal(String::new());
    let (loaded, set_loaded) = signal(false);
    let (is_loading, set_is_loading) = signal(false);

    // Initial load: project, columns, tasks
    spawn_local(async move {
        match commands::get_project(project_id).await {
            Ok(project) => set_project_name.set(project.name),
            Err(e) => web_sys::console::error_1(&format!("[BOARD] Error loading project: {}", e).into()),
        }
        let columns = commands::list_columns(project_id).await;
        let tasks = commands::list_tasks(project_id).await;
        match (columns, tasks) {
            (Ok(columns), Ok(tasks)) => {
                web_sys::console::log_1(&format!("[BOARD] Loaded {} columns, {} tasks", columns.len(), tasks.len()).into());
                store.set(BoardState::new(columns, tasks));
            }
            (Err(e), _) | (_, Err(e)) => {
                web_sys::console::error_1(&format!("[BOARD] Error loading board: {}", e).into());
                toast.error("Failed to load board");
            }
        }
        set_loaded.set(true);
    });

    // Task details drawer reports saved changes here
    let handle_task_update = Callback::new(move |(task_id, changes): (Uuid, TaskChanges)| {
        match board::plan_task_update(&changes) {
            UpdatePlan::Reload => reload_tasks(store, project_id, toast),
            UpdatePlan::Patch => board_store::store_patch_task(&store, task_id, &changes),
        }
    });
    let selected_task = signal(None::<Uuid>);
    provide_context(TaskDetailsContext::new(selected_task, handle_task_update));

    // Drag and drop
    let dnd = create_dnd_signals::<Uuid>();
    bind_global_mouseup(dnd, move |task_id: Uuid, target: DropTarget<Uuid>| {
        let sorted = store.tasks().with_untracked(|tasks| board::sort_tasks(tasks));
        let Some(mv) = board::resolve_drop(&sorted, task_id, target.column, target.index) else {
            return;
        };
        if !mv.renumbered.is_empty() {
            web_sys::console::log_1(&format!("[BOARD] Renumbering {} tasks", mv.renumbered.len()).into());
        }
        let previous = board_store::store_apply_drop(&store, &mv);
        spawn_local(async move {
            if let Err(e) = save_drop(&mv).await {
                web_sys::console::error_1(&format!("[BOARD] Error moving task: {}", e).into());
                board_store::store_revert_drop(&store, &mv, &previous);
                toast.error("Failed to move task");
            }
        });
    });

    let sorted_tasks = Memo::new(move |_| store.tasks().with(|tasks| board::sort_tasks(tasks)));
    let visible_columns = Memo::new(move |_| {
        let hidden = store.hidden_columns().get();
        store.columns().with(|columns| board::visible_columns(columns, &hidden))
    });
    let hidden_count = move || store.hidden_columns().with(|h| h.len());

    let handle_create_column = Callback::new(move |data: CustomFieldData| {
        set_is_loading.set(true);
        spawn_local(async move {
            match commands::create_column(project_id, &data).await {
                Ok(column) => {
                    board_store::store_add_column(&store, column);
                    toast.success("Column created successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] Error creating column: {}", e).into());
                    toast.error("Failed to create column");
                }
            }
            set_is_loading.set(false);
        });
    });

    view! {
        <div class="board-page">
            <h1>{move || project_name.get()}</h1>

            <Show when=move || { hidden_count() > 0 }>
                <div class="hidden-columns-notice">
                    <button class="btn btn-outline btn-sm" on:click=move |_| board_store::store_show_hidden_columns(&store)>
                        "Show hidden columns (" {hidden_count} ")"
                    </button>
                </div>
            </Show>

            <Show
                when=move || loaded.get()
                fallback=|| view! { <div class="loading">"Loading board..."</div> }
            >
                <div class="board-scroll">
                    <div class={move || if hidden_count() > 0 { "board-columns with-notice" } else { "board-columns" }}>
                        <For
                            each=move || visible_columns.get()
                            key=|c| (c.id, c.label.clone(), c.color.clone())
                            children=move |column| {
                                let column_id = column.id;
                                view! {
                                    <ColumnContainer
                                        project_id=project_id
                                        project_name=project_name.get_untracked()
                                        column=column
                                        tasks=Signal::derive(move || sorted_tasks.with(|s| board::column_tasks(s, column_id)))
                                        dnd=dnd
                                        is_over=Signal::derive(move || dnd.over_column() == Some(column_id))
                                        on_task_created=Callback::new(move |task: Task| board_store::store_add_task(&store, task))
                                        on_column_update=Callback::new(move |c| board_store::store_update_column(&store, c))
                                        on_column_delete=Callback::new(move |id| board_store::store_remove_column(&store, id))
                                        on_column_hide=Callback::new(move |id| board_store::store_hide_column(&store, id))
                                    />
                                }
                            }
                        />
                    </div>

                    <CreateFieldOptionModal
                        title="New Column"
                        disabled=is_loading
                        on_submit=handle_create_column
                    />
                </div>

                <DragOverlay
                    tasks=Signal::derive(move || store.tasks().get())
                    project_name=project_name.get_untracked()
                    dnd=dnd
                />
            </Show>

            <TaskDetailsDrawer project_id=project_id />
        </div>
    }
}
