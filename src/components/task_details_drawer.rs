//! Task Details Drawer
//!
//! Side drawer for the selected task: title, description and the
//! label / size / priority options.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::board::TaskChanges;
use crate::commands::{self, TaskOptions};
use crate::components::ui::TextInput;
use crate::context::{use_task_details, use_toast};
use crate::models::{CustomFieldOption, Task};
use crate::store::{store_task_memo, use_board_store};

fn sorted_options(map: &std::collections::HashMap<Uuid, CustomFieldOption>) -> Vec<CustomFieldOption> {
    let mut list: Vec<CustomFieldOption> = map.values().cloned().collect();
    list.sort_by(|a, b| a.label.cmp(&b.label));
    list
}

/// Single-choice select for size / priority
#[component]
fn OptionSelect(
    #[prop(into)] name: String,
    options: Signal<Vec<CustomFieldOption>>,
    current: Option<Uuid>,
    on_change: Callback<Option<CustomFieldOption>>,
) -> impl IntoView {
    view! {
        <label class="drawer-field">
            <span>{name}</span>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                let picked = options.with(|list| list.iter().find(|o| o.id.to_string() == value).cloned());
                on_change.run(picked);
            }>
                <option value="" selected=current.is_none()>"None"</option>
                {move || options.get().into_iter().map(|o| {
                    let selected = Some(o.id) == current;
                    view! { <option value=o.id.to_string() selected=selected>{o.label}</option> }
                }).collect_view()}
            </select>
        </label>
    }
}

#[component]
fn DrawerBody(task: Task, options: Signal<TaskOptions>) -> impl IntoView {
    let details = use_task_details();
    let toast = use_toast();
    let task_id = task.id;
    let (title, set_title) = signal(task.title.clone());
    let (description, set_description) = signal(task.description.clone().unwrap_or_default());
    let current_labels: Vec<Uuid> = task.labels.iter().map(|l| l.id).collect();

    // Save to the backend, then let the board reconcile its local copy
    let save = move |changes: TaskChanges| {
        spawn_local(async move {
            match commands::update_task(task_id, &changes).await {
                Ok(()) => details.on_task_update.run((task_id, changes)),
                Err(e) => {
                    web_sys::console::error_1(&format!("[BOARD] Error updating task: {}", e).into());
                    toast.error("Failed to update task");
                }
            }
        });
    };

    let save_text = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_title = title.get().trim().to_string();
        if new_title.is_empty() { return; }
        save(TaskChanges {
            title: Some(new_title),
            description: Some(description.get()),
            ..Default::default()
        });
    };

    let labels = Signal::derive(move || options.with(|o| sorted_options(&o.labels)));
    let sizes = Signal::derive(move || options.with(|o| sorted_options(&o.sizes)));
    let priorities = Signal::derive(move || options.with(|o| sorted_options(&o.priorities)));

    let toggle_label = {
        let current_labels = current_labels.clone();
        move |label: CustomFieldOption| {
            let mut ids = current_labels.clone();
            if let Some(pos) = ids.iter().position(|id| *id == label.id) {
                ids.remove(pos);
            } else {
                ids.push(label.id);
            }
            let picked = options.with(|o| ids.iter().filter_map(|id| o.labels.get(id).cloned()).collect());
            save(TaskChanges {
                labels: Some(picked),
                ..Default::default()
            });
        }
    };

    view! {
        <form class="drawer-form" on:submit=save_text>
            <label class="drawer-field">
                <span>"Title"</span>
                <TextInput value=title set_value=set_title />
            </label>
            <label class="drawer-field">
                <span>"Description"</span>
                <textarea
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" class="btn btn-primary btn-sm">"Save"</button>
        </form>

        <div class="drawer-field">
            <span>"Labels"</span>
            <div class="label-picker">
                {move || labels.get().into_iter().map(|label| {
                    let active = current_labels.contains(&label.id);
                    let toggle = toggle_label.clone();
                    let style = format!("border-color: {};", label.color);
                    let text = label.label.clone();
                    view! {
                        <button
                            class=if active { "chip chip-label active" } else { "chip chip-label" }
                            style=style
                            on:click=move |_| toggle(label.clone())
                        >
                            {text}
                        </button>
                    }
                }).collect_view()}
            </div>
        </div>

        <OptionSelect
            name="Size"
            options=sizes
            current=task.size.as_ref().map(|s| s.id)
            on_change=Callback::new(move |size| save(TaskChanges { size: Some(size), ..Default::default() }))
        />
        <OptionSelect
            name="Priority"
            options=priorities
            current=task.priority.as_ref().map(|p| p.id)
            on_change=Callback::new(move |priority| save(TaskChanges { priority: Some(priority), ..Default::default() }))
        />
    }
}

#[component]
pub fn TaskDetailsDrawer(project_id: Uuid) -> impl IntoView {
    let details = use_task_details();
    let store = use_board_store();
    let (options, set_options) = signal(TaskOptions::default());

    // Option tables are loaded whenever the drawer opens
    Effect::new(move |_| {
        if details.selected_task.get().is_none() {
            return;
        }
        spawn_local(async move {
            match commands::list_options_for(project_id).await {
                Ok(loaded) => set_options.set(loaded),
                Err(e) => web_sys::console::error_1(&format!("[BOARD] Error loading task options: {}", e).into()),
            }
        });
    });

    // Rebuilt only when the selected task itself changes
    let selected = store_task_memo(store, details.selected_task.into());

    view! {
        {move || selected.get().map(|task| {
            view! {
                <aside class="task-drawer">
                    <div class="drawer-header">
                        <h2>{task.title.clone()}</h2>
                        <button class="icon-btn" on:click=move |_| details.close()>"×"</button>
                    </div>
                    <DrawerBody task=task options=options.into() />
                </aside>
            }
        })}
    }
}
