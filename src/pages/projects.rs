//! Projects Page
//!
//! Project list with search/sort and close / reopen / delete actions.
//! The local list is mutated directly after each successful backend call.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::ui::ConfirmDialog;
use crate::components::ProjectTabs;
use crate::context::use_toast;
use crate::hooks::use_current_user;
use crate::models::Project;
use crate::projects::{self, ProjectChanges, SortOrder};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let toast = use_toast();
    let current_user = use_current_user();

    let (search_term, set_search_term) = signal(String::new());
    let (sort_order, set_sort_order) = signal(SortOrder::Newest);
    let (projects_list, set_projects_list) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);

    let (project_to_close, set_project_to_close) = signal(None::<Project>);
    let (project_to_reopen, set_project_to_reopen) = signal(None::<Project>);
    let (project_to_delete, set_project_to_delete) = signal(None::<Project>);

    // Load projects once the user is known
    Effect::new(move |_| {
        let Some(user_id) = current_user.user_id.get() else {
            if !current_user.is_loading.get() {
                set_loading.set(false);
            }
            return;
        };
        spawn_local(async move {
            match commands::list_projects(user_id).await {
                Ok(loaded) => {
                    web_sys::console::log_1(&format!("[PROJECTS] Loaded {} projects", loaded.len()).into());
                    set_projects_list.set(loaded);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[PROJECTS] Error loading projects: {}", e).into());
                    toast.error("Failed to load projects.");
                }
            }
            set_loading.set(false);
        });
    });

    let filtered_projects = Memo::new(move |_| {
        projects_list.with(|list| projects::filter_and_sort(list, &search_term.get(), sort_order.get()))
    });
    let active_projects = Memo::new(move |_| filtered_projects.with(|f| projects::partition(f).0));
    let closed_projects = Memo::new(move |_| filtered_projects.with(|f| projects::partition(f).1));

    let update_project_state = move |id, changes: ProjectChanges| {
        set_projects_list.update(|list| projects::apply_changes(list, id, &changes));
    };

    let handle_close_project = move || {
        let Some(project) = project_to_close.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match commands::close_project(project.id).await {
                Ok(()) => {
                    update_project_state(project.id, ProjectChanges::closed(true));
                    toast.success("Project closed successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[PROJECTS] Error closing project: {}", e).into());
                    let message = match e {
                        commands::ApiError::Backend { message, .. } => message,
                        _ => "Failed to close project. Please try again.".to_string(),
                    };
                    toast.error(&message);
                }
            }
            set_project_to_close.set(None);
        });
    };

    let handle_reopen_project = move || {
        let Some(project) = project_to_reopen.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match commands::reopen_project(project.id).await {
                Ok(()) => {
                    update_project_state(project.id, ProjectChanges::closed(false));
                    toast.success("Project reopened successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[PROJECTS] Error reopening project: {}", e).into());
                    toast.error("Failed to reopen project. Please try again.");
                }
            }
            set_project_to_reopen.set(None);
        });
    };

    let handle_delete_project = move || {
        let Some(project) = project_to_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match commands::delete_project(project.id).await {
                Ok(()) => {
                    set_projects_list.update(|list| projects::remove(list, project.id));
                    toast.success("Project deleted successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[PROJECTS] Error deleting project: {}", e).into());
                    toast.error("Failed to delete project.");
                }
            }
            set_project_to_delete.set(None);
        });
    };

    view! {
        <div class="projects-page">
            <h1>"Projects"</h1>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading projects..."</div> }
            >
                <ProjectTabs
                    active_projects=active_projects
                    closed_projects=closed_projects
                    all_projects=filtered_projects
                    search_term=search_term
                    set_search_term=set_search_term
                    sort_order=sort_order
                    on_sort=Callback::new(move |order| set_sort_order.set(order))
                    on_close=Callback::new(move |p| set_project_to_close.set(Some(p)))
                    on_reopen=Callback::new(move |p| set_project_to_reopen.set(Some(p)))
                    on_delete=Callback::new(move |p| set_project_to_delete.set(Some(p)))
                />
            </Show>

            <ConfirmDialog
                open=Signal::derive(move || project_to_close.with(|p| p.is_some()))
                title=Signal::derive(|| "Close project".to_string())
                description=Signal::derive(|| "Closed projects move to the Closed tab. You can reopen them at any time.".to_string())
                confirm_label="Close project"
                on_open_change=Callback::new(move |open: bool| if !open { set_project_to_close.set(None) })
                on_confirm=Callback::new(move |_| handle_close_project())
            />

            <ConfirmDialog
                open=Signal::derive(move || project_to_delete.with(|p| p.is_some()))
                title=Signal::derive(|| "Delete project".to_string())
                description=Signal::derive(move || {
                    let name = project_to_delete.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default());
                    format!("\"{}\" and all of its tasks will be permanently deleted. This cannot be undone.", name)
                })
                confirm_label="Delete"
                destructive=true
                on_open_change=Callback::new(move |open: bool| if !open { set_project_to_delete.set(None) })
                on_confirm=Callback::new(move |_| handle_delete_project())
            />

            <ConfirmDialog
                open=Signal::derive(move || project_to_reopen.with(|p| p.is_some()))
                title=Signal::derive(|| "Reopen project".to_string())
                description=Signal::derive(|| "The project will move back to the Active tab.".to_string())
                confirm_label="Reopen"
                on_open_change=Callback::new(move |open: bool| if !open { set_project_to_reopen.set(None) })
                on_confirm=Callback::new(move |_| handle_reopen_project())
            />
        </div>
    }
}
