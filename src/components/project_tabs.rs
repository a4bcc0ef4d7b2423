//! Project Tabs Component
//!
//! Active / Closed / All tabs with search and sort controls.

use leptos::prelude::*;

use crate::components::ui::TextInput;
use crate::models::Project;
use crate::projects::SortOrder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Active,
    Closed,
    All,
}

impl Tab {
    fn label(&self) -> &'static str {
        match self {
            Tab::Active => "Active",
            Tab::Closed => "Closed",
            Tab::All => "All",
        }
    }
}

/// Single project card with its lifecycle actions
#[component]
fn ProjectCard(
    project: Project,
    on_close: Callback<Project>,
    on_reopen: Callback<Project>,
    on_delete: Callback<Project>,
) -> impl IntoView {
    let href = format!("/projects/{}", project.id);
    let created = project.created_at.format("%b %d, %Y").to_string();
    let closed = project.closed;
    let for_close = project.clone();
    let for_reopen = project.clone();
    let for_delete = project.clone();

    view! {
        <div class=if closed { "project-card closed" } else { "project-card" }>
            <a class="project-card-link" href=href>
                <h3 class="project-name">{project.name.clone()}</h3>
                <p class="project-description">{project.description.clone()}</p>
                <span class="project-created">{created}</span>
            </a>
            <div class="project-actions">
                {if closed {
                    view! {
                        <button class="btn btn-outline btn-sm" on:click=move |_| on_reopen.run(for_reopen.clone())>
                            "Reopen"
                        </button>
                    }.into_any()
                } else {
                    view! {
                        <button class="btn btn-outline btn-sm" on:click=move |_| on_close.run(for_close.clone())>
                            "Close"
                        </button>
                    }.into_any()
                }}
                <button class="btn btn-destructive btn-sm" on:click=move |_| on_delete.run(for_delete.clone())>
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn ProjectTabs(
    active_projects: Memo<Vec<Project>>,
    closed_projects: Memo<Vec<Project>>,
    all_projects: Memo<Vec<Project>>,
    search_term: ReadSignal<String>,
    set_search_term: WriteSignal<String>,
    sort_order: ReadSignal<SortOrder>,
    on_sort: Callback<SortOrder>,
    on_close: Callback<Project>,
    on_reopen: Callback<Project>,
    on_delete: Callback<Project>,
) -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Active);

    let shown = move || match tab.get() {
        Tab::Active => active_projects.get(),
        Tab::Closed => closed_projects.get(),
        Tab::All => all_projects.get(),
    };
    let count = move |t: Tab| match t {
        Tab::Active => active_projects.with(|p| p.len()),
        Tab::Closed => closed_projects.with(|p| p.len()),
        Tab::All => all_projects.with(|p| p.len()),
    };

    view! {
        <div class="project-tabs">
            <div class="project-toolbar">
                <div class="tab-list" role="tablist">
                    {[Tab::Active, Tab::Closed, Tab::All].into_iter().map(|t| {
                        view! {
                            <button
                                role="tab"
                                class=move || if tab.get() == t { "tab active" } else { "tab" }
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()} " (" {move || count(t)} ")"
                            </button>
                        }
                    }).collect_view()}
                </div>

                <TextInput
                    value=search_term
                    set_value=set_search_term
                    placeholder="Search projects..."
                    class="project-search"
                />

                <div class="sort-toggle">
                    {[SortOrder::Newest, SortOrder::Oldest].into_iter().map(|order| {
                        view! {
                            <button
                                class=move || if sort_order.get() == order { "btn btn-sm active" } else { "btn btn-sm" }
                                on:click=move |_| on_sort.run(order)
                            >
                                {order.label()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </div>

            <div class="project-grid">
                <For
                    each=shown
                    key=|p| (p.id, p.closed)
                    children=move |project| {
                        view! {
                            <ProjectCard
                                project=project
                                on_close=on_close
                                on_reopen=on_reopen
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>

            <Show when=move || shown().is_empty()>
                <div class="empty-message">"No projects found"</div>
            </Show>
        </div>
    }
}
