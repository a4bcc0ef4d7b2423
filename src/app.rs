//! ProjeX Frontend App
//!
//! Root component: provides shared context and mounts the page for the
//! current URL.

use leptos::prelude::*;

use crate::components::ui::Toaster;
use crate::context::ToastContext;
use crate::pages::{BoardPage, HomePage, LoginPage, NotFoundPage, ProjectsPage};
use crate::routes::{current_route, Route};

#[component]
pub fn App() -> impl IntoView {
    provide_context(ToastContext::new());

    let route = current_route();
    web_sys::console::log_1(&format!("[APP] Mounting {:?}", route).into());

    let page = match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::Login { next, error } => view! { <LoginPage next=next error=error /> }.into_any(),
        Route::Projects => view! { <ProjectsPage /> }.into_any(),
        Route::Board(project_id) => view! { <BoardPage project_id=project_id /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    };

    view! {
        <div class="app-layout dark">
            <header class="app-header">
                <a class="app-logo" href="/">"ProjeX"</a>
                <nav>
                    <a href="/projects">"Projects"</a>
                    <form method="post" action="/auth/logout" class="logout-form">
                        <button type="submit" class="btn btn-outline btn-sm">"Sign out"</button>
                    </form>
                </nav>
            </header>
            <main class="main-content">{page}</main>
            <Toaster />
        </div>
    }
}
