//! Public Pages

use leptos::prelude::*;

use crate::hooks::use_current_user;

#[component]
pub fn HomePage() -> impl IntoView {
    let current_user = use_current_user();

    view! {
        <div class="home-page">
            <h1>"ProjeX"</h1>
            <p>"Plan projects, track tasks, ship together."</p>
            {move || if current_user.is_loading.get() {
                view! { <span class="loading">"..."</span> }.into_any()
            } else if current_user.user_id.get().is_some() {
                let name = current_user.user.get().and_then(|u| u.name).unwrap_or_default();
                view! {
                    <a class="btn btn-primary" href="/projects">
                        {format!("Continue as {}", name).trim_end().to_string()}
                    </a>
                }.into_any()
            } else {
                view! { <a class="btn btn-primary" href="/login">"Sign in"</a> }.into_any()
            }}
        </div>
    }
}

/// Credentials form; the session gate handles `POST /auth/login`
#[component]
pub fn LoginPage(next: Option<String>, error: Option<String>) -> impl IntoView {
    let action = match &next {
        Some(next) => format!(
            "/auth/login?next={}",
            percent_encoding::utf8_percent_encode(next, percent_encoding::NON_ALPHANUMERIC)
        ),
        None => "/auth/login".to_string(),
    };

    view! {
        <div class="login-page">
            <h1>"Sign in"</h1>
            {error.map(|message| view! { <p class="form-error">{message}</p> })}
            <form class="login-form" method="post" action=action>
                <input type="email" name="email" class="input" placeholder="Email" required=true />
                <input type="password" name="password" class="input" placeholder="Password" required=true />
                <button type="submit" class="btn btn-primary">"Sign in"</button>
            </form>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <a href="/projects">"Back to projects"</a>
        </div>
    }
}
