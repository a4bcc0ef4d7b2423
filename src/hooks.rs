//! Data Hooks

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::commands;
use crate::models::UserProfile;

/// Signed-in user, loaded once per mount
#[derive(Clone, Copy)]
pub struct CurrentUser {
    pub user_id: ReadSignal<Option<Uuid>>,
    pub user: ReadSignal<Option<UserProfile>>,
    pub is_loading: Signal<bool>,
    pub error: ReadSignal<Option<String>>,
}

pub fn use_current_user() -> CurrentUser {
    let (user_id, set_user_id) = signal(None::<Uuid>);
    let (session_loading, set_session_loading) = signal(true);
    let (user, set_user) = signal(None::<UserProfile>);
    let (user_loading, set_user_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Session results arriving after unmount are dropped
    let mounted = Arc::new(AtomicBool::new(true));
    {
        let mounted = mounted.clone();
        on_cleanup(move || mounted.store(false, Ordering::Relaxed));
    }

    spawn_local(async move {
        let session = commands::get_session().await;
        if !mounted.load(Ordering::Relaxed) {
            return;
        }
        set_user_id.set(session.map(|s| s.user.id));
        set_session_loading.set(false);
    });

    Effect::new(move |_| {
        let Some(id) = user_id.get() else {
            return;
        };
        set_user_loading.set(true);
        spawn_local(async move {
            match commands::fetch_user_details(id).await {
                Ok(profile) => {
                    set_user.set(Some(profile));
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[USER] Failed to fetch user details: {}", e).into());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_user_loading.set(false);
        });
    });

    CurrentUser {
        user_id,
        user,
        is_loading: Signal::derive(move || session_loading.get() || user_loading.get()),
        error,
    }
}
