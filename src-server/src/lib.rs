//! ProjeX Server
//!
//! Hosts the built web app and runs the session gate in front of it.

pub mod auth;
pub mod config;
pub mod domain;
pub mod gate;
pub mod routes;

use std::sync::Arc;

use axum::{middleware, routing::post, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use auth::SessionProvider;
use config::Config;
use domain::GateError;
use gate::public_paths::{PublicPaths, PUBLIC_PATHS};

/// Application state shared across handlers and the gate
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn SessionProvider>,
    pub public_paths: Arc<PublicPaths>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn SessionProvider>) -> Result<Self, GateError> {
        Ok(Self {
            config: Arc::new(config),
            provider,
            public_paths: Arc::new(PublicPaths::new(PUBLIC_PATHS)?),
        })
    }
}

/// Auth form routes plus the static bundle, with unknown paths served
/// `index.html` so the app can route them
pub fn create_router(state: AppState) -> Router {
    let dist = &state.config.dist_dir;
    let static_files = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/auth/login", post(routes::login))
        .route("/auth/logout", post(routes::logout))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(state.clone(), gate::session_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
