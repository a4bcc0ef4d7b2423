//! ProjeX Server binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use projex_server::auth::SupabaseAuth;
use projex_server::config::Config;
use projex_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ProjeX server");
    tracing::info!("Serving bundle from {:?}", config.dist_dir);
    tracing::info!("Auth service: {}", config.supabase_url);

    if !config.secure_cookies {
        tracing::warn!("PROJEX_SECURE_COOKIES is off; auth cookies are sent over plain HTTP");
    }
    if !config.dist_dir.join("index.html").exists() {
        tracing::warn!("No index.html in {:?}; run `trunk build` first", config.dist_dir);
    }

    let provider = Arc::new(SupabaseAuth::new(&config));
    let bind_addr = config.bind_addr;
    let state = AppState::new(config, provider)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
