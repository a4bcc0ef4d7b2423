//! Backend Bindings
//!
//! Frontend bindings to the hosted backend (REST table API + auth API),
//! organized by domain.

mod auth;
mod columns;
mod projects;
mod tasks;
mod users;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use auth::*;
pub use columns::*;
pub use projects::*;
pub use tasks::*;
pub use users::*;

/// Cookie holding the backend access token
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Errors surfaced by backend calls
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Supabase URL or Key is missing")]
    Config,
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Build-time backend location
#[derive(Debug, Clone, Copy)]
pub struct BackendConfig {
    pub url: &'static str,
    pub anon_key: &'static str,
}

impl BackendConfig {
    pub fn load() -> ApiResult<Self> {
        match (
            option_env!("PROJEX_SUPABASE_URL"),
            option_env!("PROJEX_SUPABASE_ANON_KEY"),
        ) {
            (Some(url), Some(anon_key)) if !url.is_empty() && !anon_key.is_empty() => Ok(Self {
                url: url.trim_end_matches('/'),
                anon_key,
            }),
            _ => Err(ApiError::Config),
        }
    }
}

/// Table endpoint, e.g. `rest("projects")`
fn rest(config: &BackendConfig, table: &str) -> String {
    format!("{}/rest/v1/{}", config.url, table)
}

/// Attach key and bearer headers. Signed-in users send their access token.
fn authorize(config: &BackendConfig, req: RequestBuilder) -> RequestBuilder {
    let bearer = auth::access_token().unwrap_or_else(|| config.anon_key.to_string());
    req.header("apikey", config.anon_key)
        .header("Authorization", format!("Bearer {}", bearer))
}

#[derive(Deserialize)]
struct BackendErrorBody {
    #[serde(alias = "msg", alias = "error_description")]
    message: Option<String>,
}

/// Map non-2xx responses to `ApiError::Backend`, keeping the backend message
async fn check(res: Response) -> ApiResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<BackendErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<T> {
    let res = check(req.send().await?).await?;
    Ok(res.json::<T>().await?)
}

async fn send_empty(req: RequestBuilder) -> ApiResult<()> {
    check(req.send().await?).await?;
    Ok(())
}

/// PostgREST equality filter value
fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Return the single row of a `return=representation` insert/update
fn single<T>(rows: Vec<T>) -> ApiResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ApiError::Decode("empty result".to_string()))
}
