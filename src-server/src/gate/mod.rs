//! Session Gate
//!
//! Middleware run on every request: resolves the session from the auth
//! cookies, sends anonymous visitors of private pages to `/login` and
//! signed-in visitors of the login pages back to where they were going.

pub mod cookies;
pub mod public_paths;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::path::Path;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use crate::auth::resolve_session;
use crate::AppState;
use cookies::{AuthCookies, SetCookie};
use public_paths::PublicPaths;

/// Pages a signed-in user is bounced away from
const AUTH_PAGES: &[&str] = &["/login", "/create-account"];

/// Outcome of the gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    /// No session on a private page
    RedirectToLogin { next: String },
    /// Session present on a login page
    RedirectAway { to: String },
}

/// The login and logout form posts, matched exactly
pub fn is_gate_exempt(method: &Method, path: &str) -> bool {
    *method == Method::POST && matches!(path, "/auth/login" | "/auth/logout")
}

/// Relative bundle path for a request path, or `None` for anything that could
/// leave the dist dir or names the page shell.
fn bundle_relative(path: &str) -> Option<&str> {
    let rel = path.strip_prefix('/')?;
    if rel.is_empty() || rel.contains('\\') || rel == "index.html" {
        return None;
    }
    if rel.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return None;
    }
    Some(rel)
}

/// Static files that exist in the built bundle skip the gate
pub async fn is_bundle_file(dist_dir: &Path, path: &str) -> bool {
    let Some(rel) = bundle_relative(path) else {
        return false;
    };
    tokio::fs::metadata(dist_dir.join(rel))
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Only same-site absolute paths are followed; anything else goes home
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n.to_string(),
        _ => "/".to_string(),
    }
}

pub fn decide(path: &str, next: Option<&str>, has_session: bool, public: &PublicPaths) -> GateDecision {
    if !has_session && !public.is_public(path) {
        return GateDecision::RedirectToLogin {
            next: path.to_string(),
        };
    }
    if has_session && AUTH_PAGES.contains(&path) {
        return GateDecision::RedirectAway { to: safe_next(next) };
    }
    GateDecision::Pass
}

/// Value of `name` in a raw query string, percent-decoded
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned()
        })
        .filter(|v| !v.is_empty())
}

/// `/login?next=<path>`
pub fn login_url(next: &str) -> String {
    format!("/login?next={}", utf8_percent_encode(next, NON_ALPHANUMERIC))
}

/// 307 keeps the method; the gate only ever redirects page loads
fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

pub fn append_cookies(response: &mut Response, cookies: &[SetCookie]) {
    let headers = response.headers_mut();
    for value in cookies.iter().filter_map(SetCookie::header_value) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Session gate middleware
pub async fn session_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_gate_exempt(request.method(), &path) || is_bundle_file(&state.config.dist_dir, &path).await {
        return next.run(request).await;
    }

    let cookies = AuthCookies::from_headers(request.headers());
    let resolved = resolve_session(state.provider.as_ref(), &cookies, state.config.secure_cookies).await;
    let next_param = query_param(request.uri().query(), "next");

    let decision = decide(
        &path,
        next_param.as_deref(),
        resolved.session.is_some(),
        &state.public_paths,
    );

    let mut response = match decision {
        GateDecision::Pass => next.run(request).await,
        GateDecision::RedirectToLogin { next } => {
            tracing::debug!("No session for {}, redirecting to login", next);
            redirect(&login_url(&next))
        }
        GateDecision::RedirectAway { to } => {
            tracing::debug!("Session present on {}, redirecting to {}", path, to);
            redirect(&to)
        }
    };
    append_cookies(&mut response, &resolved.set_cookies);
    response
}
