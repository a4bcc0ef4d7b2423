//! Auth Form Handlers
//!
//! `POST /auth/login` and `POST /auth/logout`. Both answer with a 303 so the
//! browser follows up with a plain page load through the gate.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::domain::SessionError;
use crate::gate::cookies::{clear_cookies, session_cookies, AuthCookies};
use crate::gate::{append_cookies, safe_next};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn see_other(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// `/login?error=<message>[&next=<path>]`
fn login_error_url(message: &str, next: Option<&str>) -> String {
    let mut url = format!("/login?error={}", utf8_percent_encode(message, NON_ALPHANUMERIC));
    if let Some(next) = next.filter(|n| !n.is_empty()) {
        url.push_str("&next=");
        url.push_str(&utf8_percent_encode(next, NON_ALPHANUMERIC).to_string());
    }
    url
}

pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.provider.sign_in(form.email.trim(), &form.password).await {
        Ok(session) => {
            tracing::info!("Signed in user {}", session.user.id);
            let mut response = see_other(&safe_next(query.next.as_deref()));
            append_cookies(&mut response, &session_cookies(&session, state.config.secure_cookies));
            response
        }
        Err(SessionError::Unauthorized(message)) => {
            tracing::info!("Sign-in rejected: {}", message);
            see_other(&login_error_url(&message, query.next.as_deref()))
        }
        Err(e) => {
            tracing::error!("Sign-in failed: {}", e);
            see_other(&login_error_url("Unable to sign in right now", query.next.as_deref()))
        }
    }
}

/// Revokes the session when possible; cookies are cleared either way
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookies = AuthCookies::from_headers(&headers);
    if let Some(token) = &cookies.access_token {
        if let Err(e) = state.provider.sign_out(token).await {
            tracing::warn!("Failed to revoke session: {}", e);
        }
    }
    let mut response = see_other("/login");
    append_cookies(&mut response, &clear_cookies(state.config.secure_cookies));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_url() {
        assert_eq!(
            login_error_url("Invalid login credentials", Some("/projects")),
            "/login?error=Invalid%20login%20credentials&next=%2Fprojects"
        );
        assert_eq!(login_error_url("x", Some("")), "/login?error=x");
        assert_eq!(login_error_url("x", None), "/login?error=x");
    }
}
