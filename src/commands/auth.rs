//! Auth Bindings
//!
//! Session lookup against the backend auth service.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

use super::{check, ApiResult, BackendConfig, ACCESS_TOKEN_COOKIE};
use crate::models::AuthUser;

/// Current browser session (read-only view)
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// Find a cookie in a `document.cookie` style string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

/// Access token from the browser cookie jar
pub fn access_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
    cookie_value(&cookies, ACCESS_TOKEN_COOKIE)
}

async fn fetch_session(config: &BackendConfig, token: String) -> ApiResult<Session> {
    let res = reqwest::Client::new()
        .get(format!("{}/auth/v1/user", config.url))
        .header("apikey", config.anon_key)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;
    let user = check(res).await?.json::<AuthUser>().await?;
    Ok(Session {
        access_token: token,
        user,
    })
}

/// Resolve the current session. Every failure counts as "no session".
pub async fn get_session() -> Option<Session> {
    let config = match BackendConfig::load() {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::error_1(&format!("[AUTH] {}", e).into());
            return None;
        }
    };
    let token = access_token()?;
    match fetch_session(&config, token).await {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::error_1(&format!("[AUTH] Failed to get session: {}", e).into());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let jar = "theme=dark; sb-access-token=abc.def%3D; sb-refresh-token=r1";
        assert_eq!(cookie_value(jar, "sb-access-token").as_deref(), Some("abc.def="));
        assert_eq!(cookie_value(jar, "sb-refresh-token").as_deref(), Some("r1"));
        assert_eq!(cookie_value(jar, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        assert_eq!(cookie_value("sb-access-token=", "sb-access-token"), None);
        assert_eq!(cookie_value("", "sb-access-token"), None);
    }
}
