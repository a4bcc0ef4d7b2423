//! Auth Cookies
//!
//! Reading the token cookies from a request and writing refreshed ones back.

use axum::http::header::{HeaderMap, HeaderValue, COOKIE};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::domain::Session;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

/// Refresh cookies outlive the access token; the auth service decides validity
const REFRESH_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 400;

/// Characters not allowed raw in a cookie value
const COOKIE_VALUE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b',').add(b';').add(b'\\').add(b'%');

/// Token cookies present on a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthCookies {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = Self::default();
        for header in headers.get_all(COOKIE) {
            let Ok(raw) = header.to_str() else { continue };
            for (name, value) in raw
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
            {
                let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
                if value.is_empty() {
                    continue;
                }
                match name {
                    ACCESS_TOKEN_COOKIE => jar.access_token = Some(value),
                    REFRESH_TOKEN_COOKIE => jar.refresh_token = Some(value),
                    _ => {}
                }
            }
        }
        jar
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// One `Set-Cookie` header to attach to the response
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    pub name: &'static str,
    pub value: String,
    pub max_age: i64,
    pub secure: bool,
}

impl SetCookie {
    pub fn header_value(&self) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name,
            utf8_percent_encode(&self.value, COOKIE_VALUE),
            self.max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }
}

/// Cookies persisting a (new) session
pub fn session_cookies(session: &Session, secure: bool) -> Vec<SetCookie> {
    vec![
        SetCookie {
            name: ACCESS_TOKEN_COOKIE,
            value: session.access_token.clone(),
            max_age: session.expires_in,
            secure,
        },
        SetCookie {
            name: REFRESH_TOKEN_COOKIE,
            value: session.refresh_token.clone(),
            max_age: REFRESH_MAX_AGE_SECS,
            secure,
        },
    ]
}

/// Cookies removing a session
pub fn clear_cookies(secure: bool) -> Vec<SetCookie> {
    [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]
        .into_iter()
        .map(|name| SetCookie {
            name,
            value: String::new(),
            max_age: 0,
            secure,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthUser;
    use uuid::Uuid;

    #[test]
    fn test_reads_token_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sb-access-token=a%3D1"));
        headers.append(COOKIE, HeaderValue::from_static("sb-refresh-token=r1"));

        let jar = AuthCookies::from_headers(&headers);
        assert_eq!(jar.access_token.as_deref(), Some("a=1"));
        assert_eq!(jar.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sb-access-token=; sb-refresh-token="));
        assert!(AuthCookies::from_headers(&headers).is_empty());
    }

    #[test]
    fn test_session_cookie_headers() {
        let session = Session {
            access_token: "a b".to_string(),
            refresh_token: "r1".to_string(),
            expires_in: 3600,
            user: AuthUser {
                id: Uuid::from_u128(1),
                email: None,
            },
        };
        let cookies = session_cookies(&session, true);
        assert_eq!(
            cookies[0].header_value().unwrap(),
            "sb-access-token=a%20b; Path=/; Max-Age=3600; SameSite=Lax; Secure"
        );
        assert_eq!(cookies[1].max_age, REFRESH_MAX_AGE_SECS);

        let cleared = clear_cookies(false);
        assert_eq!(
            cleared[1].header_value().unwrap(),
            "sb-refresh-token=; Path=/; Max-Age=0; SameSite=Lax"
        );
    }
}
