//! Auth Service Client
//!
//! Abstract interface to the hosted auth service plus session resolution
//! for incoming requests.

mod supabase;

use async_trait::async_trait;

use crate::domain::{AuthUser, Session, SessionError};
use crate::gate::cookies::{clear_cookies, session_cookies, AuthCookies, SetCookie};

pub use supabase::SupabaseAuth;

/// Operations the gate needs from the auth service
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// User behind an access token
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, SessionError>;

    /// Exchange a refresh token for a new session
    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError>;

    /// Password sign-in
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError>;
}

/// Session for a request, plus cookies to write back on the response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSession {
    pub session: Option<Session>,
    pub set_cookies: Vec<SetCookie>,
}

/// Look up the session behind the request cookies, refreshing an expired
/// access token when a refresh token is available. Any failure resolves to
/// "no session".
pub async fn resolve_session(
    provider: &dyn SessionProvider,
    cookies: &AuthCookies,
    secure: bool,
) -> ResolvedSession {
    if cookies.is_empty() {
        return ResolvedSession::default();
    }

    if let Some(access) = &cookies.access_token {
        match provider.get_user(access).await {
            Ok(user) => {
                return ResolvedSession {
                    session: Some(Session {
                        access_token: access.clone(),
                        refresh_token: cookies.refresh_token.clone().unwrap_or_default(),
                        expires_in: 0,
                        user,
                    }),
                    set_cookies: Vec::new(),
                };
            }
            Err(SessionError::Unauthorized(reason)) => {
                tracing::debug!("Access token rejected, refreshing: {}", reason);
            }
            Err(e) => {
                tracing::warn!("Failed to get session: {}", e);
                return ResolvedSession::default();
            }
        }
    }

    let Some(refresh) = &cookies.refresh_token else {
        // Rejected access token without a refresh token cannot be renewed
        return ResolvedSession {
            session: None,
            set_cookies: clear_cookies(secure),
        };
    };

    match provider.refresh(refresh).await {
        Ok(session) => {
            tracing::debug!("Refreshed session for user {}", session.user.id);
            let set_cookies = session_cookies(&session, secure);
            ResolvedSession {
                session: Some(session),
                set_cookies,
            }
        }
        Err(SessionError::Unauthorized(reason)) => {
            tracing::info!("Refresh token rejected: {}", reason);
            ResolvedSession {
                session: None,
                set_cookies: clear_cookies(secure),
            }
        }
        Err(e) => {
            tracing::warn!("Failed to refresh session: {}", e);
            ResolvedSession::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory auth service for tests

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    pub const VALID_ACCESS: &str = "valid-access";
    pub const EXPIRED_ACCESS: &str = "expired-access";
    pub const VALID_REFRESH: &str = "valid-refresh";
    pub const EMAIL: &str = "dev@example.com";
    pub const PASSWORD: &str = "hunter2";

    #[derive(Default)]
    pub struct FakeAuth {
        pub offline: bool,
        pub refresh_calls: AtomicUsize,
    }

    pub fn user() -> AuthUser {
        AuthUser {
            id: Uuid::from_u128(7),
            email: Some(EMAIL.to_string()),
        }
    }

    pub fn fresh_session() -> Session {
        Session {
            access_token: "fresh-access".to_string(),
            refresh_token: "fresh-refresh".to_string(),
            expires_in: 3600,
            user: user(),
        }
    }

    #[async_trait]
    impl SessionProvider for FakeAuth {
        async fn get_user(&self, access_token: &str) -> Result<AuthUser, SessionError> {
            if self.offline {
                return Err(SessionError::Network("connection refused".to_string()));
            }
            match access_token {
                VALID_ACCESS | "fresh-access" => Ok(user()),
                _ => Err(SessionError::Unauthorized("JWT expired".to_string())),
            }
        }

        async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(SessionError::Network("connection refused".to_string()));
            }
            match refresh_token {
                VALID_REFRESH => Ok(fresh_session()),
                _ => Err(SessionError::Unauthorized("Invalid Refresh Token".to_string())),
            }
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
            if email == EMAIL && password == PASSWORD {
                Ok(fresh_session())
            } else {
                Err(SessionError::Unauthorized("Invalid login credentials".to_string()))
            }
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), SessionError> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::*;
    use super::*;
    use std::sync::atomic::Ordering;

    fn cookies(access: Option<&str>, refresh: Option<&str>) -> AuthCookies {
        AuthCookies {
            access_token: access.map(str::to_string),
            refresh_token: refresh.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_no_cookies_no_session() {
        let auth = FakeAuth::default();
        let resolved = resolve_session(&auth, &AuthCookies::default(), false).await;
        assert_eq!(resolved, ResolvedSession::default());
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_access_token() {
        let auth = FakeAuth::default();
        let resolved = resolve_session(&auth, &cookies(Some(VALID_ACCESS), Some(VALID_REFRESH)), false).await;
        assert_eq!(resolved.session.unwrap().user, user());
        assert!(resolved.set_cookies.is_empty());
    }

    #[tokio::test]
    async fn test_expired_access_token_is_refreshed() {
        let auth = FakeAuth::default();
        let resolved = resolve_session(&auth, &cookies(Some(EXPIRED_ACCESS), Some(VALID_REFRESH)), false).await;
        assert_eq!(resolved.session, Some(fresh_session()));
        assert_eq!(resolved.set_cookies.len(), 2);
        assert_eq!(resolved.set_cookies[0].value, "fresh-access");
    }

    #[tokio::test]
    async fn test_refresh_only_cookie() {
        let auth = FakeAuth::default();
        let resolved = resolve_session(&auth, &cookies(None, Some(VALID_REFRESH)), false).await;
        assert!(resolved.session.is_some());
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_cookies() {
        let auth = FakeAuth::default();
        let resolved = resolve_session(&auth, &cookies(Some(EXPIRED_ACCESS), Some("revoked")), false).await;
        assert!(resolved.session.is_none());
        assert!(resolved.set_cookies.iter().all(|c| c.max_age == 0));
    }

    #[tokio::test]
    async fn test_service_failure_counts_as_no_session() {
        let auth = FakeAuth {
            offline: true,
            ..Default::default()
        };
        let resolved = resolve_session(&auth, &cookies(Some(VALID_ACCESS), Some(VALID_REFRESH)), false).await;
        assert_eq!(resolved, ResolvedSession::default());
    }
}
