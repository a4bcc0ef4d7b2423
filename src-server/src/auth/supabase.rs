//! Supabase Auth REST client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::SessionProvider;
use crate::config::Config;
use crate::domain::{AuthUser, Session, SessionError};

/// Error body shapes returned by the auth service
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl AuthErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message).or(self.error)
    }
}

#[derive(Clone)]
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/auth/v1", config.supabase_url),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn request(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }

    async fn token(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, SessionError> {
        let url = format!("{}/token", self.base_url);
        let req = self.client.post(url).query(&[("grant_type", grant_type)]).json(&body);
        let response = check(self.request(req, None).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Map non-success statuses onto `SessionError`
async fn check(response: Response) -> Result<Response, SessionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body: AuthErrorBody = response.json().await.unwrap_or_default();
    let message = body.into_message().unwrap_or_else(|| status.to_string());
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(SessionError::Unauthorized(message))
        }
        _ => Err(SessionError::Backend {
            status: status.as_u16(),
            message,
        }),
    }
}

#[async_trait]
impl SessionProvider for SupabaseAuth {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, SessionError> {
        let url = format!("{}/user", self.base_url);
        let req = self.request(self.client.get(url), Some(access_token));
        let response = check(req.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError> {
        self.token("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        self.token("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        let url = format!("{}/logout", self.base_url);
        let req = self.request(self.client.post(url), Some(access_token));
        check(req.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_description() {
        let body: AuthErrorBody = serde_json::from_str(
            r#"{"error": "invalid_grant", "error_description": "Invalid Refresh Token: Already Used"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid Refresh Token: Already Used"));

        let body: AuthErrorBody = serde_json::from_str(r#"{"code": 401, "msg": "JWT expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("JWT expired"));
    }
}
