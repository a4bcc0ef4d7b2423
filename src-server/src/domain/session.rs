//! Session Entity
//!
//! The auth service owns sessions; the gate only reads and forwards them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user as reported by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token pair plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    pub user: AuthUser,
}

fn default_expires_in() -> i64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserializes() {
        let session: Session = serde_json::from_str(
            r#"{
                "access_token": "a1",
                "token_type": "bearer",
                "refresh_token": "r1",
                "user": {"id": "00000000-0000-0000-0000-000000000007", "email": "dev@example.com"}
            }"#,
        )
        .unwrap();
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.id, Uuid::from_u128(7));
        assert_eq!(session.user.email.as_deref(), Some("dev@example.com"));
    }
}
