//! Frontend Models
//!
//! Data structures mirroring backend table rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project row (`projects` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}

/// Board lane (`statuses` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: Uuid,
    pub project_id: Uuid,
    pub label: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

/// Payload for a new custom-field option (column, label, size, priority)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomFieldData {
    pub label: String,
    pub description: String,
    pub color: String,
}

/// A stored custom-field option attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldOption {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Task row with its resolved custom-field options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub status_id: Option<Uuid>,
    #[serde(rename = "statusPosition", default)]
    pub status_position: f64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<CustomFieldOption>,
    #[serde(default)]
    pub size: Option<CustomFieldOption>,
    #[serde(default)]
    pub priority: Option<CustomFieldOption>,
    pub created_at: DateTime<Utc>,
}

/// Public profile row (`users` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

/// Authenticated user as reported by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
