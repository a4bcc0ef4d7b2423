//! User Bindings

use uuid::Uuid;

use super::{authorize, eq, rest, send_json, ApiResult, BackendConfig};
use crate::models::UserProfile;

/// Profile row for `user_id` (single-object response)
pub async fn fetch_user_details(user_id: Uuid) -> ApiResult<UserProfile> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .get(rest(&config, "users"))
        .query(&[
            ("select", "id,name,avatar,description,links".to_string()),
            ("id", eq(user_id)),
        ])
        .header("Accept", "application/vnd.pgrst.object+json");
    send_json(authorize(&config, req)).await
}
