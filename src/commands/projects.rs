//! Project Bindings
//!
//! Listing plus the close / reopen / delete management calls.

use serde::Serialize;
use uuid::Uuid;

use super::{authorize, eq, rest, send_empty, send_json, ApiResult, BackendConfig};
use crate::models::Project;

#[derive(Serialize)]
struct ClosedPatch {
    closed: bool,
}

/// Projects created by `user_id`
pub async fn list_projects(user_id: Uuid) -> ApiResult<Vec<Project>> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .get(rest(&config, "projects"))
        .query(&[("select", "*".to_string()), ("created_by", eq(user_id))]);
    send_json(authorize(&config, req)).await
}

/// Single project by id
pub async fn get_project(id: Uuid) -> ApiResult<Project> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .get(rest(&config, "projects"))
        .query(&[("select", "*".to_string()), ("id", eq(id))])
        .header("Accept", "application/vnd.pgrst.object+json");
    send_json(authorize(&config, req)).await
}

async fn set_closed(id: Uuid, closed: bool) -> ApiResult<()> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .patch(rest(&config, "projects"))
        .query(&[("id", eq(id))])
        .json(&ClosedPatch { closed });
    send_empty(authorize(&config, req)).await
}

pub async fn close_project(id: Uuid) -> ApiResult<()> {
    set_closed(id, true).await
}

pub async fn reopen_project(id: Uuid) -> ApiResult<()> {
    set_closed(id, false).await
}

pub async fn delete_project(id: Uuid) -> ApiResult<()> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .delete(rest(&config, "projects"))
        .query(&[("id", eq(id))]);
    send_empty(authorize(&config, req)).await
}
