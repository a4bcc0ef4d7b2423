//! Column Bindings
//!
//! Board lanes are `statuses` rows managed through the custom-field API.

use serde::Serialize;
use uuid::Uuid;

use super::{authorize, eq, rest, send_empty, send_json, single, ApiResult, BackendConfig};
use crate::models::{CustomFieldData, Status};

#[derive(Serialize)]
struct NewColumn<'a> {
    project_id: Uuid,
    label: &'a str,
    description: &'a str,
    color: &'a str,
    order: i32,
}

#[derive(Serialize)]
struct ColumnPatch<'a> {
    label: &'a str,
    description: &'a str,
    color: &'a str,
}

pub async fn list_columns(project_id: Uuid) -> ApiResult<Vec<Status>> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new().get(rest(&config, "statuses")).query(&[
        ("select", "*".to_string()),
        ("project_id", eq(project_id)),
        ("order", "order.asc".to_string()),
    ]);
    send_json(authorize(&config, req)).await
}

/// Create a column placed after the current last one
pub async fn create_column(project_id: Uuid, data: &CustomFieldData) -> ApiResult<Status> {
    let existing = list_columns(project_id).await?;
    let order = existing.iter().map(|c| c.order + 1).max().unwrap_or(0);

    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .post(rest(&config, "statuses"))
        .header("Prefer", "return=representation")
        .json(&NewColumn {
            project_id,
            label: &data.label,
            description: &data.description,
            color: &data.color,
            order,
        });
    single(send_json::<Vec<Status>>(authorize(&config, req)).await?)
}

pub async fn update_column(column: &Status) -> ApiResult<Status> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .patch(rest(&config, "statuses"))
        .query(&[("id", eq(column.id))])
        .header("Prefer", "return=representation")
        .json(&ColumnPatch {
            label: &column.label,
            description: &column.description,
            color: &column.color,
        });
    single(send_json::<Vec<Status>>(authorize(&config, req)).await?)
}

pub async fn delete_column(id: Uuid) -> ApiResult<()> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .delete(rest(&config, "statuses"))
        .query(&[("id", eq(id))]);
    send_empty(authorize(&config, req)).await
}
