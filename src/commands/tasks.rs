//! Task Bindings
//!
//! Task rows store option ids; listing resolves them against the project's
//! label / size / priority tables.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{authorize, eq, rest, send_json, single, ApiResult, BackendConfig};
use crate::board::TaskChanges;
use crate::models::{CustomFieldOption, Task};

/// Raw `tasks` row
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub status_id: Option<Uuid>,
    #[serde(rename = "statusPosition", default)]
    pub status_position: f64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<Uuid>>,
    #[serde(default)]
    pub size: Option<Uuid>,
    #[serde(default)]
    pub priority: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Options keyed by id, one map per custom field
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    pub labels: HashMap<Uuid, CustomFieldOption>,
    pub sizes: HashMap<Uuid, CustomFieldOption>,
    pub priorities: HashMap<Uuid, CustomFieldOption>,
}

/// Replace option ids with their option records; unknown ids are dropped
pub fn resolve_task(row: TaskRow, options: &TaskOptions) -> Task {
    let labels = row
        .labels
        .unwrap_or_default()
        .iter()
        .filter_map(|id| options.labels.get(id).cloned())
        .collect();
    Task {
        id: row.id,
        project_id: row.project_id,
        status_id: row.status_id,
        status_position: row.status_position,
        title: row.title,
        description: row.description,
        labels,
        size: row.size.and_then(|id| options.sizes.get(&id).cloned()),
        priority: row.priority.and_then(|id| options.priorities.get(&id).cloned()),
        created_at: row.created_at,
    }
}

/// JSON body for a partial task update (option fields sent as ids)
pub fn changes_body(changes: &TaskChanges) -> Value {
    let mut body = Map::new();
    if let Some(title) = &changes.title {
        body.insert("title".into(), Value::from(title.as_str()));
    }
    if let Some(description) = &changes.description {
        body.insert("description".into(), Value::from(description.as_str()));
    }
    if let Some(status_id) = changes.status_id {
        body.insert("status_id".into(), Value::from(status_id.to_string()));
    }
    if let Some(position) = changes.status_position {
        body.insert("statusPosition".into(), Value::from(position));
    }
    if let Some(labels) = &changes.labels {
        let ids: Vec<Value> = labels.iter().map(|l| Value::from(l.id.to_string())).collect();
        body.insert("labels".into(), Value::Array(ids));
    }
    if let Some(size) = &changes.size {
        body.insert("size".into(), option_id(size));
    }
    if let Some(priority) = &changes.priority {
        body.insert("priority".into(), option_id(priority));
    }
    Value::Object(body)
}

fn option_id(option: &Option<CustomFieldOption>) -> Value {
    option
        .as_ref()
        .map(|o| Value::from(o.id.to_string()))
        .unwrap_or(Value::Null)
}

async fn list_options(config: &BackendConfig, table: &str, project_id: Uuid) -> ApiResult<HashMap<Uuid, CustomFieldOption>> {
    let req = reqwest::Client::new()
        .get(rest(config, table))
        .query(&[("select", "*".to_string()), ("project_id", eq(project_id))]);
    let rows: Vec<CustomFieldOption> = send_json(authorize(config, req)).await?;
    Ok(rows.into_iter().map(|o| (o.id, o)).collect())
}

pub async fn list_options_for(project_id: Uuid) -> ApiResult<TaskOptions> {
    let config = BackendConfig::load()?;
    Ok(TaskOptions {
        labels: list_options(&config, "labels", project_id).await?,
        sizes: list_options(&config, "sizes", project_id).await?,
        priorities: list_options(&config, "priorities", project_id).await?,
    })
}

pub async fn list_tasks(project_id: Uuid) -> ApiResult<Vec<Task>> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .get(rest(&config, "tasks"))
        .query(&[("select", "*".to_string()), ("project_id", eq(project_id))]);
    let rows: Vec<TaskRow> = send_json(authorize(&config, req)).await?;
    let options = list_options_for(project_id).await?;
    Ok(rows.into_iter().map(|r| resolve_task(r, &options)).collect())
}

#[derive(Serialize)]
struct NewTask<'a> {
    project_id: Uuid,
    status_id: Uuid,
    #[serde(rename = "statusPosition")]
    status_position: f64,
    title: &'a str,
}

pub async fn create_task(project_id: Uuid, status_id: Uuid, status_position: f64, title: &str) -> ApiResult<Task> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .post(rest(&config, "tasks"))
        .header("Prefer", "return=representation")
        .json(&NewTask {
            project_id,
            status_id,
            status_position,
            title,
        });
    let row = single(send_json::<Vec<TaskRow>>(authorize(&config, req)).await?)?;
    Ok(resolve_task(row, &TaskOptions::default()))
}

pub async fn update_task(id: Uuid, changes: &TaskChanges) -> ApiResult<()> {
    let config = BackendConfig::load()?;
    let req = reqwest::Client::new()
        .patch(rest(&config, "tasks"))
        .query(&[("id", eq(id))])
        .json(&changes_body(changes));
    super::send_empty(authorize(&config, req)).await
}

pub async fn update_task_position(id: Uuid, status_id: Uuid, status_position: f64) -> ApiResult<()> {
    let changes = TaskChanges {
        status_id: Some(status_id),
        status_position: Some(status_position),
        ..Default::default()
    };
    update_task(id, &changes).await
}
