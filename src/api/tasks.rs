//! Handlers for the `/tasks` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskboard_core::models::{CreateTaskInput, Id, Task, TaskFilter};
use taskboard_core::Database;

use super::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
}

impl TaskQuery {
    /// An empty `projectId` means no filter.
    fn into_filter(self) -> ApiResult<TaskFilter> {
        let project_id = match self.project_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Id>().map_err(|_| {
                ApiError::BadRequest(format!("projectId must be an integer, got {raw:?}"))
            })?),
        };
        Ok(TaskFilter { project_id })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDeleted {
    pub message: String,
}

/// GET /tasks
pub async fn list(
    State(db): State<Database>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    Ok(Json(db.list_tasks(&filter)?))
}

/// GET /tasks/{id}
pub async fn get_by_id(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    Ok(Json(db.get_task(id)?))
}

/// POST /tasks
pub async fn create(
    State(db): State<Database>,
    input: Result<Json<CreateTaskInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(input) = input?;
    let task = db.create_task(input)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /tasks/{id}
pub async fn update(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
    patch: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let patch = match patch {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // A missing record outranks a bad body.
            db.get_task(id)?;
            return Err(rejection.into());
        }
    };
    Ok(Json(db.update_task(id, &patch)?))
}

/// DELETE /tasks/{id}
pub async fn delete(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<TaskDeleted>> {
    let Path(id) = id?;
    db.delete_task(id)?;
    Ok(Json(TaskDeleted {
        message: format!("Task {id} deleted successfully"),
    }))
}
