//! Handlers for the `/projects` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskboard_core::models::{CreateProjectInput, Id, Project, ProjectFilter};
use taskboard_core::Database;

use super::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeleted {
    pub message: String,
    pub deleted_tasks: usize,
}

/// GET /projects
pub async fn list(
    State(db): State<Database>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Project>>> {
    let Query(query) = query?;
    let filter = ProjectFilter {
        status: query.status.filter(|s| !s.is_empty()),
    };
    Ok(Json(db.list_projects(&filter)?))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<Project>> {
    let Path(id) = id?;
    Ok(Json(db.get_project(id)?))
}

/// POST /projects
pub async fn create(
    State(db): State<Database>,
    input: Result<Json<CreateProjectInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let Json(input) = input?;
    let project = db.create_project(input)?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /projects/{id}
pub async fn update(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
    patch: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    let Path(id) = id?;
    let patch = match patch {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // A missing record outranks a bad body.
            db.get_project(id)?;
            return Err(rejection.into());
        }
    };
    Ok(Json(db.update_project(id, &patch)?))
}

/// DELETE /projects/{id}
pub async fn delete(
    State(db): State<Database>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<ProjectDeleted>> {
    let Path(id) = id?;
    let deletion = db.delete_project(id)?;
    Ok(Json(ProjectDeleted {
        message: format!("Project {id} and all its tasks deleted successfully"),
        deleted_tasks: deletion.deleted_tasks,
    }))
}
