use axum::{extract::State, Json};

use crate::models::project::{Project, ProjectPatch};
use crate::services::error::ResourceError;
use crate::services::project::{self, Deleted};
use crate::surfaces::params::PathParam;
use crate::surfaces::payload::Payload;
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Project>, ResourceError> {
    Ok(Json(project::get_project(&state, &slug).await?))
}

pub async fn put(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    Payload(patch): Payload<ProjectPatch>,
) -> Result<Json<Project>, ResourceError> {
    Ok(Json(project::update_project(&state, &slug, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Deleted>, ResourceError> {
    Ok(Json(project::delete_project(&state, &slug).await?))
}
