use axum::{extract::State, http::StatusCode, Json};

use crate::models::project::{NewProject, Project};
use crate::services::error::ResourceError;
use crate::services::project;
use crate::surfaces::payload::Payload;
use crate::AppState;

// GET /api/projects
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ResourceError> {
    Ok(Json(project::list_projects(&state).await?))
}

// POST /api/projects
pub async fn post(
    State(state): State<AppState>,
    Payload(body): Payload<NewProject>,
) -> Result<(StatusCode, Json<Project>), ResourceError> {
    let created = project::create_project(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
