use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::services::error::{ErrorBody, ResourceError};
use crate::services::project::{self, Deleted};
use crate::surfaces::params::PathParam;
use crate::surfaces::payload::Payload;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{slug}", get(show).put(update).delete(remove))
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    summary = "List published projects",
    responses(
        (status = 200, description = "Published projects, newest first", body = Vec<Project>),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ResourceError> {
    Ok(Json(project::list_projects(&state).await?))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    summary = "Create a project",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 500, description = "Validation failure or duplicate slug", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<NewProject>,
) -> Result<(StatusCode, Json<Project>), ResourceError> {
    let created = project::create_project(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    tag = "Projects",
    summary = "Get a project by slug",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "The project, published or not", body = Project),
        (status = 404, description = "Project not found", body = ErrorBody)
    )
)]
pub async fn show(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Project>, ResourceError> {
    Ok(Json(project::get_project(&state, &slug).await?))
}

#[utoipa::path(
    put,
    path = "/api/projects/{slug}",
    tag = "Projects",
    summary = "Update a project",
    params(("slug" = String, Path, description = "Project slug")),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 404, description = "Project not found", body = ErrorBody),
        (status = 500, description = "Validation failure or duplicate slug", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    Payload(patch): Payload<ProjectPatch>,
) -> Result<Json<Project>, ResourceError> {
    Ok(Json(project::update_project(&state, &slug, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{slug}",
    tag = "Projects",
    summary = "Delete a project",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Project deleted", body = Deleted),
        (status = 404, description = "Project not found", body = ErrorBody)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Deleted>, ResourceError> {
    Ok(Json(project::delete_project(&state, &slug).await?))
}
