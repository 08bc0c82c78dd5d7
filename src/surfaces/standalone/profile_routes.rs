use axum::{extract::State, routing::get, Json, Router};

use crate::models::profile::{LocalizedProfile, Profile, ProfilePatch};
use crate::services::error::{ErrorBody, ResourceError};
use crate::services::profile;
use crate::surfaces::params::PathParam;
use crate::surfaces::payload::Payload;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show).put(upsert))
        .route("/{lang}", get(localized))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    summary = "Get the profile with both languages",
    responses(
        (status = 200, description = "The stored profile", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorBody)
    )
)]
pub async fn show(State(state): State<AppState>) -> Result<Json<Profile>, ResourceError> {
    Ok(Json(profile::get_profile(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profile",
    summary = "Update or create the profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "The saved profile", body = Profile),
        (status = 500, description = "Validation failure", body = ErrorBody)
    )
)]
pub async fn upsert(
    State(state): State<AppState>,
    Payload(patch): Payload<ProfilePatch>,
) -> Result<Json<Profile>, ResourceError> {
    Ok(Json(profile::update_profile(&state, patch).await?))
}

#[utoipa::path(
    get,
    path = "/api/profile/{lang}",
    tag = "Profile",
    summary = "Get the profile in one language",
    description = "Blank values fall back to the other language.",
    params(("lang" = String, Path, description = "`en` or `vi`")),
    responses(
        (status = 200, description = "Profile flattened to one language", body = LocalizedProfile),
        (status = 404, description = "Profile not found or unsupported language", body = ErrorBody)
    )
)]
pub async fn localized(
    State(state): State<AppState>,
    PathParam(lang): PathParam<String>,
) -> Result<Json<LocalizedProfile>, ResourceError> {
    Ok(Json(profile::get_localized_profile(&state, &lang).await?))
}
