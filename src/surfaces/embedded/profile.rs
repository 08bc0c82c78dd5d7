use axum::{extract::State, Json};

use crate::models::profile::{Profile, ProfilePatch};
use crate::services::error::ResourceError;
use crate::services::profile;
use crate::surfaces::payload::Payload;
use crate::AppState;

pub async fn get(State(state): State<AppState>) -> Result<Json<Profile>, ResourceError> {
    Ok(Json(profile::get_profile(&state).await?))
}

// creates the profile when none exists yet
pub async fn put(
    State(state): State<AppState>,
    Payload(patch): Payload<ProfilePatch>,
) -> Result<Json<Profile>, ResourceError> {
    Ok(Json(profile::update_profile(&state, patch).await?))
}
