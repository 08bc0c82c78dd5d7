use axum::{extract::State, Json};

use crate::models::profile::LocalizedProfile;
use crate::services::error::ResourceError;
use crate::services::profile;
use crate::surfaces::params::PathParam;
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    PathParam(lang): PathParam<String>,
) -> Result<Json<LocalizedProfile>, ResourceError> {
    Ok(Json(profile::get_localized_profile(&state, &lang).await?))
}
