use axum::{extract::State, Json};

use crate::services::health::{self, HealthReport};
use crate::AppState;

pub async fn get(State(state): State<AppState>) -> Json<HealthReport> {
    Json(health::check(&state.connection).await)
}
