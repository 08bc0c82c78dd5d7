use axum::{extract::State, routing::get, Json, Router};

use crate::services::health::{self, HealthReport};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check",
    description = "Reports database readiness. Always answers 200.",
    responses(
        (status = 200, description = "Current readiness", body = HealthReport)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(health::check(&state.connection).await)
}
