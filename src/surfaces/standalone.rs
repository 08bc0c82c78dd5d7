use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        HeaderValue, Method,
    },
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

use self::openapi::ApiDoc;

mod blog_routes;
mod health_routes;
pub mod openapi;
mod profile_routes;
mod project_routes;

pub const BODY_LIMIT: usize = 10 * 1024 * 1024;
pub const DOCS_PATH: &str = "/api-docs";

/**
 * express-style server: one router per resource nested under /api
 * the connection is opened before the listener, so handlers never dial
 */
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    //setting cors
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    Router::new()
        .route("/", get(index))
        .nest("/api/health", health_routes::router())
        .nest("/api/projects", project_routes::router())
        .nest("/api/blog", blog_routes::router())
        .nest("/api/profile", profile_routes::router())
        .with_state(state)
        .merge(SwaggerUi::new(DOCS_PATH).url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API Server",
        "endpoints": {
            "health": "/api/health",
            "projects": "/api/projects",
            "blog": "/api/blog",
            "profile": "/api/profile",
        },
        "docs": DOCS_PATH,
    }))
}
