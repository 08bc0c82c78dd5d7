use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::services::error::ResourceError;
use crate::AppState;

mod blog;
mod blog_by_slug;
mod health;
mod profile;
mod profile_by_lang;
mod project_by_slug;
mod projects;

/**
 * one module per route file, each exporting its verb handlers
 * the document store is dialed by the first request that needs it
 */
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/projects", get(projects::get).post(projects::post))
        .route(
            "/api/projects/{slug}",
            get(project_by_slug::get)
                .put(project_by_slug::put)
                .delete(project_by_slug::delete),
        )
        .route("/api/blog", get(blog::get).post(blog::post))
        .route(
            "/api/blog/{slug}",
            get(blog_by_slug::get)
                .put(blog_by_slug::put)
                .delete(blog_by_slug::delete),
        )
        .route("/api/profile", get(profile::get).put(profile::put))
        .route("/api/profile/{lang}", get(profile_by_lang::get))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            connect_on_demand,
        ))
        // health reports a failed dial itself instead of answering 500
        .route("/api/health", get(health::get))
        .with_state(state)
        .layer(cors)
}

async fn connect_on_demand(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ResourceError> {
    state.connection.connect().await?;
    Ok(next.run(request).await)
}
