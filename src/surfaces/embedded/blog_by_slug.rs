use axum::{extract::State, Json};

use crate::models::blog_post::{BlogPost, BlogPostPatch};
use crate::services::blog;
use crate::services::error::ResourceError;
use crate::services::project::Deleted;
use crate::surfaces::params::PathParam;
use crate::surfaces::payload::Payload;
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<BlogPost>, ResourceError> {
    Ok(Json(blog::get_post(&state, &slug).await?))
}

pub async fn put(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    Payload(patch): Payload<BlogPostPatch>,
) -> Result<Json<BlogPost>, ResourceError> {
    Ok(Json(blog::update_post(&state, &slug, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Deleted>, ResourceError> {
    Ok(Json(blog::delete_post(&state, &slug).await?))
}
