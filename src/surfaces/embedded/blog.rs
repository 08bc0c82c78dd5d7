use axum::{extract::State, http::StatusCode, Json};

use crate::models::blog_post::{BlogPost, NewBlogPost};
use crate::services::blog::{self, BlogListing};
use crate::services::error::ResourceError;
use crate::surfaces::params::ListQuery;
use crate::surfaces::payload::Payload;
use crate::AppState;

// GET /api/blog?tag=&page=&limit=
pub async fn get(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<BlogListing>, ResourceError> {
    Ok(Json(blog::list_posts(&state, params).await?))
}

// POST /api/blog
pub async fn post(
    State(state): State<AppState>,
    Payload(body): Payload<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ResourceError> {
    let created = blog::create_post(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
