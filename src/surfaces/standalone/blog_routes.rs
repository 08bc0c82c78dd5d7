use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::models::blog_post::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::services::blog::{self, BlogListing};
use crate::services::error::{ErrorBody, ResourceError};
use crate::services::project::Deleted;
use crate::surfaces::params::{ListQuery, PathParam};
use crate::surfaces::payload::Payload;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{slug}", get(show).put(update).delete(remove))
}

#[utoipa::path(
    get,
    path = "/api/blog",
    tag = "Blog",
    summary = "List published posts",
    description = "Filters by tag and paginates. Non-numeric, zero or negative `page`/`limit` fall back to 1 and 10.",
    params(
        ("tag" = Option<String>, Query, description = "Only posts carrying this tag"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("limit" = Option<String>, Query, description = "Posts per page")
    ),
    responses(
        (status = 200, description = "One page of posts", body = BlogListing),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<BlogListing>, ResourceError> {
    Ok(Json(blog::list_posts(&state, params).await?))
}

#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "Blog",
    summary = "Create a post",
    request_body = NewBlogPost,
    responses(
        (status = 201, description = "Post created", body = BlogPost),
        (status = 500, description = "Validation failure or duplicate slug", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ResourceError> {
    let created = blog::create_post(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    tag = "Blog",
    summary = "Get a post by slug",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post, published or not", body = BlogPost),
        (status = 404, description = "Blog post not found", body = ErrorBody)
    )
)]
pub async fn show(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<BlogPost>, ResourceError> {
    Ok(Json(blog::get_post(&state, &slug).await?))
}

#[utoipa::path(
    put,
    path = "/api/blog/{slug}",
    tag = "Blog",
    summary = "Update a post",
    description = "Publishing a post for the first time stamps `publishedAt`.",
    params(("slug" = String, Path, description = "Post slug")),
    request_body = BlogPostPatch,
    responses(
        (status = 200, description = "Updated post", body = BlogPost),
        (status = 404, description = "Blog post not found", body = ErrorBody),
        (status = 500, description = "Validation failure or duplicate slug", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    Payload(patch): Payload<BlogPostPatch>,
) -> Result<Json<BlogPost>, ResourceError> {
    Ok(Json(blog::update_post(&state, &slug, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/blog/{slug}",
    tag = "Blog",
    summary = "Delete a post",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post deleted", body = Deleted),
        (status = 404, description = "Blog post not found", body = ErrorBody)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Deleted>, ResourceError> {
    Ok(Json(blog::delete_post(&state, &slug).await?))
}
