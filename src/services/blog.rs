use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::models::blog_post::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::models::timestamp;
use crate::services::db::ListFilter;
use crate::services::error::ResourceError;
use crate::services::pagination::{fetch_page, PageRequest, Pagination};
use crate::services::project::Deleted;
use crate::AppState;

const NOT_FOUND: &str = "Blog post not found";

/// Raw query string of `GET /blog`; numbers are coerced leniently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub tag: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /**
     * build from decoded query pairs
     * the first value of a repeated key wins, unknown keys are ignored
     */
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tag" => &mut params.tag,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BlogListing {
    pub posts: Vec<BlogPost>,
    pub pagination: Pagination,
}

pub async fn list_posts(state: &AppState, params: ListParams) -> Result<BlogListing, ResourceError> {
    let request = PageRequest::from_params(params.page.as_deref(), params.limit.as_deref());
    let filter = ListFilter::published().with_tag(params.tag);
    let page = fetch_page(state.posts.as_ref(), &filter, request).await?;
    Ok(BlogListing {
        posts: page.items,
        pagination: page.pagination,
    })
}

pub async fn get_post(state: &AppState, slug: &str) -> Result<BlogPost, ResourceError> {
    state
        .posts
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))
}

pub async fn create_post(state: &AppState, body: NewBlogPost) -> Result<BlogPost, ResourceError> {
    let post = body.into_post(ObjectId::new(), timestamp::now());
    post.validate()?;
    state.posts.insert(&post).await?;
    info!(slug = %post.slug, published = post.is_published, "blog post created");
    Ok(post)
}

pub async fn update_post(
    state: &AppState,
    slug: &str,
    patch: BlogPostPatch,
) -> Result<BlogPost, ResourceError> {
    let mut post = get_post(state, slug).await?;
    let now = timestamp::now();
    patch.apply(&mut post, now);
    post.updated_at = now;
    post.validate()?;

    let stored = state
        .posts
        .replace_by_slug(slug, &post)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))?;
    info!(slug, "blog post updated");
    Ok(stored)
}

pub async fn delete_post(state: &AppState, slug: &str) -> Result<Deleted, ResourceError> {
    state
        .posts
        .delete_by_slug(slug)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))?;
    info!(slug, "blog post deleted");
    Ok(Deleted {
        message: "Blog post deleted successfully",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(slug: &str, tags: &[&str]) -> NewBlogPost {
        NewBlogPost {
            slug: slug.to_string(),
            title: format!("Post {slug}"),
            excerpt: "Short".into(),
            content: "Long".into(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            is_published: true,
            ..NewBlogPost::default()
        }
    }

    fn params(tag: Option<&str>, page: &str, limit: &str) -> ListParams {
        ListParams {
            tag: tag.map(str::to_string),
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    #[test]
    fn repeated_query_keys_keep_the_first_value() {
        let pairs = [
            ("page", "1"),
            ("tag", "react"),
            ("page", "2"),
            ("tag", "rust"),
            ("sort", "asc"),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string()));

        assert_eq!(
            ListParams::from_pairs(pairs),
            ListParams {
                tag: Some("react".into()),
                page: Some("1".into()),
                limit: None,
            }
        );
    }

    #[tokio::test]
    async fn tag_filter_and_pagination() {
        let state = AppState::in_memory();
        let base = timestamp::now();
        for day in 0..5 {
            let body = NewBlogPost {
                published_at: Some(base + Duration::days(day)),
                ..post(&format!("react-{day}"), &["react"])
            };
            create_post(&state, body).await.unwrap();
        }
        create_post(&state, post("rust-only", &["rust"])).await.unwrap();
        let draft = NewBlogPost {
            is_published: false,
            ..post("react-draft", &["react"])
        };
        create_post(&state, draft).await.unwrap();

        let listing = list_posts(&state, params(Some("react"), "1", "2")).await.unwrap();
        let slugs: Vec<&str> = listing.posts.iter().map(|post| post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["react-4", "react-3"]);
        assert_eq!(
            listing.pagination,
            Pagination {
                total: 5,
                page: 1,
                limit: 2,
                total_pages: 3
            }
        );

        let last = list_posts(&state, params(Some("react"), "3", "2")).await.unwrap();
        assert_eq!(last.posts.len(), 1);
        assert_eq!(last.posts[0].slug, "react-0");
    }

    #[tokio::test]
    async fn empty_tag_means_no_filter() {
        let state = AppState::in_memory();
        create_post(&state, post("a", &["react"])).await.unwrap();
        create_post(&state, post("b", &["rust"])).await.unwrap();

        let listing = list_posts(&state, params(Some(""), "x", "y")).await.unwrap();
        assert_eq!(listing.pagination.total, 2);
        assert_eq!(listing.pagination.limit, 10);
    }

    #[tokio::test]
    async fn drafts_get_stamped_when_published() {
        let state = AppState::in_memory();
        let draft = NewBlogPost {
            is_published: false,
            ..post("draft", &[])
        };
        let created = create_post(&state, draft).await.unwrap();
        assert!(created.published_at.is_none());

        let patch = BlogPostPatch {
            is_published: Some(true),
            ..BlogPostPatch::default()
        };
        let published = update_post(&state, "draft", patch).await.unwrap();
        assert!(published.published_at.is_some());
        assert_eq!(published.published_at, Some(published.updated_at));
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let state = AppState::in_memory();
        create_post(&state, post("same", &[])).await.unwrap();
        let err = create_post(&state, post("same", &[])).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_post_messages() {
        let state = AppState::in_memory();
        assert_eq!(
            get_post(&state, "nope").await.unwrap_err().to_string(),
            "Blog post not found"
        );
        let err = update_post(&state, "nope", BlogPostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }
}
