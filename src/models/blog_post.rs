use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{object_id, timestamp};
use crate::models::validation::{ValidationError, Validator};
use crate::services::db::{SlugDocument, StoredDocument};

pub const DEFAULT_AUTHOR: &str = "Vũ Nguyễn Quốc Huy";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id", default, with = "object_id")]
    #[schema(value_type = String, example = "65f1c2a9e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::date_option"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::date")]
    pub updated_at: DateTime<Utc>,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl BlogPost {
    /**
     * one-way publication stamp
     * set the first time the post is published, never cleared afterwards
     */
    pub fn stamp_publication(&mut self, now: DateTime<Utc>) {
        if self.is_published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new("BlogPost")
            .require("slug", &self.slug)
            .require("title", &self.title)
            .require("excerpt", &self.excerpt)
            .require("content", &self.content)
            .finish()
    }
}

impl StoredDocument for BlogPost {
    const COLLECTION: &'static str = "blogposts";
}

impl SlugDocument for BlogPost {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    fn sort_document() -> Document {
        doc! { "publishedAt": -1, "createdAt": -1 }
    }

    //unpublished-at sorts last, as missing fields do in a descending index scan
    fn listing_order(a: &Self, b: &Self) -> Ordering {
        let by_publication = match (a.published_at, b.published_at) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_publication.then_with(|| b.created_at.cmp(&a.created_at))
    }
}

/// Body of `POST /blog`.
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub is_published: bool,
    #[serde(with = "timestamp::date_option")]
    pub published_at: Option<DateTime<Utc>>,
}

impl NewBlogPost {
    pub fn into_post(self, id: ObjectId, now: DateTime<Utc>) -> BlogPost {
        let mut post = BlogPost {
            id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            cover_image: self.cover_image,
            tags: self.tags,
            author: self.author.unwrap_or_else(default_author),
            is_published: self.is_published,
            published_at: self.published_at,
            created_at: now,
            updated_at: now,
        };
        post.stamp_publication(now);
        post
    }
}

/// Body of `PUT /blog/{slug}`.
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPostPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub is_published: Option<bool>,
    #[serde(with = "timestamp::date_option")]
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogPostPatch {
    pub fn apply(self, post: &mut BlogPost, now: DateTime<Utc>) {
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(cover_image) = self.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(is_published) = self.is_published {
            post.is_published = is_published;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = Some(published_at);
        }
        post.stamp_publication(now);
    }
}
