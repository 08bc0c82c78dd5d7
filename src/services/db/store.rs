use std::cmp::Ordering;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("E11000 duplicate key error collection: {collection} index: slug_1 dup key: {{ slug: \"{slug}\" }}")]
    DuplicateKey {
        collection: &'static str,
        slug: String,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// A document kind with its own collection.
pub trait StoredDocument: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
}

/// A document kind addressed by a unique slug and listed when published.
pub trait SlugDocument: StoredDocument {
    fn slug(&self) -> &str;

    fn is_published(&self) -> bool;

    fn has_tag(&self, _tag: &str) -> bool {
        false
    }

    /// Sort applied by the document store when listing.
    fn sort_document() -> Document;

    /// The same order as `sort_document`, for stores that sort in process.
    fn listing_order(a: &Self, b: &Self) -> Ordering;
}

/// Which documents a list query may return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub published_only: bool,
    pub tag: Option<String>,
}

impl ListFilter {
    pub fn published() -> Self {
        Self {
            published_only: true,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|tag| !tag.is_empty());
        self
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if self.published_only {
            filter.insert("isPublished", true);
        }
        if let Some(tag) = &self.tag {
            filter.insert("tags", tag.as_str());
        }
        filter
    }

    pub fn matches<T: SlugDocument>(&self, document: &T) -> bool {
        if self.published_only && !document.is_published() {
            return false;
        }
        match &self.tag {
            Some(tag) => document.has_tag(tag),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

#[async_trait]
pub trait SlugStore<T: SlugDocument>: Send + Sync {
    /// Matching documents in listing order, optionally windowed.
    async fn find(&self, filter: &ListFilter, window: Option<Window>) -> Result<Vec<T>, StoreError>;

    async fn count(&self, filter: &ListFilter) -> Result<u64, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError>;

    /// Fails with `StoreError::DuplicateKey` when the slug is taken.
    async fn insert(&self, document: &T) -> Result<(), StoreError>;

    /// Replaces the document currently stored under `slug` and returns the stored result.
    async fn replace_by_slug(&self, slug: &str, document: &T) -> Result<Option<T>, StoreError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError>;

    async fn clear(&self) -> Result<u64, StoreError>;

    async fn insert_many(&self, documents: &[T]) -> Result<usize, StoreError>;

    async fn ensure_collection(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait SingletonStore<T: StoredDocument>: Send + Sync {
    async fn first(&self) -> Result<Option<T>, StoreError>;

    /// Upsert into the one slot and return what is stored.
    async fn save(&self, document: &T) -> Result<T, StoreError>;

    async fn clear(&self) -> Result<u64, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
