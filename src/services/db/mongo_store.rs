use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::services::db::{
    Connection, ListFilter, SingletonStore, SlugDocument, SlugStore, StoreError, StoredDocument,
    Window,
};

const DUPLICATE_KEY: i32 = 11000;

/**
 * collection-backed store
 * every call goes through the shared connection, which dials on first use
 */
pub struct MongoStore<T> {
    connection: Connection,
    indexed: OnceCell<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: StoredDocument> MongoStore<T> {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            indexed: OnceCell::new(),
            _marker: PhantomData,
        }
    }

    async fn collection(&self) -> Result<Collection<T>, StoreError> {
        let db = self.connection.database().await?;
        Ok(db.collection::<T>(T::COLLECTION))
    }
}

impl<T: SlugDocument> MongoStore<T> {
    /**
     * collection with the unique slug index in place
     * created once per process, a no-op when it already exists
     */
    async fn slug_collection(&self) -> Result<Collection<T>, StoreError> {
        let collection = self.collection().await?;
        self.indexed
            .get_or_try_init(|| async {
                let index = IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build();
                collection.create_index(index).await?;
                debug!(collection = T::COLLECTION, "slug index ensured");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(collection)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

/**
 * skip and limit as the server accepts them
 * both travel as signed 64-bit integers, larger values are clamped
 */
fn window_bounds(window: Window) -> (u64, i64) {
    let skip = window.skip.min(i64::MAX as u64);
    let limit = i64::try_from(window.limit).unwrap_or(i64::MAX);
    (skip, limit)
}

fn write_error<T: StoredDocument>(err: mongodb::error::Error, slug: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::DuplicateKey {
            collection: T::COLLECTION,
            slug: slug.to_string(),
        }
    } else {
        StoreError::from(err)
    }
}

#[async_trait]
impl<T: SlugDocument> SlugStore<T> for MongoStore<T> {
    async fn find(&self, filter: &ListFilter, window: Option<Window>) -> Result<Vec<T>, StoreError> {
        let collection = self.slug_collection().await?;
        let mut query = collection.find(filter.to_document()).sort(T::sort_document());
        if let Some(window) = window {
            let (skip, limit) = window_bounds(window);
            query = query.skip(skip).limit(limit);
        }
        let cursor = query.await?;
        Ok(cursor.try_collect::<Vec<T>>().await?)
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, StoreError> {
        let collection = self.slug_collection().await?;
        Ok(collection.count_documents(filter.to_document()).await?)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        let collection = self.slug_collection().await?;
        Ok(collection.find_one(doc! { "slug": slug }).await?)
    }

    async fn insert(&self, document: &T) -> Result<(), StoreError> {
        let collection = self.slug_collection().await?;
        collection
            .insert_one(document)
            .await
            .map_err(|err| write_error::<T>(err, document.slug()))?;
        Ok(())
    }

    async fn replace_by_slug(&self, slug: &str, document: &T) -> Result<Option<T>, StoreError> {
        let collection = self.slug_collection().await?;
        collection
            .find_one_and_replace(doc! { "slug": slug }, document)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|err| write_error::<T>(err, document.slug()))
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        let collection = self.slug_collection().await?;
        Ok(collection.find_one_and_delete(doc! { "slug": slug }).await?)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let collection = self.collection().await?;
        Ok(collection.delete_many(doc! {}).await?.deleted_count)
    }

    async fn insert_many(&self, documents: &[T]) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let collection = self.slug_collection().await?;
        let result = collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }

    async fn ensure_collection(&self) -> Result<(), StoreError> {
        let db = self.connection.database().await?;
        let existing = db.list_collection_names().await?;
        if !existing.iter().any(|name| name == T::COLLECTION) {
            db.create_collection(T::COLLECTION).await?;
            info!(collection = T::COLLECTION, "collection created");
        }
        Ok(())
    }
}

#[async_trait]
impl<T: StoredDocument> SingletonStore<T> for MongoStore<T> {
    async fn first(&self) -> Result<Option<T>, StoreError> {
        let collection = self.collection().await?;
        Ok(collection.find_one(doc! {}).await?)
    }

    async fn save(&self, document: &T) -> Result<T, StoreError> {
        let collection = self.collection().await?;
        collection
            .find_one_and_replace(doc! {}, document)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                StoreError::Backend(format!("upsert into {} returned nothing", T::COLLECTION))
            })
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let collection = self.collection().await?;
        Ok(collection.delete_many(doc! {}).await?.deleted_count)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let collection = self.collection().await?;
        Ok(collection.count_documents(doc! {}).await?)
    }
}
