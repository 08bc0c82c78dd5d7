use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::services::db::{
    ListFilter, SingletonStore, SlugDocument, SlugStore, StoreError, StoredDocument, Window,
};

/// In-memory store for development and tests. Documents keep insertion order.
pub struct MemoryStore<T> {
    documents: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate<T: StoredDocument>(slug: &str) -> StoreError {
    StoreError::DuplicateKey {
        collection: T::COLLECTION,
        slug: slug.to_string(),
    }
}

#[async_trait]
impl<T: SlugDocument> SlugStore<T> for MemoryStore<T> {
    async fn find(&self, filter: &ListFilter, window: Option<Window>) -> Result<Vec<T>, StoreError> {
        let documents = self.documents.read().await;
        let mut matching: Vec<T> = documents
            .iter()
            .filter(|document| filter.matches(*document))
            .cloned()
            .collect();
        matching.sort_by(T::listing_order);

        let Some(window) = window else {
            return Ok(matching);
        };
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|document| filter.matches(*document)).count() as u64)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|document| document.slug() == slug).cloned())
    }

    async fn insert(&self, document: &T) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|existing| existing.slug() == document.slug()) {
            return Err(duplicate::<T>(document.slug()));
        }
        documents.push(document.clone());
        Ok(())
    }

    async fn replace_by_slug(&self, slug: &str, document: &T) -> Result<Option<T>, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(position) = documents.iter().position(|existing| existing.slug() == slug) else {
            return Ok(None);
        };
        let taken = documents
            .iter()
            .enumerate()
            .any(|(index, existing)| index != position && existing.slug() == document.slug());
        if taken {
            return Err(duplicate::<T>(document.slug()));
        }
        documents[position] = document.clone();
        Ok(Some(document.clone()))
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        let mut documents = self.documents.write().await;
        let position = documents.iter().position(|existing| existing.slug() == slug);
        Ok(position.map(|index| documents.remove(index)))
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut documents = self.documents.write().await;
        let removed = documents.len() as u64;
        documents.clear();
        Ok(removed)
    }

    async fn insert_many(&self, batch: &[T]) -> Result<usize, StoreError> {
        let mut documents = self.documents.write().await;
        for (index, document) in batch.iter().enumerate() {
            let clashes = documents.iter().any(|existing| existing.slug() == document.slug())
                || batch[..index].iter().any(|earlier| earlier.slug() == document.slug());
            if clashes {
                return Err(duplicate::<T>(document.slug()));
            }
        }
        documents.extend(batch.iter().cloned());
        Ok(batch.len())
    }

    async fn ensure_collection(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl<T: StoredDocument> SingletonStore<T> for MemoryStore<T> {
    async fn first(&self) -> Result<Option<T>, StoreError> {
        Ok(self.documents.read().await.first().cloned())
    }

    async fn save(&self, document: &T) -> Result<T, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.first_mut() {
            Some(slot) => *slot = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(document.clone())
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut documents = self.documents.write().await;
        let removed = documents.len() as u64;
        documents.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.documents.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::{NewProject, Project};
    use crate::models::timestamp;
    use chrono::Duration;
    use mongodb::bson::oid::ObjectId;

    fn project(slug: &str, minutes: i64, published: bool) -> Project {
        NewProject {
            slug: slug.to_string(),
            is_published: Some(published),
            ..NewProject::default()
        }
        .into_project(ObjectId::new(), timestamp::now() + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn rejects_duplicate_slugs() {
        let store = MemoryStore::new();
        SlugStore::insert(&store, &project("a", 0, true)).await.unwrap();

        let err = SlugStore::insert(&store, &project("a", 1, true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { slug, .. } if slug == "a"));
    }

    #[tokio::test]
    async fn lists_published_newest_first_within_window() {
        let store = MemoryStore::new();
        for (slug, minutes, published) in [("a", 0, true), ("b", 1, false), ("c", 2, true), ("d", 3, true)] {
            SlugStore::insert(&store, &project(slug, minutes, published))
                .await
                .unwrap();
        }

        let filter = ListFilter::published();
        let page = SlugStore::find(&store, &filter, Some(Window { skip: 1, limit: 5 }))
            .await
            .unwrap();
        let slugs: Vec<&str> = page.iter().map(|project| project.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a"]);
        assert_eq!(SlugStore::count(&store, &filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn replace_refuses_to_take_another_slug() {
        let store = MemoryStore::new();
        SlugStore::insert(&store, &project("a", 0, true)).await.unwrap();
        SlugStore::insert(&store, &project("b", 0, true)).await.unwrap();

        let mut renamed = project("b", 0, true);
        renamed.slug = "a".into();
        assert!(store.replace_by_slug("b", &renamed).await.is_err());
        assert!(store.replace_by_slug("missing", &renamed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn singleton_save_keeps_one_document() {
        let store: MemoryStore<Project> = MemoryStore::new();
        SingletonStore::save(&store, &project("first", 0, true)).await.unwrap();
        SingletonStore::save(&store, &project("second", 0, true)).await.unwrap();

        assert_eq!(SingletonStore::count(&store).await.unwrap(), 1);
        let stored = SingletonStore::first(&store).await.unwrap().unwrap();
        assert_eq!(stored.slug, "second");
    }
}
