use std::sync::Arc;

use models::blog_post::BlogPost;
use models::profile::Profile;
use models::project::Project;
use services::db::{Connection, MemoryStore, MongoStore, SingletonStore, SlugStore};

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod surfaces;

/**
 * everything a request handler needs
 * the stores share the connection handle, which is also kept for health checks
 */
#[derive(Clone)]
pub struct AppState {
    pub connection: Connection,
    pub projects: Arc<dyn SlugStore<Project>>,
    pub posts: Arc<dyn SlugStore<BlogPost>>,
    pub profiles: Arc<dyn SingletonStore<Profile>>,
}

impl AppState {
    pub fn mongo(connection: Connection) -> Self {
        Self {
            projects: Arc::new(MongoStore::<Project>::new(connection.clone())),
            posts: Arc::new(MongoStore::<BlogPost>::new(connection.clone())),
            profiles: Arc::new(MongoStore::<Profile>::new(connection.clone())),
            connection,
        }
    }

    /// Fresh, empty stores with nothing to dial.
    pub fn in_memory() -> Self {
        Self {
            connection: Connection::in_memory(),
            projects: Arc::new(MemoryStore::<Project>::new()),
            posts: Arc::new(MemoryStore::<BlogPost>::new()),
            profiles: Arc::new(MemoryStore::<Profile>::new()),
        }
    }
}
