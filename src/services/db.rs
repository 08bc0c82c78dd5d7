pub mod connect_db;
pub mod memory_store;
pub mod mongo_store;
pub mod store;

pub use connect_db::{Connection, DbConfig, Lifecycle, ReadyState};
pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;
pub use store::{
    ListFilter, SingletonStore, SlugDocument, SlugStore, StoreError, StoredDocument, Window,
};
