use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::services::db::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub uri: String,
    pub db_name: String,
}

/// Where the connection handle is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Lifecycle {
    Uninitialized = 0,
    Connecting = 1,
    Ready = 2,
    Degraded = 3,
    Closing = 4,
    Closed = 5,
}

impl Lifecycle {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Lifecycle::Connecting,
            2 => Lifecycle::Ready,
            3 => Lifecycle::Degraded,
            4 => Lifecycle::Closing,
            5 => Lifecycle::Closed,
            _ => Lifecycle::Uninitialized,
        }
    }

    pub fn ready_state(self) -> ReadyState {
        match self {
            Lifecycle::Ready => ReadyState::Connected,
            Lifecycle::Connecting => ReadyState::Connecting,
            Lifecycle::Closing => ReadyState::Disconnecting,
            Lifecycle::Uninitialized | Lifecycle::Degraded | Lifecycle::Closed => {
                ReadyState::Disconnected
            }
        }
    }
}

/// Four-state readiness reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ReadyState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadyState::Disconnected => "disconnected",
            ReadyState::Connected => "connected",
            ReadyState::Connecting => "connecting",
            ReadyState::Disconnecting => "disconnecting",
        }
    }
}

#[derive(Debug, Default)]
struct LifecycleCell(AtomicU8);

impl LifecycleCell {
    fn get(&self) -> Lifecycle {
        Lifecycle::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, next: Lifecycle) {
        self.0.store(next as u8, Ordering::SeqCst);
    }

    fn transition(&self, from: Lifecycle, to: Lifecycle) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /**
     * driver topology events flip readiness
     * the driver reconnects on its own, this only reports
     */
    fn observe(&self, event: &SdamEvent) {
        match event {
            SdamEvent::TopologyDescriptionChanged(change) => {
                self.reachable(change.new_description.has_writable_server());
            }
            SdamEvent::ServerHeartbeatFailed(failed) => {
                debug!(server = %failed.server_address, "MongoDB heartbeat failed");
            }
            SdamEvent::TopologyClosed(_) => {
                self.set(Lifecycle::Closed);
                warn!("MongoDB disconnected");
            }
            _ => {}
        }
    }

    /**
     * readiness of the whole topology
     * a replica set member going down leaves the handle ready while a writable server remains
     */
    fn reachable(&self, writable: bool) {
        if writable {
            if self.transition(Lifecycle::Degraded, Lifecycle::Ready) {
                info!("MongoDB writable again");
            }
        } else if self.transition(Lifecycle::Ready, Lifecycle::Degraded) {
            warn!("MongoDB has no writable server, connection degraded");
        }
    }
}

struct Inner {
    target: Option<DbConfig>,
    lifecycle: Arc<LifecycleCell>,
    database: OnceCell<Database>,
}

/**
 * process-wide handle to the document store
 * cloned into every request, dials at most once
 */
#[derive(Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

impl Connection {
    pub fn new(config: DbConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                target: Some(config),
                lifecycle: Arc::new(LifecycleCell::default()),
                database: OnceCell::new(),
            }),
        }
    }

    /// A handle with nothing to dial, paired with the in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                target: None,
                lifecycle: Arc::new(LifecycleCell::default()),
                database: OnceCell::new(),
            }),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lifecycle.get()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.lifecycle().ready_state()
    }

    pub fn mark(&self, next: Lifecycle) {
        self.inner.lifecycle.set(next);
    }

    /**
     * idempotent: repeated calls reuse the first successful dial
     */
    pub async fn connect(&self) -> Result<(), StoreError> {
        if self.inner.target.is_none() {
            self.inner
                .lifecycle
                .transition(Lifecycle::Uninitialized, Lifecycle::Ready);
            return Ok(());
        }
        self.database().await.map(|_| ())
    }

    pub async fn database(&self) -> Result<Database, StoreError> {
        let Some(config) = &self.inner.target else {
            return Err(StoreError::Connection(
                "no document store configured".to_string(),
            ));
        };
        let database = self
            .inner
            .database
            .get_or_try_init(|| self.dial(config))
            .await?;
        Ok(database.clone())
    }

    async fn dial(&self, config: &DbConfig) -> Result<Database, StoreError> {
        self.mark(Lifecycle::Connecting);
        match open(config, self.inner.lifecycle.clone()).await {
            Ok(database) => {
                self.mark(Lifecycle::Ready);
                info!(db = %config.db_name, "Connected to MongoDB");
                Ok(database)
            }
            Err(err) => {
                self.mark(Lifecycle::Uninitialized);
                error!("MongoDB connection error: {err}");
                Err(StoreError::Connection(err.to_string()))
            }
        }
    }

    pub async fn shutdown(&self) {
        self.mark(Lifecycle::Closing);
        if let Some(database) = self.inner.database.get() {
            database.client().clone().shutdown().await;
        }
        self.mark(Lifecycle::Closed);
        info!("Document store connection closed");
    }
}

/**
 * parse the URI, subscribe the lifecycle to topology events, then ping
 * the client is only handed out once the server answers
 */
async fn open(
    config: &DbConfig,
    lifecycle: Arc<LifecycleCell>,
) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(config.uri.as_str()).await?;
    options.app_name = Some("portfolio-backend".to_string());
    options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
        lifecycle.observe(&event)
    }));

    let client = Client::with_options(options)?;
    let db = client.database(&config.db_name);
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_maps_onto_ready_states() {
        assert_eq!(Lifecycle::Uninitialized.ready_state(), ReadyState::Disconnected);
        assert_eq!(Lifecycle::Connecting.ready_state(), ReadyState::Connecting);
        assert_eq!(Lifecycle::Ready.ready_state(), ReadyState::Connected);
        assert_eq!(Lifecycle::Degraded.ready_state(), ReadyState::Disconnected);
        assert_eq!(Lifecycle::Closing.ready_state(), ReadyState::Disconnecting);
        assert_eq!(ReadyState::Disconnecting.as_str(), "disconnecting");
    }

    #[tokio::test]
    async fn in_memory_connect_is_idempotent() {
        let connection = Connection::in_memory();
        assert_eq!(connection.lifecycle(), Lifecycle::Uninitialized);

        connection.connect().await.unwrap();
        connection.connect().await.unwrap();
        assert_eq!(connection.ready_state(), ReadyState::Connected);
    }

    #[tokio::test]
    async fn connect_does_not_revive_a_degraded_handle() {
        let connection = Connection::in_memory();
        connection.connect().await.unwrap();
        connection.mark(Lifecycle::Degraded);

        connection.connect().await.unwrap();
        assert_eq!(connection.ready_state(), ReadyState::Disconnected);
    }

    #[test]
    fn readiness_follows_the_topology_not_single_members() {
        let cell = LifecycleCell::default();
        cell.set(Lifecycle::Ready);

        cell.reachable(true);
        assert_eq!(cell.get(), Lifecycle::Ready);

        cell.reachable(false);
        cell.reachable(false);
        assert_eq!(cell.get(), Lifecycle::Degraded);

        cell.reachable(true);
        assert_eq!(cell.get(), Lifecycle::Ready);
    }

    #[test]
    fn topology_changes_leave_pending_states_alone() {
        let cell = LifecycleCell::default();
        cell.set(Lifecycle::Connecting);
        cell.reachable(false);
        assert_eq!(cell.get(), Lifecycle::Connecting);

        cell.set(Lifecycle::Closing);
        cell.reachable(true);
        assert_eq!(cell.get(), Lifecycle::Closing);
    }

    #[tokio::test]
    async fn in_memory_handle_has_no_database() {
        let err = Connection::in_memory().database().await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[tokio::test]
    async fn malformed_uri_fails_and_resets_lifecycle() {
        let connection = Connection::new(DbConfig {
            uri: "not-a-mongodb-uri".into(),
            db_name: "portfolio".into(),
        });
        assert!(connection.connect().await.is_err());
        assert_eq!(connection.lifecycle(), Lifecycle::Uninitialized);
    }
}
