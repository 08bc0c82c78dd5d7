use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::models::timestamp;
use crate::services::db::{Connection, ReadyState};

/// Body of `GET /health`, always served with 200.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
    #[schema(value_type = String, example = "connected")]
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(with = "timestamp::date")]
    pub timestamp: DateTime<Utc>,
}

/**
 * dials when nothing has connected yet, then reports readiness
 * a failed dial is reported in the body, not as a failing status
 */
pub async fn check(connection: &Connection) -> HealthReport {
    if let Err(err) = connection.connect().await {
        warn!("health check could not reach the document store: {err}");
        return HealthReport {
            status: "error",
            database: ReadyState::Disconnected.as_str(),
            message: Some(err.to_string()),
            timestamp: timestamp::now(),
        };
    }

    let ready = connection.ready_state();
    HealthReport {
        status: if ready == ReadyState::Connected {
            "ok"
        } else {
            "degraded"
        },
        database: ready.as_str(),
        message: None,
        timestamp: timestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::db::{DbConfig, Lifecycle};

    #[tokio::test]
    async fn ready_connection_is_ok() {
        let report = check(&Connection::in_memory()).await;
        assert_eq!(report.status, "ok");
        assert_eq!(report.database, "connected");
        assert!(report.message.is_none());
    }

    #[tokio::test]
    async fn degraded_connection() {
        let connection = Connection::in_memory();
        connection.connect().await.unwrap();
        connection.mark(Lifecycle::Degraded);

        let report = check(&connection).await;
        assert_eq!(report.status, "degraded");
        assert_eq!(report.database, "disconnected");
    }

    #[tokio::test]
    async fn failed_dial_reports_error() {
        let connection = Connection::new(DbConfig {
            uri: "not-a-mongodb-uri".into(),
            db_name: "portfolio".into(),
        });
        let report = check(&connection).await;
        assert_eq!(report.status, "error");
        assert!(report.message.is_some());
    }
}
