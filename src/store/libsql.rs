//! libSQL backend — async `RecordStore` implementation.
//!
//! Supports local file and in-memory databases. Timestamps are written as
//! RFC 3339 strings; the config snapshot is stored as a JSON text column.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{params, Connection, Database as LibSqlDatabase};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{ProvisionedAgentRecord, RecordStatus, Vertical};
use crate::store::traits::{RecordPatch, RecordStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS provisioned_agents (
    local_id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    vertical TEXT NOT NULL,
    model_resource_id TEXT,
    agent_resource_id TEXT,
    status TEXT NOT NULL,
    error_message TEXT,
    config_snapshot TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_provisioned_agents_owner ON provisioned_agents(owner_id);
";

/// libSQL record store.
///
/// Holds a single connection reused for all operations;
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlRecordStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlRecordStore {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "record store opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to create database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(SCHEMA)
            .await
            .map_err(|e| StoreError::Query(format!("schema init failed: {e}")))?;
        Ok(())
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Convert `Option<String>` to a libsql value (NULL when absent).
fn opt_text(s: Option<String>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s),
        None => libsql::Value::Null,
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn str_to_status(s: &str) -> RecordStatus {
    match s {
        "creating" => RecordStatus::Creating,
        "active" => RecordStatus::Active,
        "failed" => RecordStatus::Failed,
        _ => RecordStatus::Draft,
    }
}

fn str_to_vertical(s: &str) -> Result<Vertical, StoreError> {
    match s {
        "restaurant" => Ok(Vertical::Restaurant),
        "healthcare" => Ok(Vertical::Healthcare),
        "receptionist" => Ok(Vertical::Receptionist),
        "contact-center" => Ok(Vertical::ContactCenter),
        other => Err(StoreError::Serialization(format!(
            "unknown vertical in store: {other}"
        ))),
    }
}

/// Map a libsql row to a record.
///
/// Column order: 0:local_id, 1:owner_id, 2:vertical, 3:model_resource_id,
/// 4:agent_resource_id, 5:status, 6:error_message, 7:config_snapshot,
/// 8:created_at, 9:updated_at
fn row_to_record(row: &libsql::Row) -> Result<ProvisionedAgentRecord, StoreError> {
    let get_text = |i: i32| -> Result<String, StoreError> {
        row.get::<String>(i)
            .map_err(|e| StoreError::Query(format!("column {i}: {e}")))
    };

    let local_id = Uuid::parse_str(&get_text(0)?)
        .map_err(|e| StoreError::Serialization(format!("bad local_id: {e}")))?;
    let config_snapshot: serde_json::Value = serde_json::from_str(&get_text(7)?)
        .map_err(|e| StoreError::Serialization(format!("bad config snapshot: {e}")))?;

    Ok(ProvisionedAgentRecord {
        local_id,
        owner_id: get_text(1)?,
        vertical: str_to_vertical(&get_text(2)?)?,
        model_resource_id: row.get::<String>(3).ok(),
        agent_resource_id: row.get::<String>(4).ok(),
        status: str_to_status(&get_text(5)?),
        error_message: row.get::<String>(6).ok(),
        config_snapshot,
        created_at: parse_datetime(&get_text(8)?),
        updated_at: parse_datetime(&get_text(9)?),
    })
}

#[async_trait]
impl RecordStore for LibSqlRecordStore {
    async fn insert(&self, record: &ProvisionedAgentRecord) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&record.config_snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO provisioned_agents \
                 (local_id, owner_id, vertical, model_resource_id, agent_resource_id, \
                  status, error_message, config_snapshot, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.local_id.to_string(),
                    record.owner_id.clone(),
                    record.vertical.as_str(),
                    opt_text(record.model_resource_id.clone()),
                    opt_text(record.agent_resource_id.clone()),
                    record.status.as_str(),
                    opt_text(record.error_message.clone()),
                    snapshot,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| StoreError::Query(format!("insert failed: {e}")))?;
        Ok(())
    }

    async fn update(&self, local_id: Uuid, patch: RecordPatch) -> Result<(), StoreError> {
        // COALESCE keeps existing values where the patch carries None.
        let changed = self
            .conn
            .execute(
                "UPDATE provisioned_agents SET \
                 status = ?2, \
                 model_resource_id = COALESCE(?3, model_resource_id), \
                 agent_resource_id = COALESCE(?4, agent_resource_id), \
                 error_message = COALESCE(?5, error_message), \
                 updated_at = ?6 \
                 WHERE local_id = ?1",
                params![
                    local_id.to_string(),
                    patch.status.as_str(),
                    opt_text(patch.model_resource_id),
                    opt_text(patch.agent_resource_id),
                    opt_text(patch.error_message),
                    Utc::now().to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| StoreError::Query(format!("update failed: {e}")))?;

        if changed == 0 {
            return Err(StoreError::NotFound(local_id));
        }
        Ok(())
    }

    async fn get(&self, local_id: Uuid) -> Result<Option<ProvisionedAgentRecord>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT local_id, owner_id, vertical, model_resource_id, agent_resource_id, \
                 status, error_message, config_snapshot, created_at, updated_at \
                 FROM provisioned_agents WHERE local_id = ?1",
                params![local_id.to_string()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("select failed: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| StoreError::Query(format!("row fetch failed: {e}")))?;
        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}
