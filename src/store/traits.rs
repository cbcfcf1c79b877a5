//! Record store trait — the orchestrator's contract with local persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{ProvisionedAgentRecord, RecordStatus};

/// A single-row status update.
///
/// `status` is always written; the optional fields are written only when
/// present, so a failed-agent patch can set the orphaned model id without
/// touching anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    pub status: RecordStatus,
    pub model_resource_id: Option<String>,
    pub agent_resource_id: Option<String>,
    pub error_message: Option<String>,
}

impl RecordPatch {
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            status: RecordStatus::Failed,
            model_resource_id: None,
            agent_resource_id: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn active(
        model_resource_id: impl Into<String>,
        agent_resource_id: impl Into<String>,
    ) -> Self {
        Self {
            status: RecordStatus::Active,
            model_resource_id: Some(model_resource_id.into()),
            agent_resource_id: Some(agent_resource_id.into()),
            error_message: None,
        }
    }

    pub fn with_model_resource_id(mut self, id: impl Into<String>) -> Self {
        self.model_resource_id = Some(id.into());
        self
    }
}

/// Backend-agnostic store for provisioning records.
///
/// Both operations are atomic single-row writes; the orchestrator never
/// performs multi-record transactions, and each record is written by exactly
/// one orchestrator invocation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: &ProvisionedAgentRecord) -> Result<(), StoreError>;

    /// Apply a patch to an existing record. Fails with
    /// [`StoreError::NotFound`] if the record does not exist.
    async fn update(&self, local_id: Uuid, patch: RecordPatch) -> Result<(), StoreError>;

    /// Fetch a record by id.
    async fn get(&self, local_id: Uuid) -> Result<Option<ProvisionedAgentRecord>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_patch_sets_only_status_and_message() {
        let patch = RecordPatch::failed("boom");
        assert_eq!(patch.status, RecordStatus::Failed);
        assert_eq!(patch.error_message.as_deref(), Some("boom"));
        assert!(patch.model_resource_id.is_none());
        assert!(patch.agent_resource_id.is_none());
    }

    #[test]
    fn failed_patch_can_retain_the_orphaned_model_id() {
        let patch = RecordPatch::failed("boom").with_model_resource_id("model-1");
        assert_eq!(patch.model_resource_id.as_deref(), Some("model-1"));
        assert!(patch.agent_resource_id.is_none());
    }

    #[test]
    fn active_patch_carries_both_ids() {
        let patch = RecordPatch::active("model-1", "agent-1");
        assert_eq!(patch.status, RecordStatus::Active);
        assert_eq!(patch.model_resource_id.as_deref(), Some("model-1"));
        assert_eq!(patch.agent_resource_id.as_deref(), Some("agent-1"));
        assert!(patch.error_message.is_none());
    }
}
