//! Provisioning orchestrator.
//!
//! Straight-line sequential pipeline: validate → compile → insert local
//! record (`creating`) → create model resource → create agent resource →
//! finalize (`active`). Steps after the insert have a hard dependency order
//! and are never parallelized: the agent resource references the model
//! resource's id.
//!
//! Known limitations, on purpose:
//! - Not idempotent. Re-invoking `provision` with the same configuration
//!   creates new remote resources and a new record; deduplication belongs to
//!   the caller (e.g. disabling the submit action while a call is in
//!   flight).
//! - No compensating delete. If agent creation fails after the model
//!   resource exists, the orphaned model resource id is retained on the
//!   failed record for manual cleanup.
//! - No cancellation handling. A caller cancelled between insert and
//!   finalize leaves a `creating` record for an external sweep to resolve.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::compiler::{CompiledPromptSpec, Compiler, VoiceEngineParameters};
use crate::error::{PersistenceError, ProvisioningError, RemoteError, StoreError};
use crate::model::{OnboardingConfiguration, ProvisionedAgentRecord};
use crate::platform::RemoteAgentPlatform;
use crate::store::{RecordPatch, RecordStore};
use crate::validate::validate;

/// What the caller gets back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReceipt {
    pub local_id: Uuid,
    pub model_resource_id: String,
    pub agent_resource_id: String,
}

/// Everything needed to audit or replay a submission, stored on the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub configuration: OnboardingConfiguration,
    pub prompt: CompiledPromptSpec,
    pub engine: VoiceEngineParameters,
}

/// Sequences the two remote resource-creation calls and the local
/// bookkeeping around them.
pub struct Orchestrator {
    compiler: Compiler,
    platform: Arc<dyn RemoteAgentPlatform>,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    pub fn new(
        platform: Arc<dyn RemoteAgentPlatform>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            compiler: Compiler::new(Arc::clone(&clock)),
            platform,
            store,
            clock,
        }
    }

    /// Provision one submission end to end.
    pub async fn provision(
        &self,
        config: &OnboardingConfiguration,
    ) -> Result<ProvisionReceipt, ProvisioningError> {
        // 1. Validate. On failure: no record, no network.
        validate(config).map_err(ProvisioningError::Validation)?;

        // 2. Compile. Only fails on an unregistered vertical.
        let compiled = self.compiler.compile(config)?;

        // 3. Local record in `creating`, so a crash mid-flight is observable.
        let snapshot = ConfigSnapshot {
            configuration: config.clone(),
            prompt: compiled.prompt.clone(),
            engine: compiled.engine.clone(),
        };
        let snapshot_json = serde_json::to_value(&snapshot).map_err(|e| {
            PersistenceError::Insert(StoreError::Serialization(e.to_string()))
        })?;
        let record = ProvisionedAgentRecord::creating(
            config.owner_id.clone(),
            config.vertical,
            snapshot_json,
            self.clock.now(),
        );
        self.store
            .insert(&record)
            .await
            .map_err(PersistenceError::Insert)?;
        tracing::info!(
            local_id = %record.local_id,
            vertical = %config.vertical,
            "provisioning started"
        );

        // 4. Model resource.
        let model_resource_id = match self.platform.create_model_resource(&compiled.prompt).await
        {
            Ok(id) => id,
            Err(e) => {
                self.mark_failed(record.local_id, None, &e).await;
                return Err(e.into());
            }
        };

        // 5. Agent resource, bound to the model resource.
        let agent_resource_id = match self
            .platform
            .create_agent_resource(&model_resource_id, &config.voice_selection, &compiled.engine)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.mark_failed(record.local_id, Some(model_resource_id), &e)
                    .await;
                return Err(e.into());
            }
        };

        // 6. Finalize. A failure here leaves live, billable remote resources
        // untracked — the caller must treat it as a reconciliation case.
        if let Err(e) = self
            .store
            .update(
                record.local_id,
                RecordPatch::active(model_resource_id.clone(), agent_resource_id.clone()),
            )
            .await
        {
            tracing::error!(
                local_id = %record.local_id,
                model_resource_id = %model_resource_id,
                agent_resource_id = %agent_resource_id,
                error = %e,
                "remote resources created but final status write failed; record needs reconciliation"
            );
            return Err(PersistenceError::Finalize {
                local_id: record.local_id,
                source: e,
            }
            .into());
        }

        tracing::info!(
            local_id = %record.local_id,
            model_resource_id = %model_resource_id,
            agent_resource_id = %agent_resource_id,
            "provisioning complete"
        );
        Ok(ProvisionReceipt {
            local_id: record.local_id,
            model_resource_id,
            agent_resource_id,
        })
    }

    /// Mark the record failed with the remote error's message. Best-effort:
    /// a store failure here is logged, and the original remote error is
    /// still what the caller sees.
    async fn mark_failed(
        &self,
        local_id: Uuid,
        orphaned_model_id: Option<String>,
        error: &RemoteError,
    ) {
        let mut patch = RecordPatch::failed(error.to_string());
        if let Some(model_id) = orphaned_model_id {
            tracing::warn!(
                local_id = %local_id,
                model_resource_id = %model_id,
                "agent resource creation failed; model resource is orphaned and retained for manual cleanup"
            );
            patch = patch.with_model_resource_id(model_id);
        }
        if let Err(e) = self.store.update(local_id, patch).await {
            tracing::error!(
                local_id = %local_id,
                error = %e,
                "failed to mark record as failed"
            );
        }
    }
}
