//! End-to-end orchestration scenarios against mock collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use callsmith::clock::{Clock, FixedClock};
use callsmith::compiler::{CompiledPromptSpec, VoiceEngineParameters};
use callsmith::error::{PersistenceError, ProvisioningError, RemoteError, StoreError};
use callsmith::model::{
    BusinessFacts, OnboardingConfiguration, Personality, ProvisionedAgentRecord, RecordStatus,
    Vertical,
};
use callsmith::platform::RemoteAgentPlatform;
use callsmith::provision::Orchestrator;
use callsmith::store::{RecordPatch, RecordStore};

// ── Mock platform ───────────────────────────────────────────────────

#[derive(Default)]
struct MockPlatform {
    model_calls: AtomicUsize,
    agent_calls: AtomicUsize,
    fail_model: AtomicBool,
    fail_agent: AtomicBool,
    last_agent_request: Mutex<Option<(String, String, VoiceEngineParameters)>>,
}

#[async_trait]
impl RemoteAgentPlatform for MockPlatform {
    async fn create_model_resource(
        &self,
        _prompt: &CompiledPromptSpec,
    ) -> Result<String, RemoteError> {
        self.model_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_model.load(Ordering::SeqCst) {
            return Err(RemoteError::Api {
                endpoint: "model resource",
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok("model-1".to_string())
    }

    async fn create_agent_resource(
        &self,
        model_resource_id: &str,
        voice_id: &str,
        params: &VoiceEngineParameters,
    ) -> Result<String, RemoteError> {
        self.agent_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_agent_request.lock().unwrap() = Some((
            model_resource_id.to_string(),
            voice_id.to_string(),
            params.clone(),
        ));
        if self.fail_agent.load(Ordering::SeqCst) {
            return Err(RemoteError::Api {
                endpoint: "agent resource",
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok("agent-1".to_string())
    }
}

// ── Mock store ──────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryStore {
    records: Mutex<HashMap<Uuid, ProvisionedAgentRecord>>,
    insert_calls: AtomicUsize,
    fail_insert: AtomicBool,
    fail_update: AtomicBool,
}

impl MemoryStore {
    fn single_record(&self) -> ProvisionedAgentRecord {
        let records = self.records.lock().unwrap();
        assert_eq!(records.len(), 1, "expected exactly one record");
        records.values().next().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: &ProvisionedAgentRecord) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Query("insert refused".to_string()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.local_id, record.clone());
        Ok(())
    }

    async fn update(&self, local_id: Uuid, patch: RecordPatch) -> Result<(), StoreError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StoreError::Query("update refused".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&local_id)
            .ok_or(StoreError::NotFound(local_id))?;
        record.status = patch.status;
        if let Some(id) = patch.model_resource_id {
            record.model_resource_id = Some(id);
        }
        if let Some(id) = patch.agent_resource_id {
            record.agent_resource_id = Some(id);
        }
        if let Some(message) = patch.error_message {
            record.error_message = Some(message);
        }
        Ok(())
    }

    async fn get(&self, local_id: Uuid) -> Result<Option<ProvisionedAgentRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(&local_id).cloned())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
    ))
}

fn tonys_pizza() -> OnboardingConfiguration {
    OnboardingConfiguration {
        owner_id: "acct-1".to_string(),
        vertical: Vertical::Restaurant,
        business: BusinessFacts {
            name: "Tony's Pizza".to_string(),
            phone: "555-0100".to_string(),
            knowledge: Some("Margherita $12\nPepperoni $14".to_string()),
            ..Default::default()
        },
        personality: Some(Personality::new(8, 5, 7, 2)),
        voice_selection: "v1".to_string(),
        free_text_instructions: None,
    }
}

fn orchestrator(
    platform: &Arc<MockPlatform>,
    store: &Arc<MemoryStore>,
) -> Orchestrator {
    Orchestrator::new(
        Arc::clone(platform) as Arc<dyn RemoteAgentPlatform>,
        Arc::clone(store) as Arc<dyn RecordStore>,
        fixed_clock(),
    )
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn happy_path_ends_active_with_both_ids() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let receipt = orchestrator(&platform, &store)
        .provision(&tonys_pizza())
        .await
        .unwrap();

    assert_eq!(receipt.model_resource_id, "model-1");
    assert_eq!(receipt.agent_resource_id, "agent-1");

    let record = store.single_record();
    assert_eq!(record.local_id, receipt.local_id);
    assert_eq!(record.status, RecordStatus::Active);
    assert_eq!(record.model_resource_id.as_deref(), Some("model-1"));
    assert_eq!(record.agent_resource_id.as_deref(), Some("agent-1"));
    assert!(record.error_message.is_none());

    // The agent call carried the voice selection and the compiled engine
    // parameters (pace 5 → speed 1.0; chattiness 7 → backchannel 0.7).
    let (model_id, voice_id, params) =
        platform.last_agent_request.lock().unwrap().clone().unwrap();
    assert_eq!(model_id, "model-1");
    assert_eq!(voice_id, "v1");
    assert_eq!(params.voice_speed, 1.0);
    assert_eq!(params.backchannel_frequency, 0.7);
}

#[tokio::test]
async fn snapshot_on_the_record_allows_replay() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    orchestrator(&platform, &store)
        .provision(&tonys_pizza())
        .await
        .unwrap();

    let record = store.single_record();
    let snapshot = &record.config_snapshot;
    assert_eq!(snapshot["configuration"]["business"]["name"], "Tony's Pizza");
    assert!(snapshot["prompt"]["greeting"]
        .as_str()
        .unwrap()
        .contains("Tony's Pizza"));
    assert_eq!(snapshot["engine"]["voice_speed"], 1.0);
}

#[tokio::test]
async fn validation_failure_makes_no_calls_and_no_record() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let mut config = tonys_pizza();
    config.business.name = String::new();

    let err = orchestrator(&platform, &store)
        .provision(&config)
        .await
        .unwrap_err();

    match err {
        ProvisioningError::Validation(issues) => {
            assert!(issues.iter().any(|i| i.field == "business.name"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    assert_eq!(platform.model_calls.load(Ordering::SeqCst), 0);
    assert_eq!(platform.agent_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn model_failure_skips_the_agent_call() {
    let platform = Arc::new(MockPlatform::default());
    platform.fail_model.store(true, Ordering::SeqCst);
    let store = Arc::new(MemoryStore::default());

    let err = orchestrator(&platform, &store)
        .provision(&tonys_pizza())
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisioningError::Remote(_)));
    assert_eq!(platform.agent_calls.load(Ordering::SeqCst), 0);

    let record = store.single_record();
    assert_eq!(record.status, RecordStatus::Failed);
    assert!(record.error_message.as_deref().unwrap().contains("500"));
    assert!(record.model_resource_id.is_none());
    assert!(record.agent_resource_id.is_none());
}

#[tokio::test]
async fn agent_failure_retains_the_orphaned_model_id() {
    let platform = Arc::new(MockPlatform::default());
    platform.fail_agent.store(true, Ordering::SeqCst);
    let store = Arc::new(MemoryStore::default());

    let err = orchestrator(&platform, &store)
        .provision(&tonys_pizza())
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisioningError::Remote(_)));

    let record = store.single_record();
    assert_eq!(record.status, RecordStatus::Failed);
    assert!(!record.error_message.as_deref().unwrap().is_empty());
    // The model resource exists remotely; its id is kept for manual cleanup.
    assert_eq!(record.model_resource_id.as_deref(), Some("model-1"));
    assert!(record.agent_resource_id.is_none());
}

#[tokio::test]
async fn finalize_failure_is_a_persistence_error() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let orch = orchestrator(&platform, &store);

    // The insert goes through; only the final status write is refused.
    store.fail_update.store(true, Ordering::SeqCst);

    let err = orch.provision(&tonys_pizza()).await.unwrap_err();

    match err {
        ProvisioningError::Persistence(PersistenceError::Finalize { local_id, .. }) => {
            // Both remote resources were created; the record is stuck in
            // `creating` pending reconciliation.
            let record = store.single_record();
            assert_eq!(record.local_id, local_id);
            assert_eq!(record.status, RecordStatus::Creating);
        }
        other => panic!("expected finalize persistence error, got {other:?}"),
    }
    assert_eq!(platform.model_calls.load(Ordering::SeqCst), 1);
    assert_eq!(platform.agent_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn insert_failure_prevents_any_remote_call() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    store.fail_insert.store(true, Ordering::SeqCst);

    let err = orchestrator(&platform, &store)
        .provision(&tonys_pizza())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProvisioningError::Persistence(PersistenceError::Insert(_))
    ));
    assert_eq!(platform.model_calls.load(Ordering::SeqCst), 0);
    assert_eq!(platform.agent_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn resubmission_creates_a_fresh_record_and_fresh_resources() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let orch = orchestrator(&platform, &store);

    let config = tonys_pizza();
    let first = orch.provision(&config).await.unwrap();
    let second = orch.provision(&config).await.unwrap();

    assert_ne!(first.local_id, second.local_id);
    assert_eq!(store.records.lock().unwrap().len(), 2);
    assert_eq!(platform.model_calls.load(Ordering::SeqCst), 2);
    assert_eq!(platform.agent_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unregistered_vertical_never_reaches_the_store() {
    // The built-in registry covers all four verticals, so this goes through
    // the compiler directly with an empty registry.
    use callsmith::compiler::Compiler;
    use callsmith::error::ConfigurationError;
    use std::collections::HashMap;

    let compiler = Compiler::with_templates(HashMap::new(), fixed_clock());
    let err = compiler.compile(&tonys_pizza()).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnregisteredVertical(_)));
}
