//! Remote agent platform — the third-party API that hosts model and agent
//! resources.
//!
//! The orchestrator only ever sees the [`RemoteAgentPlatform`] trait; the
//! HTTP implementation lives in [`http`].

pub mod http;

pub use http::HttpAgentPlatform;

use async_trait::async_trait;

use crate::compiler::{CompiledPromptSpec, VoiceEngineParameters};
use crate::error::RemoteError;

/// Typed client for the two resource-creation endpoints the orchestrator
/// consumes. Both calls are single-attempt from the orchestrator's point of
/// view; any retry policy lives inside the implementation.
#[async_trait]
pub trait RemoteAgentPlatform: Send + Sync {
    /// Create the model resource holding the system prompt and greeting,
    /// with "end call" as its single terminal capability. Returns the remote
    /// resource id.
    async fn create_model_resource(
        &self,
        prompt: &CompiledPromptSpec,
    ) -> Result<String, RemoteError>;

    /// Create the agent resource binding a model resource to a voice and the
    /// full voice-engine parameter set. Returns the remote resource id.
    async fn create_agent_resource(
        &self,
        model_resource_id: &str,
        voice_id: &str,
        params: &VoiceEngineParameters,
    ) -> Result<String, RemoteError>;
}
