//! HTTP implementation of the remote agent platform client.
//!
//! Retry contract: at most one retry on a transport-level failure, zero
//! retries on an application (HTTP status) error — retrying a request the
//! platform already saw risks duplicate resource creation. Any non-2xx
//! response is a hard typed failure; there is no partial-success parsing.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledPromptSpec, VoiceEngineParameters};
use crate::config::PlatformConfig;
use crate::error::{ConfigurationError, RemoteError};
use crate::platform::RemoteAgentPlatform;

const MODEL_ENDPOINT: &str = "model resource";
const AGENT_ENDPOINT: &str = "agent resource";

/// Thin typed wrapper over the platform's two resource-creation endpoints.
pub struct HttpAgentPlatform {
    client: reqwest::Client,
    base_url: String,
    config: PlatformConfig,
}

#[derive(Serialize)]
struct TerminalCapability {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ModelResourceBody<'a> {
    system_prompt: &'a str,
    greeting: &'a str,
    capabilities: Vec<TerminalCapability>,
}

#[derive(Serialize)]
struct AgentResourceBody<'a> {
    model_resource_id: &'a str,
    voice_id: &'a str,
    #[serde(flatten)]
    parameters: &'a VoiceEngineParameters,
}

#[derive(Deserialize)]
struct CreatedResource {
    id: String,
}

impl HttpAgentPlatform {
    pub fn new(config: PlatformConfig) -> Result<Self, ConfigurationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigurationError::InvalidValue {
                key: "platform http client".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body and parse the created resource id.
    async fn post_create<B: Serialize>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<String, RemoteError> {
        let mut attempts = 0;
        let response = loop {
            attempts += 1;
            let result = self
                .client
                .post(self.url(path))
                .bearer_auth(self.config.api_key.expose_secret())
                .json(body)
                .send()
                .await;
            match result {
                Ok(response) => break response,
                Err(e) if attempts == 1 => {
                    tracing::warn!(endpoint, error = %e, "transport failure, retrying once");
                }
                Err(e) => {
                    return Err(RemoteError::Transport {
                        endpoint,
                        message: e.to_string(),
                    });
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedResource =
            response
                .json()
                .await
                .map_err(|e| RemoteError::InvalidResponse {
                    endpoint,
                    message: e.to_string(),
                })?;
        Ok(created.id)
    }
}

#[async_trait]
impl RemoteAgentPlatform for HttpAgentPlatform {
    async fn create_model_resource(
        &self,
        prompt: &CompiledPromptSpec,
    ) -> Result<String, RemoteError> {
        let body = ModelResourceBody {
            system_prompt: &prompt.system_prompt,
            greeting: &prompt.greeting,
            capabilities: vec![TerminalCapability { kind: "end_call" }],
        };
        self.post_create(MODEL_ENDPOINT, "/v1/model-resources", &body)
            .await
    }

    async fn create_agent_resource(
        &self,
        model_resource_id: &str,
        voice_id: &str,
        params: &VoiceEngineParameters,
    ) -> Result<String, RemoteError> {
        let body = AgentResourceBody {
            model_resource_id,
            voice_id,
            parameters: params,
        };
        self.post_create(AGENT_ENDPOINT, "/v1/agent-resources", &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vertical;
    use secrecy::SecretString;

    #[test]
    fn model_body_carries_prompt_greeting_and_end_call() {
        let body = ModelResourceBody {
            system_prompt: "You are the phone host.",
            greeting: "Hello!",
            capabilities: vec![TerminalCapability { kind: "end_call" }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["system_prompt"], "You are the phone host.");
        assert_eq!(json["greeting"], "Hello!");
        assert_eq!(json["capabilities"][0]["type"], "end_call");
        assert_eq!(json["capabilities"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn agent_body_flattens_every_engine_parameter() {
        let params = VoiceEngineParameters::defaults_for(Vertical::Restaurant);
        let body = AgentResourceBody {
            model_resource_id: "model-1",
            voice_id: "v1",
            parameters: &params,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model_resource_id"], "model-1");
        assert_eq!(json["voice_id"], "v1");
        assert_eq!(json["voice_speed"], 1.0);
        assert_eq!(json["ambient_sound_profile"], "restaurant");
        assert_eq!(json["max_call_duration_ms"], 1_800_000);
        assert_eq!(json["end_call_after_silence_ms"], 30_000);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let platform = HttpAgentPlatform::new(PlatformConfig::new(
            "https://api.example.com/",
            SecretString::from("key"),
        ))
        .unwrap();
        assert_eq!(
            platform.url("/v1/model-resources"),
            "https://api.example.com/v1/model-resources"
        );
    }
}
