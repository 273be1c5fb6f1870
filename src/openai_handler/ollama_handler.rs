use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{build_api_url, ChatMessage, ClientConfig, LlmClient};
use crate::entities::error::HookError;

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

/// Client for a local Ollama daemon (`/api/chat`, non streaming).
pub struct OllamaClient {
    client: Client,
    config: ClientConfig,
}

impl OllamaClient {
    pub fn new(config: ClientConfig) -> OllamaClient {
        OllamaClient {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, HookError> {
        let request = OllamaChatRequest {
            model: &self.config.model_name,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let res = self
            .client
            .post(build_api_url(&self.config.base_url, "api/chat"))
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(HookError::provider(format!("Ollama returned error ({status}): {body}")));
        }

        let response: OllamaChatResponse = serde_json::from_str(&body)
            .map_err(|e| HookError::provider(format!("Failed to parse Ollama response: {e}")))?;
        let output_text = response
            .message
            .map(|message| message.content)
            .ok_or_else(|| HookError::provider("No message found in Ollama response".to_string()))?;

        info!(
            target: "hook_generator",
            "llm_result provider=ollama model={} output={}",
            self.config.model_name,
            output_text
        );
        Ok(output_text)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
