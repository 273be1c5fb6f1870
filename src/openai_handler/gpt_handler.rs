use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{build_api_url, ChatMessage, ClientConfig, LlmClient};
use crate::entities::error::HookError;

#[derive(Debug, Serialize)]
struct GPTRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GPTResponse {
    choices: Vec<GPTChoice>,
}

#[derive(Debug, Deserialize)]
struct GPTChoice {
    message: GPTMessageResponse,
}

#[derive(Debug, Deserialize)]
struct GPTMessageResponse {
    content: Option<String>,
}

/// Chat Completions client (`/v1/chat/completions`).
pub struct OpenAiClient {
    client: Client,
    config: ClientConfig,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<OpenAiClient, HookError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| HookError::config("OpenAI client needs an API key".to_string()))?;
        Ok(OpenAiClient {
            client: Client::new(),
            config,
            api_key,
        })
    }

    pub fn request_url(&self) -> String {
        build_api_url(&self.config.base_url, "v1/chat/completions")
    }
}

fn extract_message_content(body: &str) -> Result<String, HookError> {
    let gpt_response: GPTResponse = serde_json::from_str(body)
        .map_err(|e| HookError::provider(format!("Failed to parse GPT response: {e}")))?;
    gpt_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| HookError::provider("No choices[0].message.content found in GPT response".to_string()))
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, HookError> {
        let request_url = self.request_url();
        let gpt_request = GPTRequest {
            model: &self.config.model_name,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&gpt_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(HookError::provider(format!("GPT API error ({status}): {body}")));
        }

        let output_text = extract_message_content(&body)?;
        info!(
            target: "hook_generator",
            "llm_result provider=openai model={} output={}",
            self.config.model_name,
            output_text
        );
        Ok(output_text)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
