//! Model clients. Everything that talks to a language-model provider goes
//! through [`LlmClient`], so the generator and the agent can be handed any
//! implementation (a real provider or a scripted one in tests).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::error::{ErrorType, HookError};
use crate::environment;

pub mod gpt_handler;
pub mod ollama_handler;

pub use gpt_handler::OpenAiClient;
pub use ollama_handler::OllamaClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> ChatMessage {
        ChatMessage { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> ChatMessage {
        ChatMessage { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> ChatMessage {
        ChatMessage { role: ChatRole::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Ollama,
}

impl LlmProvider {
    pub fn from_code(code: &str) -> Result<LlmProvider, HookError> {
        match code.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(HookError::new(
                500,
                ErrorType::ConfigError,
                format!("Unknown LLM provider: {other}"),
            )),
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "gpt-4o",
            LlmProvider::Ollama => "llama3",
        }
    }
}

/// A provider/model pair plus the sampling settings sent with every call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub provider: LlmProvider,
    pub model_name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ClientConfig {
    pub fn new(provider: LlmProvider, base_url: impl Into<String>) -> ClientConfig {
        ClientConfig {
            provider,
            model_name: provider.default_model().to_string(),
            base_url: base_url.into(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> ClientConfig {
        self.model_name = model_name.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> ClientConfig {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_env() -> Result<ClientConfig, HookError> {
        let provider = LlmProvider::from_code(&environment::get_llm_provider())?;
        let mut config = match provider {
            LlmProvider::OpenAi => ClientConfig::new(provider, environment::get_openai_api_base_url())
                .with_api_key(environment::get_openai_api_key()?),
            LlmProvider::Ollama => ClientConfig::new(provider, environment::get_ollama_base_url()),
        };
        if let Some(model_name) = environment::get_llm_model() {
            config.model_name = model_name;
        }
        config.temperature = environment::get_llm_temperature()?;
        config.max_tokens = environment::get_llm_max_tokens()?;
        Ok(config)
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a whole conversation and return the text of the model's reply.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, HookError>;

    /// Single-prompt shorthand for [`LlmClient::complete`].
    async fn generate_response(&self, prompt: &str) -> Result<String, HookError> {
        self.complete(&[ChatMessage::user(prompt)]).await
    }

    fn model_name(&self) -> &str;
}

pub fn create_client(config: ClientConfig) -> Result<Arc<dyn LlmClient>, HookError> {
    tracing::info!(
        target: "hook_generator",
        "llm_client provider={} model={} base_url={}",
        config.provider.to_code(),
        config.model_name,
        config.base_url
    );
    match config.provider {
        LlmProvider::OpenAi => Ok(Arc::new(OpenAiClient::new(config)?)),
        LlmProvider::Ollama => Ok(Arc::new(OllamaClient::new(config))),
    }
}

/// Joins `path` to a provider base url, accepting bases with or without a
/// trailing slash or `/v1` suffix.
pub(crate) fn build_api_url(base_url: &str, versioned_path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = versioned_path.trim_start_matches('/');
    match path.strip_prefix("v1/") {
        Some(unversioned) if base.ends_with("/v1") => format!("{}/{}", base, unversioned),
        _ => format!("{}/{}", base, path),
    }
}

#[cfg(test)]
pub mod fake {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replies with canned responses in order and records every conversation
    /// it was sent. Once the script is exhausted it keeps repeating the last
    /// reply.
    pub struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, HookError>>>,
        last_reply: Mutex<Option<String>>,
        pub received: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedClient {
        pub fn new(replies: Vec<&str>) -> ScriptedClient {
            ScriptedClient {
                replies: Mutex::new(replies.into_iter().map(|reply| Ok(reply.to_string())).collect()),
                last_reply: Mutex::new(None),
                received: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> ScriptedClient {
            let client = ScriptedClient::new(vec![]);
            client
                .replies
                .lock()
                .unwrap()
                .push_back(Err(HookError::provider(message.to_string())));
            client
        }

        pub fn calls(&self) -> usize {
            self.received.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, HookError> {
            self.received.lock().unwrap().push(messages.to_vec());
            let next = self.replies.lock().unwrap().pop_front();
            match next {
                Some(Ok(reply)) => {
                    *self.last_reply.lock().unwrap() = Some(reply.clone());
                    Ok(reply)
                }
                Some(Err(error)) => Err(error),
                None => self
                    .last_reply
                    .lock()
                    .unwrap()
                    .clone()
                    .ok_or_else(|| HookError::provider("script exhausted".to_string())),
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }
}
