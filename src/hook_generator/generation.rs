use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::cleaner::{parse_hooks, HookParseError};
use super::prompt::build_hook_prompt;
use crate::entities::error::HookError;
use crate::entities::hook::{Hook, HookRequest};
use crate::openai_handler::LlmClient;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HookOutcome {
    Success { hooks: Vec<Hook> },
    NotJson { message: String },
    ShapeMismatch { message: String },
}

impl From<Result<Vec<Hook>, HookParseError>> for HookOutcome {
    fn from(result: Result<Vec<Hook>, HookParseError>) -> HookOutcome {
        match result {
            Ok(hooks) => HookOutcome::Success { hooks },
            Err(HookParseError::NotJson(message)) => HookOutcome::NotJson { message },
            Err(HookParseError::ShapeMismatch(message)) => HookOutcome::ShapeMismatch { message },
        }
    }
}

/// One request/response cycle. Lives only as long as the HTTP response that
/// displays it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub id: Uuid,
    pub topic: String,
    pub usage: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
    /// Duration of the model call.
    pub elapsed_ms: u64,
    pub raw_response: String,
    pub outcome: HookOutcome,
}

impl GenerationReport {
    pub fn hooks(&self) -> Option<&[Hook]> {
        match &self.outcome {
            HookOutcome::Success { hooks } => Some(hooks),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.hooks().is_some()
    }
}

pub struct HookGenerator {
    client: Arc<dyn LlmClient>,
}

impl HookGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> HookGenerator {
        HookGenerator { client }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Builds the prompt, calls the model once and classifies its answer.
    /// Unusable output is part of the report; only a failed model call is
    /// an error.
    pub async fn generate(&self, request: &HookRequest) -> Result<GenerationReport, HookError> {
        let id = Uuid::new_v4();
        let started_at = Instant::now();
        let log_header = format!("generation_id: {}", id);
        info!(
            target: "hook_generator",
            "{} hook_generation_started topic={:?} usage={:?}",
            log_header,
            request.topic,
            request.usage
        );

        let prompt = build_hook_prompt(&request.topic, &request.usage);
        let raw_response = self.client.generate_response(&prompt).await.map_err(|e| {
            warn!(target: "hook_generator", "{} llm_call_failed error={}", log_header, e);
            e
        })?;

        let elapsed_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);

        let parsed = parse_hooks(&raw_response);
        match &parsed {
            Ok(hooks) => {
                info!(target: "hook_generator", "{} hooks_parsed count={}", log_header, hooks.len())
            }
            Err(error) => warn!(target: "hook_generator", "{} hooks_rejected reason={}", log_header, error),
        }

        Ok(GenerationReport {
            id,
            topic: request.topic.clone(),
            usage: request.usage.clone(),
            model: self.client.model_name().to_string(),
            generated_at: Utc::now(),
            elapsed_ms,
            raw_response,
            outcome: HookOutcome::from(parsed),
        })
    }
}
