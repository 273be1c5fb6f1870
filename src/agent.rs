//! Thought / Action / PAUSE / Action_Response loop. The model asks for a
//! tool by emitting a JSON action object; the tool output is sent back as
//! the next user message until the model answers without an action or the
//! turn budget runs out.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::entities::error::{ErrorType, HookError};
use crate::hook_generator::cleaner::extract_json_objects;
use crate::openai_handler::{ChatMessage, LlmClient};

pub mod tools;

const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("agent/prompts/system.md");
pub const DEFAULT_MAX_TURNS: usize = 5;

pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn call(&self, params: &Map<String, Value>) -> Result<String, HookError>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionCall {
    pub function_name: String,
    #[serde(default)]
    pub function_params: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentTurn {
    pub number: usize,
    pub response: String,
    pub action: Option<ActionCall>,
    pub action_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentRun {
    pub turns: Vec<AgentTurn>,
    /// The model's last reply.
    pub answer: String,
    /// False when the loop stopped on the turn budget rather than on a reply
    /// without action.
    pub finished: bool,
}

/// The first JSON object of `response` that names a function.
pub fn find_action(response: &str) -> Option<ActionCall> {
    extract_json_objects(response)
        .into_iter()
        .find_map(|object| serde_json::from_value::<ActionCall>(object).ok())
}

pub struct Agent {
    client: Arc<dyn LlmClient>,
    tools: Vec<Box<dyn Tool>>,
    max_turns: usize,
}

impl Agent {
    pub fn new(client: Arc<dyn LlmClient>) -> Agent {
        Agent {
            client,
            tools: Vec::new(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Agent {
        self.max_turns = max_turns;
        self
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.retain(|existing| existing.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn construct_system_prompt(&self) -> String {
        let actions_description = self
            .tools
            .iter()
            .map(|tool| format!("{}:\n {}", tool.name(), tool.description().trim()))
            .collect::<Vec<_>>()
            .join("\n");
        SYSTEM_PROMPT_TEMPLATE
            .trim()
            .replacen("{actions_list}", &actions_description, 1)
    }

    fn find_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    pub async fn run(&self, user_query: &str) -> Result<AgentRun, HookError> {
        let mut messages = vec![
            ChatMessage::system(self.construct_system_prompt()),
            ChatMessage::user(user_query),
        ];
        let mut turns = Vec::new();
        let mut finished = false;

        for number in 1..=self.max_turns {
            let response = self.client.complete(&messages).await?;
            info!(target: "hook_generator", "agent_turn={} response={}", number, response);
            messages.push(ChatMessage::assistant(response.clone()));

            let Some(action) = find_action(&response) else {
                turns.push(AgentTurn { number, response, action: None, action_response: None });
                finished = true;
                break;
            };

            let params = Value::Object(action.function_params.clone()).to_string();
            let tool = self.find_tool(&action.function_name).ok_or_else(|| {
                HookError::new(
                    400,
                    ErrorType::ApiError,
                    format!("Unknown action: {}: {}", action.function_name, params),
                )
            })?;
            info!(target: "hook_generator", " -- running {} with {}", action.function_name, params);
            let result = tool.call(&action.function_params)?;
            messages.push(ChatMessage::user(format!("Action_Response: {}", result)));

            turns.push(AgentTurn {
                number,
                response,
                action: Some(action),
                action_response: Some(result),
            });
        }

        let answer = turns.last().map(|turn| turn.response.clone()).unwrap_or_default();
        Ok(AgentRun { turns, answer, finished })
    }
}
