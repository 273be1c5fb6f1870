extern crate dotenv;

use dotenv::dotenv;
use crate::entities::error::HookError;

fn get_var(key: &str) -> Option<String> {
    dotenv().ok();
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn get_llm_provider() -> String {
    get_var("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string())
}

pub fn get_llm_model() -> Option<String> {
    get_var("LLM_MODEL")
}

pub fn get_openai_api_key() -> Result<String, HookError> {
    get_var("OPENAI_API_KEY")
        .ok_or_else(|| HookError::config("OPENAI_API_KEY should be set".to_string()))
}

pub fn get_openai_api_base_url() -> String {
    get_var("OPENAI_API_BASE_URL").unwrap_or_else(|| "https://api.openai.com".to_string())
}

pub fn get_ollama_base_url() -> String {
    get_var("OLLAMA_BASE_URL").unwrap_or_else(|| "http://localhost:11434".to_string())
}

pub fn get_llm_temperature() -> Result<f32, HookError> {
    match get_var("LLM_TEMPERATURE") {
        None => Ok(0.7),
        Some(value) => value
            .parse()
            .map_err(|_| HookError::config(format!("LLM_TEMPERATURE should be a number, got {value}"))),
    }
}

pub fn get_llm_max_tokens() -> Result<u32, HookError> {
    match get_var("LLM_MAX_TOKENS") {
        None => Ok(1024),
        Some(value) => value
            .parse()
            .map_err(|_| HookError::config(format!("LLM_MAX_TOKENS should be a positive integer, got {value}"))),
    }
}

pub fn get_server_address() -> String {
    get_var("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string())
}

/// Regex of the origins allowed by CORS. `None` means any origin.
pub fn get_allow_origin() -> Option<String> {
    get_var("ALLOW_ORIGIN")
}
