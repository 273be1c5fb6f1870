use std::fmt;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use handlebars::RenderError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use serde_json::Error as SerdeError;

#[derive(Serialize, PartialEq)]
pub struct HookError {
    pub status_code: u32,
    #[serde(skip_serializing)]
    pub error_type: ErrorType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorType {
    InternalError,
    ApiError,
    ProviderError,
    ConfigError,
}

impl HookError {
    pub fn new(status_code: u32, error_type: ErrorType, message: String) -> HookError {
        tracing::debug!(target: "hook_generator", "status code: {status_code}; message : {message}");
        HookError { status_code, error_type, message }
    }

    pub fn provider(message: String) -> HookError {
        HookError::new(502, ErrorType::ProviderError, message)
    }

    pub fn config(message: String) -> HookError {
        HookError::new(500, ErrorType::ConfigError, message)
    }

    fn http_status(&self) -> StatusCode {
        u16::try_from(self.status_code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl fmt::Debug for HookError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for HookError {}

impl IntoResponse for HookError {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}

impl From<ReqwestError> for HookError {
    fn from(error: ReqwestError) -> HookError {
        HookError::provider(format!("Failed to reach the model provider: {}", error))
    }
}

impl From<SerdeError> for HookError {
    fn from(error: SerdeError) -> HookError {
        HookError::new(500, ErrorType::InternalError, format!("serde error : {}", error))
    }
}

impl From<std::io::Error> for HookError {
    fn from(error: std::io::Error) -> HookError {
        HookError::new(500, ErrorType::InternalError, format!("io error : {}", error))
    }
}

impl From<RenderError> for HookError {
    fn from(error: RenderError) -> HookError {
        HookError::new(500, ErrorType::InternalError, format!("template error : {}", error))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_provider_error_maps_to_bad_gateway() {
        let error = HookError::provider("GPT API error (500)".to_string());
        assert_eq!(error.http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.error_type, ErrorType::ProviderError);
    }

    #[test]
    fn test_unknown_status_code_falls_back_to_internal_error() {
        let error = HookError::new(9999, ErrorType::InternalError, "boom".to_string());
        assert_eq!(error.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialized_error_hides_error_type() {
        let error = HookError::config("OPENAI_API_KEY should be set".to_string());
        let serialized = serde_json::to_value(&error).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({ "status_code": 500, "message": "OPENAI_API_KEY should be set" })
        );
    }

    #[test]
    fn test_display_is_the_message() {
        let error = HookError::new(400, ErrorType::ApiError, "Unknown action: shout".to_string());
        assert_eq!(error.to_string(), "Unknown action: shout");
    }
}
