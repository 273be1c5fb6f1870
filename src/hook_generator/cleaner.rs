use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::entities::hook::Hook;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookParseError {
    /// The cleaned text is not JSON at all.
    NotJson(String),
    /// Valid JSON, but not a non-empty list of `{hook_type, hook}` records.
    ShapeMismatch(String),
}

impl HookParseError {
    pub fn message(&self) -> &str {
        match self {
            HookParseError::NotJson(message) | HookParseError::ShapeMismatch(message) => message,
        }
    }
}

impl fmt::Display for HookParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HookParseError::NotJson(message) => write!(f, "not valid JSON: {message}"),
            HookParseError::ShapeMismatch(message) => write!(f, "not a list of hooks: {message}"),
        }
    }
}

impl std::error::Error for HookParseError {}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // Opening fence with an optional language tag, closing fence at the very end.
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)\A```(?:json\b|[A-Za-z0-9_+.-]+[ \t]*\r?\n)?\s*(?P<body>.*?)\s*```\z")
            .expect("fence pattern should be a valid regex")
    })
}

/// Trims `raw` and, when it is wrapped in a markdown code fence (opening and
/// closing delimiters both present), returns the fenced body. Anything else
/// comes back trimmed but otherwise untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match fence_regex().captures(trimmed).and_then(|captures| captures.name("body")) {
        Some(body) => body.as_str().trim(),
        None => trimmed,
    }
}

/// Cleans the model output and parses it as JSON. `None` when it does not
/// parse; no shape check is made.
pub fn clean_and_validate_json(raw: &str) -> Option<Value> {
    serde_json::from_str(strip_code_fence(raw)).ok()
}

/// Cleans, parses and checks that the output is a non-empty array of hooks.
pub fn parse_hooks(raw: &str) -> Result<Vec<Hook>, HookParseError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| HookParseError::NotJson(e.to_string()))?;
    validate_hooks(value)
}

pub fn validate_hooks(value: Value) -> Result<Vec<Hook>, HookParseError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(HookParseError::ShapeMismatch(format!(
                "expected an array of hooks, got {}",
                value_kind(&other)
            )))
        }
    };
    if items.is_empty() {
        return Err(HookParseError::ShapeMismatch("the response contains no hooks".to_string()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Hook>(item)
                .map_err(|e| HookParseError::ShapeMismatch(format!("hook #{}: {}", index + 1, e)))
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Every JSON object embedded in free text, in order of appearance.
/// Objects nested in an extracted object are not reported separately.
pub fn extract_json_objects(text: &str) -> Vec<Value> {
    let mut objects = Vec::new();
    let mut offset = 0;
    while let Some(position) = text[offset..].find('{') {
        let start = offset + position;
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                offset = start + stream.byte_offset();
                objects.push(value);
            }
            _ => offset = start + 1,
        }
    }
    objects
}
