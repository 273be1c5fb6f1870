use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC: &str = "AI tools";
pub const DEFAULT_USAGE: &str = "short video";

/// A generated marketing line tagged with its rhetorical style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    pub hook_type: String,
    pub hook: String,
}

impl Hook {
    pub fn new(hook_type: impl Into<String>, hook: impl Into<String>) -> Hook {
        Hook {
            hook_type: hook_type.into(),
            hook: hook.into(),
        }
    }
}

/// What the user submits: the subject of the hooks and where they will be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRequest {
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_usage")]
    pub usage: String,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_usage() -> String {
    DEFAULT_USAGE.to_string()
}

impl HookRequest {
    pub fn new(topic: impl Into<String>, usage: impl Into<String>) -> HookRequest {
        HookRequest {
            topic: topic.into(),
            usage: usage.into(),
        }
    }
}

impl Default for HookRequest {
    fn default() -> Self {
        HookRequest::new(DEFAULT_TOPIC, DEFAULT_USAGE)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn deserialize_request_with_missing_fields_uses_defaults() {
        let request = serde_json::from_str::<HookRequest>("{\"topic\": \"coffee\"}")
            .expect("Deserialization shouldn't fail");
        assert_eq!(request, HookRequest::new("coffee", DEFAULT_USAGE));

        let request = serde_json::from_str::<HookRequest>("{}").unwrap();
        assert_eq!(request, HookRequest::default());
    }

    #[test]
    fn deserialize_hook_ignores_extra_fields() {
        let hook = serde_json::from_str::<Hook>(
            "{\"hook_type\": \"Question\", \"hook\": \"Ready?\", \"score\": 3}",
        )
        .unwrap();
        assert_eq!(hook, Hook::new("Question", "Ready?"));
    }
}
