use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Example hook patterns embedded in every generation prompt, one
/// `Hook Type,"Template",Use In` row per line.
pub const HOOK_EXAMPLES: &str = include_str!("prompts/hook_examples.csv");

pub const QUICK_PROMPT: &str = "generate a sentence of 6 words about rain";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookTemplate {
    pub hook_type: String,
    pub template: String,
    pub use_in: String,
}

/// Inputs are inserted as-is in a single pass, they are never scanned for
/// placeholders themselves.
pub fn build_hook_prompt(topic: &str, usage: &str) -> String {
    format!(
        r#"as an expert copywriter specialized in hook generation, your task is to
analyze the [Provided_Hook_Examples].

Use the templates that fit most to generate 3 new Hooks
for the following topic: {topic} and Usage in: {usage}.

The output should be ONLY valid JSON as follows:
[
  {{
    "hook_type": "The chosen hook type",
    "hook": "the generated hook"
  }},
  {{
    "hook_type": "The chosen hook type",
    "hook": "the generated hook"
  }},
  {{
    "hook_type": "The chosen hook type",
    "hook": "the generated hook"
  }}
]

[Provided_Hook_Examples]:
"{examples}"

The JSON object:

"#,
        topic = topic,
        usage = usage,
        examples = HOOK_EXAMPLES.trim_end()
    )
}

fn template_row_regex() -> &'static Regex {
    static TEMPLATE_ROW: OnceLock<Regex> = OnceLock::new();
    TEMPLATE_ROW.get_or_init(|| {
        Regex::new(r#"^(?P<hook_type>[^,"]+),"(?P<template>[^"]*)",(?P<use_in>.+)$"#)
            .expect("template row should be a valid regex")
    })
}

/// Rows of [`HOOK_EXAMPLES`]; the header and anything that does not look
/// like a row are skipped.
pub fn hook_templates() -> Vec<HookTemplate> {
    HOOK_EXAMPLES
        .lines()
        .filter_map(|line| template_row_regex().captures(line.trim()))
        .map(|row| HookTemplate {
            hook_type: row["hook_type"].trim().to_string(),
            template: row["template"].to_string(),
            use_in: row["use_in"].trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    fn split_around_inputs(prompt: &str) -> (&str, &str) {
        let head_end = prompt.find("topic: ").unwrap() + "topic: ".len();
        let tail_start = prompt.rfind(".\n\nThe output should be").unwrap();
        (&prompt[..head_end], &prompt[tail_start..])
    }

    #[test]
    fn test_prompt_contains_inputs_verbatim() {
        let prompt = build_hook_prompt("AI tools", "short video");
        assert!(prompt.contains("for the following topic: AI tools and Usage in: short video."));
        assert!(prompt.contains(HOOK_EXAMPLES.trim_end()));
        assert!(prompt.starts_with("as an expert copywriter specialized in hook generation"));
        assert!(prompt.ends_with("The JSON object:\n\n"));
    }

    #[test]
    fn test_fixed_text_is_untouched_by_inputs() {
        let empty = build_hook_prompt("", "");
        let (empty_head, empty_tail) = split_around_inputs(&empty);

        let inputs = [
            ("{usage}", "{topic}"),
            ("{{}}", "\"]\n["),
            ("café ☕", ""),
            ("line\nbreak", "Usage in: twice"),
        ];
        for (topic, usage) in inputs {
            let prompt = build_hook_prompt(topic, usage);
            assert_eq!(prompt.len(), empty.len() + topic.len() + usage.len());
            assert!(prompt.starts_with(&format!("{empty_head}{topic} and Usage in: {usage}")));
            assert!(prompt.ends_with(empty_tail));
        }
    }

    #[test]
    fn test_prompt_json_example_uses_single_braces() {
        let prompt = build_hook_prompt("x", "y");
        assert!(prompt.contains("  {\n    \"hook_type\": \"The chosen hook type\","));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_hook_templates_skip_header() {
        let templates = hook_templates();
        assert_eq!(templates.len(), HOOK_EXAMPLES.lines().count() - 1);
        assert_eq!(
            templates[0],
            HookTemplate {
                hook_type: "Strong sentence".to_string(),
                template: "[Topic] won't prepare you for [specific aspect].".to_string(),
                use_in: "Social posts, email headlines, short content".to_string(),
            }
        );
        assert!(templates.iter().any(|template| template.hook_type == "Question"));
    }
}
