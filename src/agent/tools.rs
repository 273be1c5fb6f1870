use serde_json::{Map, Value};

use super::Tool;
use crate::entities::error::{ErrorType, HookError};
use crate::hook_generator::prompt::hook_templates;

/// Looks up the example hook templates, optionally for one hook type.
pub struct HookTemplatesTool;

impl Tool for HookTemplatesTool {
    fn name(&self) -> &str {
        "get_hook_templates"
    }

    fn description(&self) -> &str {
        "Returns the hook templates for a hook type, e.g. {\"hook_type\": \"Question\"}. \
         Without hook_type, lists every known hook type with its template."
    }

    fn call(&self, params: &Map<String, Value>) -> Result<String, HookError> {
        let templates = hook_templates();
        let wanted = params.get("hook_type").and_then(Value::as_str).map(str::trim);

        let matching = templates
            .iter()
            .filter(|template| match wanted {
                Some(hook_type) => template.hook_type.eq_ignore_ascii_case(hook_type),
                None => true,
            })
            .map(|template| format!("{}: {} (use in: {})", template.hook_type, template.template, template.use_in))
            .collect::<Vec<_>>();

        if matching.is_empty() {
            let known_types = templates
                .iter()
                .map(|template| template.hook_type.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(format!(
                "No template for hook type {}. Known hook types: {}",
                wanted.unwrap_or_default(),
                known_types
            ));
        }
        Ok(matching.join("\n"))
    }
}

pub struct WordCountTool;

impl Tool for WordCountTool {
    fn name(&self) -> &str {
        "count_words"
    }

    fn description(&self) -> &str {
        "Counts the words of a text, e.g. {\"text\": \"Ready to transform your routine?\"}."
    }

    fn call(&self, params: &Map<String, Value>) -> Result<String, HookError> {
        let text = params.get("text").and_then(Value::as_str).ok_or_else(|| {
            HookError::new(
                400,
                ErrorType::ApiError,
                "count_words needs a string `text` parameter".to_string(),
            )
        })?;
        Ok(text.split_whitespace().count().to_string())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("params should be an object"),
        }
    }

    #[test]
    fn test_hook_templates_for_one_type() {
        let output = HookTemplatesTool.call(&params(json!({"hook_type": "question"}))).unwrap();
        assert_eq!(
            output,
            "Question: Are you ready to [achieve something] without [common obstacle]? (use in: Short videos, ads, email subject lines)"
        );
    }

    #[test]
    fn test_hook_templates_without_type_lists_everything() {
        let output = HookTemplatesTool.call(&Map::new()).unwrap();
        assert_eq!(output.lines().count(), hook_templates().len());
    }

    #[test]
    fn test_hook_templates_unknown_type() {
        let output = HookTemplatesTool.call(&params(json!({"hook_type": "Limerick"}))).unwrap();
        assert!(output.starts_with("No template for hook type Limerick. Known hook types: Strong sentence, Question"));
    }

    #[test]
    fn test_count_words() {
        let output = WordCountTool
            .call(&params(json!({"text": "Rain taps softly on old windows"})))
            .unwrap();
        assert_eq!(output, "6");

        let error = WordCountTool.call(&Map::new()).expect_err("text is required");
        assert_eq!(error.status_code, 400);
    }
}
