use std::sync::OnceLock;

use handlebars::Handlebars;
use serde::Serialize;

use crate::entities::error::HookError;
use crate::entities::hook::HookRequest;
use crate::hook_generator::{GenerationReport, HookOutcome};

const INDEX_TEMPLATE: &str = include_str!("pages/templates/index.hbs");
const INDEX: &str = "index";

pub const SUCCESS_HEADLINE: &str = "Hooks generated successfully!";
pub const NOT_JSON_HEADLINE: &str = "Error: The response is not valid JSON.";

#[derive(Serialize)]
struct PageData<'a> {
    title: &'static str,
    description: String,
    topic: &'a str,
    usage: &'a str,
    result: Option<ResultView>,
}

#[derive(Serialize)]
struct ResultView {
    success: bool,
    headline: String,
    hooks_json: Option<String>,
    raw_response: String,
}

impl ResultView {
    fn from_report(report: &GenerationReport) -> Result<ResultView, HookError> {
        let view = match &report.outcome {
            HookOutcome::Success { hooks } => ResultView {
                success: true,
                headline: SUCCESS_HEADLINE.to_string(),
                hooks_json: Some(serde_json::to_string_pretty(hooks)?),
                raw_response: report.raw_response.clone(),
            },
            HookOutcome::NotJson { .. } => ResultView {
                success: false,
                headline: NOT_JSON_HEADLINE.to_string(),
                hooks_json: None,
                raw_response: report.raw_response.clone(),
            },
            HookOutcome::ShapeMismatch { message } => ResultView {
                success: false,
                headline: format!("Error: The response is valid JSON but not a list of hooks ({message})."),
                hooks_json: None,
                raw_response: report.raw_response.clone(),
            },
        };
        Ok(view)
    }
}

fn templates() -> &'static Handlebars<'static> {
    static TEMPLATES: OnceLock<Handlebars<'static>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(INDEX, INDEX_TEMPLATE)
            .expect("index template should be valid handlebars");
        handlebars
    })
}

fn render(data: &PageData) -> Result<String, HookError> {
    // Default escaping is HTML escaping; model output goes through it too.
    Ok(templates().render(INDEX, data)?)
}

fn description(model: &str) -> String {
    format!(
        "Use this tool to generate marketing hooks based on a given topic and usage context. \
         Powered by {model}, this app will create hooks in different formats (questions, facts, etc.)."
    )
}

/// The idle form, pre-filled with `request`.
pub fn render_form(request: &HookRequest, model: &str) -> Result<String, HookError> {
    render(&PageData {
        title: "AI Hook Generator",
        description: description(model),
        topic: &request.topic,
        usage: &request.usage,
        result: None,
    })
}

/// The form again, followed by the hooks or by the error and the raw text.
pub fn render_report(report: &GenerationReport) -> Result<String, HookError> {
    render(&PageData {
        title: "AI Hook Generator",
        description: description(&report.model),
        topic: &report.topic,
        usage: &report.usage,
        result: Some(ResultView::from_report(report)?),
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::entities::hook::Hook;
    use chrono::Utc;
    use uuid::Uuid;

    fn report_with(raw_response: &str, outcome: HookOutcome) -> GenerationReport {
        GenerationReport {
            id: Uuid::new_v4(),
            topic: "AI tools".to_string(),
            usage: "short video".to_string(),
            model: "gpt-4o".to_string(),
            generated_at: Utc::now(),
            elapsed_ms: 12,
            raw_response: raw_response.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_index_template_is_registered_once() {
        assert!(std::ptr::eq(templates(), templates()));
        assert!(templates().has_template(INDEX));
    }

    #[test]
    fn test_render_form_with_defaults() {
        let html = render_form(&HookRequest::default(), "gpt-4o").unwrap();
        assert!(html.contains("<input id=\"topic\" name=\"topic\" type=\"text\" value=\"AI tools\">"));
        assert!(html.contains("<input id=\"usage\" name=\"usage\" type=\"text\" value=\"short video\">"));
        assert!(html.contains("Powered by gpt-4o"));
        assert!(html.contains("Generating hooks..."));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_render_success() {
        let report = report_with(
            "[...]",
            HookOutcome::Success { hooks: vec![Hook::new("Question", "Ready to transform your routine?")] },
        );
        let html = render_report(&report).unwrap();
        assert!(html.contains(SUCCESS_HEADLINE));
        assert!(html.contains("Ready to transform your routine?"));
        assert!(!html.contains("Raw response from the model:"));
    }

    #[test]
    fn test_render_failure_escapes_raw_response() {
        let report = report_with(
            "<script>alert(1)</script>",
            HookOutcome::NotJson { message: "expected value".to_string() },
        );
        let html = render_report(&report).unwrap();
        assert!(html.contains(NOT_JSON_HEADLINE));
        assert!(html.contains("Raw response from the model:"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_render_shape_mismatch() {
        let report = report_with(
            "{}",
            HookOutcome::ShapeMismatch { message: "expected an array of hooks, got an object".to_string() },
        );
        let html = render_report(&report).unwrap();
        assert!(html.contains("Error: The response is valid JSON but not a list of hooks"));
        assert!(html.contains("<code>{}</code>"));
    }
}
