pub mod cleaner;
pub mod generation;
pub mod prompt;

pub use cleaner::{clean_and_validate_json, parse_hooks, strip_code_fence, HookParseError};
pub use generation::{GenerationReport, HookGenerator, HookOutcome};
pub use prompt::{build_hook_prompt, hook_templates, HookTemplate, HOOK_EXAMPLES, QUICK_PROMPT};
