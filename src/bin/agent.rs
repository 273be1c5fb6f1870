use hook_generator::agent::tools::{HookTemplatesTool, WordCountTool};
use hook_generator::agent::Agent;
use hook_generator::entities::error::HookError;
use hook_generator::logging::init_tracing;
use hook_generator::openai_handler::{create_client, ClientConfig};

const DEFAULT_QUERY: &str =
    "Write a Question hook about AI tools for a short video, in at most 12 words.";

#[tokio::main]
async fn main() -> Result<(), HookError> {
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let query = if args.is_empty() { DEFAULT_QUERY.to_string() } else { args.join(" ") };

    let client = create_client(ClientConfig::from_env()?)?;
    let mut agent = Agent::new(client);
    agent.add_tool(Box::new(HookTemplatesTool));
    agent.add_tool(Box::new(WordCountTool));

    let run = agent.run(&query).await?;
    for turn in &run.turns {
        println!("Loop: {}", turn.number);
        println!("----------------------");
        println!("{}", turn.response);
        if let (Some(action), Some(action_response)) = (&turn.action, &turn.action_response) {
            println!(" -- running {} {}", action.function_name, serde_json::Value::Object(action.function_params.clone()));
            println!("Action_Response: {}", action_response);
        }
    }

    if !run.finished {
        println!("Stopped after {} turns without a final answer.", run.turns.len());
    }
    println!("{}", run.answer);
    Ok(())
}
