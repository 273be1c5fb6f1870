use hook_generator::entities::error::HookError;
use hook_generator::hook_generator::QUICK_PROMPT;
use hook_generator::logging::init_tracing;
use hook_generator::openai_handler::{create_client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), HookError> {
    init_tracing();

    let client = create_client(ClientConfig::from_env()?)?;
    let response = client.generate_response(QUICK_PROMPT).await?;
    println!("{}", response);
    Ok(())
}
