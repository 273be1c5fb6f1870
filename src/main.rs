use std::sync::Arc;

use hook_generator::entities::error::HookError;
use hook_generator::environment;
use hook_generator::hook_generator::HookGenerator;
use hook_generator::logging::init_tracing;
use hook_generator::openai_handler::{create_client, ClientConfig};
use hook_generator::router;

#[tokio::main]
async fn main() -> Result<(), HookError> {
    init_tracing();

    let client = create_client(ClientConfig::from_env()?)?;
    let generator = Arc::new(HookGenerator::new(client));
    let cors = router::cors_layer(environment::get_allow_origin().as_deref())?;
    let app = router::create_router(generator, cors);

    let address = environment::get_server_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(target: "hook_generator", "listening on {}", address);
    axum::serve(listener, app).await?;
    Ok(())
}
