use std::error::Error;

use ai_llm_service::telemetry::init_tracing;
use tracing::{Level, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the process environment may carry everything.
    let dotenv = dotenvy::dotenv();

    init_tracing("info", Level::DEBUG);

    match dotenv {
        Ok(path) => info!(path = %path.display(), ".env loaded"),
        Err(e) if e.not_found() => info!("no .env file; using process environment"),
        Err(e) => warn!(error = %e, ".env could not be read"),
    }

    api::start().await?;

    Ok(())
}
