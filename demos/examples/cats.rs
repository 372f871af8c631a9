use smol_load::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Prints the engine options for the `/cats` load test and runs a single smoke iteration
/// against `http://localhost:8000/cats`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("smol_load=debug,cats=info")
        .init();

    let scenario = smol_load::scripts::cats()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&scenario.config().to_engine_options())?
    );

    match scenario.run_iteration().await {
        Ok(()) => info!("Smoke iteration against {} ok", scenario.workload().target()),
        Err(err) => warn!("Smoke iteration failed: {err}"),
    }

    Ok(())
}
