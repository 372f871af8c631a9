use metrics_exporter_prometheus::PrometheusBuilder;
use mock_service::MockConfig;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Stand-in for the cats service on the port the load tests target.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_service=debug,tower_http=debug".into()),
        )
        .init();

    PrometheusBuilder::new()
        .with_http_listener(SocketAddr::from(([0, 0, 0, 0], 9090)))
        .install()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("Mock service listening on {addr}, metrics on :9090");
    mock_service::run(addr, MockConfig::default()).await
}
