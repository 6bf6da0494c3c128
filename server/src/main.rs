use catalog_server::{telemetry, AppState, FromEnv, ServerConfig};
use color_eyre::eyre::WrapErr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = ServerConfig::from_env()?;
    telemetry::init_tracing(&config.environment);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        external = %config.external_posts_url,
        seeded = config.seed_demo_items,
        "listening"
    );
    catalog_server::run(listener, AppState::from_config(&config))
        .await
        .wrap_err("server error")
}
