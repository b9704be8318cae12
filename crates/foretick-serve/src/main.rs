use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use foretick_serve::{app, AppState, ServeConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServeConfig::from_env();
    let state = AppState::from_config(&config).await;

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!(addr = %config.bind_addr, "foretick serving");

    axum::serve(listener, app(state)).await
}
