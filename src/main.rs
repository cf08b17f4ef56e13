use std::sync::Arc;
use storefront::config::Config;
use storefront::logger::Logger;
use storefront::router::create_app_router;
use storefront::session::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Storefront exited with an error");
        eprintln!("storefront: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    Logger::init(&config.logging.level);

    // Seed the catalog and create empty session stores
    let state = Arc::new(AppState::from_config(&config)?);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Storefront listening");

    axum::serve(listener, app).await?;
    Ok(())
}
