use std::net::SocketAddr;

use watchlist_backend::{api, config::Config, database::Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize database
    let database = Database::new(&config).await?;

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!("Serving static files from {}", config.static_dir.display());

    let app = api::router(api::AppState::new(database, config));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
