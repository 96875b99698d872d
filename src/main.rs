use boardgame_recs::{
    config::Config,
    routes::{create_router, AppState},
    store::{load_catalog, load_ratings},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // Stores are loaded once and shared read-only by every request
    let catalog = load_catalog(&config.games_csv_path)?;
    let ratings = load_ratings(&config.ratings_csv_path, config.max_rating_users)?;

    let app = create_router(AppState::new(catalog, ratings));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
