use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crypto_favorites::{
    api::router::create_router,
    config::Config,
    db,
    favorites::{
        repository::{FavoriteRepository, InMemoryFavoriteRepository, MongoFavoriteRepository},
        service::FavoriteService,
    },
};

/// Favorites REST service for the crypto dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Keep favorites in process memory instead of MongoDB
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!("Starting favorites service ({:?})", config.app_env);

    let repository: Arc<dyn FavoriteRepository> = if args.in_memory {
        warn!("Using in-memory favorites store; data is lost on exit");
        Arc::new(InMemoryFavoriteRepository::new())
    } else {
        // Connect to MongoDB; the service cannot run without it
        let mongo = match db::mongodb::connect(&config.mongodb_uri, &config.mongodb_name).await {
            Ok(mongo) => mongo,
            Err(e) => {
                error!("{}", e);
                return Err(e.into());
            }
        };
        info!("Connected to MongoDB");

        let repository = MongoFavoriteRepository::new(mongo);
        if let Err(e) = repository.ensure_indexes().await {
            warn!("Could not create unique index on favorite names: {}", e);
        }
        Arc::new(repository)
    };

    // Build our application with routes
    let app = create_router(FavoriteService::new(repository));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
