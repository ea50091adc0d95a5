use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crypto_favorites::{
    config::DashboardConfig,
    dashboard::{
        client::FavoritesClient,
        notification::NotificationKind,
        render::{render_dashboard, render_favorites_table, render_market_table, render_notification},
        view_model::DashboardViewModel,
    },
    market::service::MarketService,
};

/// Terminal dashboard for crypto prices and favorites.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the top coins by market cap
    Market {
        /// Only show coins whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show saved favorites
    Favorites,
    /// Add a coin from the market table to favorites
    Add {
        /// Coin name as shown in the market table
        name: String,
    },
    /// Remove a favorite by id
    Remove {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::from_env()?;

    let mut view = DashboardViewModel::new(
        Arc::new(FavoritesClient::new(&config.favorites_api_url)),
        Arc::new(MarketService::new(&config.market_api_url)),
        config.notification_ttl,
    );
    view.load().await;

    match cli.command {
        None => print!("{}", render_dashboard(&view)),
        Some(Command::Market { search }) => {
            if let Some(term) = search {
                view.set_search_term(term);
            }
            print!("{}", render_market_table(&view.filtered_coins()));
        }
        Some(Command::Favorites) => print!("{}", render_favorites_table(view.favorites())),
        Some(Command::Add { name }) => {
            let coin = match view.find_coin(&name).cloned() {
                Some(coin) => coin,
                None => anyhow::bail!("{} is not in the market table", name),
            };
            let notification = view.add_favorite(&coin).await;
            println!("{}\n", render_notification(&notification));
            print!("{}", render_favorites_table(view.favorites()));
            if notification.kind == NotificationKind::Error {
                anyhow::bail!("{}", notification.message);
            }
        }
        Some(Command::Remove { id }) => {
            let notification = view.remove_favorite(&id).await;
            println!("{}\n", render_notification(&notification));
            print!("{}", render_favorites_table(view.favorites()));
            if notification.kind == NotificationKind::Error {
                anyhow::bail!("{}", notification.message);
            }
        }
    }

    Ok(())
}
