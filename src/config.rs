use std::env;
use chrono::Duration;

use crate::error::AppError;

pub const DEFAULT_MARKET_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_FAVORITES_API_URL: &str = "http://localhost:5000";

/// Favorites service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub app_env: AppEnv,
    pub mongodb_uri: String,
    pub mongodb_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        // Server config
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse::<u16>()
            .map_err(|_| AppError::ConfigError("Invalid PORT".into()))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let app_env_str = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let app_env = match app_env_str.to_lowercase().as_str() {
            "production" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        };

        // MongoDB config
        let mongodb_uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let mongodb_name = env::var("MONGODB_NAME").unwrap_or_else(|_| "cryptoTracker".into());

        if mongodb_name.trim().is_empty() {
            return Err(AppError::ConfigError("MONGODB_NAME must not be empty".into()));
        }

        Ok(Self {
            port,
            host,
            app_env,
            mongodb_uri,
            mongodb_name,
        })
    }
}

/// Dashboard client configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub favorites_api_url: String,
    pub market_api_url: String,
    pub notification_ttl: std::time::Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let favorites_api_url = env::var("FAVORITES_API_URL")
            .unwrap_or_else(|_| DEFAULT_FAVORITES_API_URL.into());
        let market_api_url = env::var("MARKET_API_URL")
            .unwrap_or_else(|_| DEFAULT_MARKET_API_URL.into());

        let notification_ttl_str = env::var("NOTIFICATION_TTL").unwrap_or_else(|_| "3s".into());
        let notification_ttl = parse_duration(&notification_ttl_str)
            .ok()
            .and_then(|d| d.to_std().ok())
            .ok_or_else(|| AppError::ConfigError("Invalid NOTIFICATION_TTL format".into()))?;

        Ok(Self {
            favorites_api_url: favorites_api_url.trim_end_matches('/').to_string(),
            market_api_url: market_api_url.trim_end_matches('/').to_string(),
            notification_ttl,
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            favorites_api_url: DEFAULT_FAVORITES_API_URL.into(),
            market_api_url: DEFAULT_MARKET_API_URL.into(),
            notification_ttl: std::time::Duration::from_secs(3),
        }
    }
}

fn parse_duration(duration_str: &str) -> Result<Duration, &'static str> {
    let duration_str = duration_str.trim();

    if duration_str.is_empty() {
        return Err("Duration string is empty");
    }

    // Extract the number and unit parts
    let len = duration_str.len();
    let (num_part, unit_part) = duration_str.split_at(
        duration_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(len)
    );

    let num = num_part.parse::<i64>().map_err(|_| "Invalid number")?;

    match unit_part {
        "s" => Ok(Duration::seconds(num)),
        "m" => Ok(Duration::minutes(num)),
        "h" => Ok(Duration::hours(num)),
        "d" => Ok(Duration::days(num)),
        _ => Err("Unknown time unit, use s, m, h, or d"),
    }
}
