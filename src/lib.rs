pub mod api;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod favorites;
pub mod market;

// Re-export common modules
pub use api::router;
pub use config::{Config, DashboardConfig};
pub use db::MongoDb;
pub use error::AppError;
