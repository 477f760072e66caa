pub mod config;
pub mod fetcher;
pub mod models;
pub mod notifiers;
pub mod queue;
pub mod trackers;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
