//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Plugin store API client.
pub mod plugin_store;
/// Lazy thumbnail loading.
pub mod thumbs;

pub use config::{ApiConfig, AppConfig, CliArgs, LogLevel, StorageManager};
pub use plugin_store::PluginStoreClient;
pub use thumbs::{LoaderState, ThumbLoader, ThumbLoaderConfig};
