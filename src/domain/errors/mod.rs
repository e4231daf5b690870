//! Domain error types.

mod plugin_store_error;

pub use plugin_store_error::PluginStoreError;
