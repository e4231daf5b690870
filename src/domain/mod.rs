//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use errors::PluginStoreError;
pub use ports::{PluginStorePort, ThumbDocument};
