//! Plugin store API client.

pub mod cancel;
mod client;
mod dto;

pub use cancel::{CancelSource, CancelToken};
pub use client::PluginStoreClient;
