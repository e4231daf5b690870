mod plugin_store_port;
mod thumb_document_port;

pub use plugin_store_port::{PluginStoreFuture, PluginStorePort, PluginStoreResult};
pub use thumb_document_port::{SIZES_ATTRIBUTE, SRCSET_ATTRIBUTE, THUMB_CLASS, ThumbDocument};
