//! Domain entity definitions.

mod plugin;
mod thumb;

pub use plugin::{
    DEFAULT_PLUGIN_LIMIT, IdList, PluginIndexParams, PluginIndexQuery, SortDirection,
};
pub use thumb::{ImageId, ListenerId, NodeId, ScrollParent, ThumbImage, Viewport, WorkerStatus};
