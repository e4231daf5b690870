//! Presentation layer with the command-line surface.

/// Plugin store commands.
pub mod commands;

pub use commands::{IndexArgs, PluginCommand};
