//! Command-line plugin store queries.

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::domain::entities::{IdList, PluginIndexParams, SortDirection};
use crate::domain::ports::{PluginStorePort, PluginStoreResult};

/// Paging and ordering flags shared by listing commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct IndexArgs {
    /// Page size (defaults to 48).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Page offset.
    #[arg(long)]
    pub offset: Option<u32>,

    /// Sort column.
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort direction.
    #[arg(long, value_enum)]
    pub direction: Option<SortDirection>,
}

impl From<&IndexArgs> for PluginIndexParams {
    fn from(args: &IndexArgs) -> Self {
        Self {
            limit: args.limit,
            offset: args.offset,
            order_by: args.order_by.clone(),
            direction: args.direction,
        }
    }
}

/// Plugin store query.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
#[allow(missing_docs)]
pub enum PluginCommand {
    /// Plugin store core data.
    CoreData,
    /// Developer profile.
    Developer { id: u64 },
    /// Every featured section.
    FeaturedSections,
    /// One featured section.
    FeaturedSection { handle: String },
    /// Plugin details by ID.
    Plugin { id: u64 },
    /// Plugin details by handle.
    PluginByHandle { handle: String },
    /// Plugin changelog.
    Changelog { id: u64 },
    /// Plugins in a category.
    Category {
        id: u64,
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Plugins by developer.
    DeveloperPlugins {
        id: u64,
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Plugins in a featured section.
    FeaturedPlugins {
        handle: String,
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Plugins by comma-separated handles.
    PluginsByHandles { handles: String },
    /// Plugins by comma-separated IDs.
    PluginsByIds { ids: String },
    /// Full-text plugin search.
    Search {
        query: String,
        #[command(flatten)]
        index: IndexArgs,
    },
}

impl PluginCommand {
    /// Runs the query against the plugin store.
    ///
    /// # Errors
    /// Returns the plugin store error unchanged.
    pub async fn run(&self, store: &dyn PluginStorePort) -> PluginStoreResult<Value> {
        match self {
            Self::CoreData => store.get_core_data().await,
            Self::Developer { id } => store.get_developer(*id).await,
            Self::FeaturedSections => store.get_featured_sections().await,
            Self::FeaturedSection { handle } => store.get_featured_section_by_handle(handle).await,
            Self::Plugin { id } => store.get_plugin_details(*id).await,
            Self::PluginByHandle { handle } => store.get_plugin_details_by_handle(handle).await,
            Self::Changelog { id } => store.get_plugin_changelog(*id).await,
            Self::Category { id, index } => {
                store.get_plugins_by_category(*id, &index.into()).await
            }
            Self::DeveloperPlugins { id, index } => {
                store.get_plugins_by_developer_id(*id, &index.into()).await
            }
            Self::FeaturedPlugins { handle, index } => {
                store
                    .get_plugins_by_featured_section_handle(handle, &index.into())
                    .await
            }
            Self::PluginsByHandles { handles } => {
                store
                    .get_plugins_by_handles(IdList::from(handles.as_str()))
                    .await
            }
            Self::PluginsByIds { ids } => store.get_plugins_by_ids(IdList::from(ids.as_str())).await,
            Self::Search { query, index } => store.search_plugins(query, &index.into()).await,
        }
    }
}
