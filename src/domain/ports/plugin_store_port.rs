//! Plugin store port definition.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::domain::entities::{IdList, PluginIndexParams};
use crate::domain::errors::PluginStoreError;

/// Result type for plugin store calls.
pub type PluginStoreResult<T> = Result<T, PluginStoreError>;

/// An issued plugin store request.
///
/// The request is bound to the cancellation generation current when the
/// method was called, not when the future is first polled.
pub type PluginStoreFuture = Pin<Box<dyn Future<Output = PluginStoreResult<Value>> + Send>>;

/// Port for the plugin marketplace REST API.
///
/// Responses are passed through as JSON; the backend owns the schema.
#[cfg_attr(test, mockall::automock)]
pub trait PluginStorePort: Send + Sync {
    /// Fetches plugin store core data (categories, CMS editions, ...).
    fn get_core_data(&self) -> PluginStoreFuture;

    /// Fetches a developer profile.
    fn get_developer(&self, developer_id: u64) -> PluginStoreFuture;

    /// Fetches one featured section.
    fn get_featured_section_by_handle(&self, handle: &str) -> PluginStoreFuture;

    /// Fetches every featured section.
    fn get_featured_sections(&self) -> PluginStoreFuture;

    /// Fetches a plugin changelog.
    fn get_plugin_changelog(&self, plugin_id: u64) -> PluginStoreFuture;

    /// Fetches plugin details by ID.
    fn get_plugin_details(&self, plugin_id: u64) -> PluginStoreFuture;

    /// Fetches plugin details by handle.
    fn get_plugin_details_by_handle(&self, handle: &str) -> PluginStoreFuture;

    /// Lists plugins in a category.
    fn get_plugins_by_category(
        &self,
        category_id: u64,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture;

    /// Lists plugins by developer.
    fn get_plugins_by_developer_id(
        &self,
        developer_id: u64,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture;

    /// Lists plugins in a featured section.
    fn get_plugins_by_featured_section_handle(
        &self,
        handle: &str,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture;

    /// Fetches several plugins by handle.
    fn get_plugins_by_handles(&self, handles: IdList) -> PluginStoreFuture;

    /// Fetches several plugins by ID.
    fn get_plugins_by_ids(&self, ids: IdList) -> PluginStoreFuture;

    /// Searches plugins.
    fn search_plugins(
        &self,
        query: &str,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture;

    /// Aborts every in-flight request and rearms the client for new ones.
    fn cancel_requests(&self);
}
