//! Plugin store API HTTP client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::cancel::CancelSource;
use super::dto::ErrorResponse;
use crate::domain::entities::{IdList, PluginIndexParams};
use crate::domain::errors::PluginStoreError;
use crate::domain::ports::{PluginStoreFuture, PluginStorePort, PluginStoreResult};
use crate::infrastructure::config::ApiConfig;

const USER_AGENT: &str = concat!("thumbstore/", env!("CARGO_PKG_VERSION"));

/// Plugin store client.
///
/// Every request is bound to the cancellation generation current when it is
/// issued; [`cancel_requests`](PluginStorePort::cancel_requests) fails the
/// requests issued under it and leaves later ones alone.
#[derive(Debug)]
pub struct PluginStoreClient {
    client: Client,
    base_url: String,
    cancel: CancelSource,
}

impl PluginStoreClient {
    /// Creates client from API configuration.
    ///
    /// Configured headers are sent unchanged on every request.
    ///
    /// # Errors
    /// Returns error if a header is malformed or HTTP client creation fails.
    pub fn from_config(config: &ApiConfig) -> Result<Self, PluginStoreError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                PluginStoreError::invalid_config(format!("invalid header name {name:?}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                PluginStoreError::invalid_config(format!("invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(|e| {
            PluginStoreError::invalid_config(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: config.endpoint.clone(),
            cancel: CancelSource::new(),
        })
    }

    fn request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(url = %url, "Plugin store request");
        self.client.get(url)
    }

    /// Binds the request to the current cancellation generation.
    fn issue(&self, request: RequestBuilder) -> PluginStoreFuture {
        let token = self.cancel.token();

        Box::pin(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("Plugin store request cancelled");
                    Err(PluginStoreError::Cancelled)
                }
                result = Self::execute(request) => result,
            }
        })
    }

    async fn execute(request: RequestBuilder) -> PluginStoreResult<Value> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach plugin store");
            PluginStoreError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse plugin store response");
            PluginStoreError::decode(e.to_string())
        })
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> PluginStoreError {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string()
            });

        debug!(status = status.as_u16(), message = %message, "Plugin store returned an error");
        PluginStoreError::status(status.as_u16(), message)
    }

    fn index(&self, path: &str, params: &PluginIndexParams) -> PluginStoreFuture {
        self.issue(self.request(path).query(&params.to_query()))
    }
}

impl PluginStorePort for PluginStoreClient {
    fn get_core_data(&self) -> PluginStoreFuture {
        self.issue(self.request("plugin-store/core-data"))
    }

    fn get_developer(&self, developer_id: u64) -> PluginStoreFuture {
        self.issue(self.request(&format!("developer/{developer_id}")))
    }

    fn get_featured_section_by_handle(&self, handle: &str) -> PluginStoreFuture {
        self.issue(self.request(&format!("plugin-store/featured-section/{handle}")))
    }

    fn get_featured_sections(&self) -> PluginStoreFuture {
        self.issue(self.request("plugin-store/featured-sections"))
    }

    fn get_plugin_changelog(&self, plugin_id: u64) -> PluginStoreFuture {
        self.issue(self.request(&format!("plugin/{plugin_id}/changelog")))
    }

    fn get_plugin_details(&self, plugin_id: u64) -> PluginStoreFuture {
        self.issue(self.request(&format!("plugin/{plugin_id}")))
    }

    fn get_plugin_details_by_handle(&self, handle: &str) -> PluginStoreFuture {
        self.issue(self.request(&format!("plugin-store/plugin/{handle}")))
    }

    fn get_plugins_by_category(
        &self,
        category_id: u64,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture {
        self.index(
            &format!("plugin-store/plugins-by-category/{category_id}"),
            params,
        )
    }

    fn get_plugins_by_developer_id(
        &self,
        developer_id: u64,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture {
        self.index(
            &format!("plugin-store/plugins-by-developer/{developer_id}"),
            params,
        )
    }

    fn get_plugins_by_featured_section_handle(
        &self,
        handle: &str,
        params: &PluginIndexParams,
    ) -> PluginStoreFuture {
        self.index(
            &format!("plugin-store/plugins-by-featured-section/{handle}"),
            params,
        )
    }

    fn get_plugins_by_handles(&self, handles: IdList) -> PluginStoreFuture {
        let request = self
            .request("plugin-store/plugins-by-handles")
            .query(&[("pluginHandles", handles.joined())]);
        self.issue(request)
    }

    fn get_plugins_by_ids(&self, ids: IdList) -> PluginStoreFuture {
        let request = self.request("plugins").query(&[("ids", ids.joined())]);
        self.issue(request)
    }

    fn search_plugins(&self, query: &str, params: &PluginIndexParams) -> PluginStoreFuture {
        let mut index_query = params.to_query();
        index_query.search_query = Some(query.to_string());

        let request = self
            .request("plugin-store/search-plugins")
            .query(&index_query);
        self.issue(request)
    }

    fn cancel_requests(&self) {
        self.cancel.cancel_and_rearm();
        debug!("Cancelled in-flight plugin store requests");
    }
}
