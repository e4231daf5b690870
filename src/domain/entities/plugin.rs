//! Plugin store request entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PLUGIN_LIMIT: u32 = 48;

/// Sort direction for plugin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Paging and ordering options accepted by the plugin index endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginIndexParams {
    /// Page size. Zero or `None` falls back to [`DEFAULT_PLUGIN_LIMIT`].
    pub limit: Option<u32>,
    /// Page offset. `None` falls back to zero.
    pub offset: Option<u32>,
    /// Sort column.
    pub order_by: Option<String>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
}

impl PluginIndexParams {
    /// Resolves defaults into the query sent on the wire.
    #[must_use]
    pub fn to_query(&self) -> PluginIndexQuery {
        PluginIndexQuery {
            limit: self
                .limit
                .filter(|limit| *limit != 0)
                .unwrap_or(DEFAULT_PLUGIN_LIMIT),
            offset: self.offset.unwrap_or(0),
            order_by: self.order_by.clone(),
            direction: self.direction,
            search_query: None,
        }
    }
}

/// Query string for index endpoints, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginIndexQuery {
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
    /// Sort column, omitted only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Sort direction, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    /// Free-text search, only set by plugin search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// A list of plugin IDs or handles, given either as items or pre-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdList {
    /// Separate items, joined with commas on the wire.
    Items(Vec<String>),
    /// An already comma-joined string, sent as is.
    Joined(String),
}

impl IdList {
    /// Returns the comma-joined wire value.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Items(items) => items.join(","),
            Self::Joined(joined) => joined.clone(),
        }
    }
}

impl<T: fmt::Display> From<Vec<T>> for IdList {
    fn from(items: Vec<T>) -> Self {
        Self::Items(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display> From<&[T]> for IdList {
    fn from(items: &[T]) -> Self {
        Self::Items(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for IdList {
    fn from(items: [T; N]) -> Self {
        Self::Items(items.iter().map(ToString::to_string).collect())
    }
}

impl From<&str> for IdList {
    fn from(joined: &str) -> Self {
        Self::Joined(joined.to_string())
    }
}

impl From<String> for IdList {
    fn from(joined: String) -> Self {
        Self::Joined(joined)
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
