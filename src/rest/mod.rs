//! # REST Facade
//!
//! Axum routers exposing the dispatch services. URLs are scoped by the
//! calling server and user (`/servers/:server_name/users/:user_id/...`);
//! every response is HTTP 200 with an envelope carrying the payload or a
//! captured error.

pub mod api_routes;
pub mod config;
pub mod connection_routes;
pub mod files_routes;
pub mod response;
pub mod server;
pub mod topic_routes;
pub mod valid_values_routes;

use serde::Deserialize;

use crate::model::ParameterListType;

pub use config::RestServerConfig;
pub use response::{ElementListResponse, ElementResponse, ErrorInfo, GuidResponse, VoidResponse};
pub use server::{CatalogServer, CatalogState};

fn default_page_size() -> usize {
    100
}

/// Paging window shared by all list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingQuery {
    #[serde(default)]
    pub start_from: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Query for regex search endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_string: String,
    #[serde(flatten)]
    pub paging: PagingQuery,
}

/// Query for exact-name lookup endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    pub name: String,
    #[serde(flatten)]
    pub paging: PagingQuery,
}

/// Query flags for element creation
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuery {
    /// When true and an external source is supplied, record an explicit
    /// ownership edge from the capability to the new element
    #[serde(default)]
    pub owner_is_home: bool,
}

/// Query flag selecting merge or overlay update semantics
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuery {
    pub is_merge_update: bool,
}

/// Query carrying the caller's view of the element's qualified name,
/// checked before a hard delete
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveQuery {
    pub qualified_name: String,
}

/// Query flags for parameter-list creation
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParameterListQuery {
    #[serde(default)]
    pub parameter_list_type: ParameterListType,
    #[serde(default)]
    pub owner_is_home: bool,
}

/// Query flags for data-file creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFileQuery {
    #[serde(default)]
    pub folder_guid: Option<String>,
    #[serde(default)]
    pub owner_is_home: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_query_defaults() {
        let query: PagingQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.start_from, 0);
        assert_eq!(query.page_size, 100);
    }

    #[test]
    fn test_parameter_list_query_defaults_to_header() {
        let query: ParameterListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.parameter_list_type, ParameterListType::Header);
        assert!(!query.owner_is_home);
    }
}
