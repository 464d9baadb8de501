//! # Request Dispatch
//!
//! One service per resource family, each a thin layer that validates the
//! request body, resolves the external-source home, makes exactly one
//! repository call (plus at most a vendor-properties or ownership-edge
//! call), projects the result and records the call in the call log.
//! Services are constructor-injected with their repository and call log;
//! there is no process-wide state.

pub mod apis;
pub mod connections;
pub mod core;
pub mod files;
pub mod topics;
pub mod valid_values;

use serde::{Deserialize, Serialize};

use crate::model::{ResourceProperties, TemplateProperties};
use crate::repository::ExternalSourceId;

pub use apis::ApiService;
pub use connections::ConnectionService;
pub use core::ResourceDispatcher;
pub use files::FilesService;
pub use topics::TopicService;
pub use valid_values::ValidValuesService;

/// Relationship type names used by the dispatchers
pub mod relationship_type {
    /// Ownership edge from an external capability to an element it manages
    pub const SERVER_ASSET_USE: &str = "ServerAssetUse";
    pub const CONNECTION_CONNECTOR_TYPE: &str = "ConnectionConnectorType";
    pub const CONNECTION_ENDPOINT: &str = "ConnectionEndpoint";
    pub const EMBEDDED_CONNECTION: &str = "EmbeddedConnection";
    pub const CONNECTION_TO_ASSET: &str = "ConnectionToAsset";
    pub const API_OPERATIONS: &str = "APIOperations";
    pub const ATTACHED_EVENT_TYPE: &str = "AttachedEventType";
    pub const FOLDER_HIERARCHY: &str = "FolderHierarchy";
    pub const NESTED_FILE: &str = "NestedFile";
}

/// Generic request body for create and update operations.
///
/// The external source ids identify the third-party capability acting as
/// the element's home; whether an explicit ownership edge is also created
/// is controlled separately by the operation's `owner_is_home` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceableRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_name: Option<String>,
    pub properties: ResourceProperties,
}

/// Request body for template-based creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_name: Option<String>,
    pub properties: TemplateProperties,
}

/// Request body carrying only the external source identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSourceRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_name: Option<String>,
}

/// Request body for relationship setup, optionally carrying edge properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRequestBody<P> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
}

/// Resolve the external source identity from a pair of optional ids
pub(crate) fn external_source(
    guid: &Option<String>,
    name: &Option<String>,
) -> Option<ExternalSourceId> {
    guid.as_ref().map(|guid| ExternalSourceId {
        guid: guid.clone(),
        name: name.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_source_requires_guid() {
        assert!(external_source(&None, &Some("etl".to_string())).is_none());
        let source = external_source(&Some("cap-1".to_string()), &None).unwrap();
        assert_eq!(source.guid, "cap-1");
        assert_eq!(source.name, "");
    }

    #[test]
    fn test_referenceable_body_parses_tagged_properties() {
        let body: ReferenceableRequestBody = serde_json::from_value(serde_json::json!({
            "externalSourceGuid": "cap-1",
            "externalSourceName": "etl-engine",
            "properties": {
                "class": "Topic",
                "qualifiedName": "orders.topic"
            }
        }))
        .unwrap();
        assert_eq!(body.external_source_guid.as_deref(), Some("cap-1"));
        assert_eq!(body.properties.variant_name(), "Topic");
    }
}
