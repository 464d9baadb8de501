//! Domain properties beans.
//!
//! Each bean is a flat set of typed attributes plus the open-ended
//! `additionalProperties` and `vendorProperties` maps. Beans move to and
//! from the repository's generic property bags through [`PropertyBean`];
//! the vendor-property map never travels inside the bag (it has its own
//! repository calls).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CatalogError, CatalogResult};
use crate::repository::PropertyMap;

use super::enums::{DataItemSortOrder, KeyPattern, OwnerCategory};

const VENDOR_PROPERTIES_KEY: &str = "vendorProperties";

/// Conversion between a typed bean and the repository's property bag
pub trait PropertyBean: Serialize + DeserializeOwned + Clone {
    /// Repository type name for elements carrying this bean
    const TYPE_NAME: &'static str;

    /// External reconciliation key; unique across the repository
    fn qualified_name(&self) -> &str;

    /// Vendor-property extension bag, if supplied
    fn vendor_properties(&self) -> Option<&HashMap<String, String>>;

    /// Attach or clear the vendor-property bag (used on read enrichment)
    fn set_vendor_properties(&mut self, vendor_properties: Option<HashMap<String, String>>);

    /// Serialize into a repository property bag, excluding vendor properties
    fn to_repo_properties(&self) -> CatalogResult<PropertyMap> {
        let value = serde_json::to_value(self)
            .map_err(|e| CatalogError::property_server(format!("bean serialization failed: {e}")))?;
        match value {
            Value::Object(mut map) => {
                map.remove(VENDOR_PROPERTIES_KEY);
                Ok(map)
            }
            _ => Err(CatalogError::property_server(
                "bean did not serialize to an object",
            )),
        }
    }

    /// Rebuild a bean from a repository property bag
    fn from_repo_properties(properties: &PropertyMap) -> CatalogResult<Self> {
        serde_json::from_value(Value::Object(properties.clone())).map_err(|e| {
            CatalogError::property_server(format!(
                "stored {} properties do not match the expected shape: {e}",
                Self::TYPE_NAME
            ))
        })
    }
}

macro_rules! impl_property_bean {
    ($bean:ty, $type_name:literal) => {
        impl PropertyBean for $bean {
            const TYPE_NAME: &'static str = $type_name;

            fn qualified_name(&self) -> &str {
                &self.qualified_name
            }

            fn vendor_properties(&self) -> Option<&HashMap<String, String>> {
                self.vendor_properties.as_ref()
            }

            fn set_vendor_properties(
                &mut self,
                vendor_properties: Option<HashMap<String, String>>,
            ) {
                self.vendor_properties = vendor_properties;
            }
        }
    };
}

/// Properties for a deployed API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ApiProperties, "DeployedAPI");

/// Properties for one callable operation of an API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperationProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ApiOperationProperties, "APIOperation");

/// Properties for a parameter list of an API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiParameterListProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ApiParameterListProperties, "APIParameterList");

/// Properties for a connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_properties: Option<PropertyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secured_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ConnectionProperties, "Connection");

/// Properties for a network endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(EndpointProperties, "Endpoint");

/// Properties for a connector type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorTypeProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_provider_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognized_configuration_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ConnectorTypeProperties, "ConnectorType");

/// Properties for an event topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TopicProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(TopicProperties, "Topic");

/// Properties for an event type carried by a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(EventTypeProperties, "EventType");

/// Properties for a file system capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_system_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(FileSystemProperties, "FileSystem");

/// Properties for a folder in a file system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileFolderProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(FileFolderProperties, "FileFolder");

/// Properties for a data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataFileProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DataFileProperties, "DataFile");

/// Properties for a valid value definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidValueProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_value: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(ValidValueProperties, "ValidValueDefinition");

/// Properties for a database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_imported_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DatabaseProperties, "Database");

/// Properties for a database schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchemaProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_category: Option<OwnerCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DatabaseSchemaProperties, "DeployedDatabaseSchema");

/// Properties for a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTableProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DatabaseTableProperties, "DatabaseTable");

/// Properties for a database view.
///
/// The `expression` field is populated by the projector from the
/// calculated-value classification, not stored as a flat property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseViewProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DatabaseViewProperties, "DatabaseView");

/// Properties for a database column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseColumnProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<DataItemSortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
}
impl_property_bean!(DatabaseColumnProperties, "DatabaseColumn");

/// Primary-key facts lifted from the primary-key classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabasePrimaryKeyProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub key_pattern: KeyPattern,
}

/// Foreign-key facts lifted from a foreign-key relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseForeignKeyProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub confidence: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Edge properties for embedding one connection in another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedConnectionProperties {
    #[serde(default)]
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<PropertyMap>,
}

/// Edge properties for a connection-to-asset attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_summary: Option<String>,
}

/// Override properties for template-based creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Polymorphic properties payload carried by generic request bodies.
///
/// Each typed operation matches exactly one variant; any other variant is
/// an invalid-properties-object failure. This replaces runtime type
/// inspection with a sealed, exhaustively matched union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum ResourceProperties {
    #[serde(rename = "API")]
    Api(ApiProperties),
    #[serde(rename = "APIOperation")]
    ApiOperation(ApiOperationProperties),
    #[serde(rename = "APIParameterList")]
    ApiParameterList(ApiParameterListProperties),
    Connection(ConnectionProperties),
    Endpoint(EndpointProperties),
    ConnectorType(ConnectorTypeProperties),
    Topic(TopicProperties),
    EventType(EventTypeProperties),
    FileSystem(FileSystemProperties),
    FileFolder(FileFolderProperties),
    DataFile(DataFileProperties),
    ValidValue(ValidValueProperties),
}

impl ResourceProperties {
    /// Variant name used in invalid-properties-object messages
    pub fn variant_name(&self) -> &'static str {
        match self {
            ResourceProperties::Api(_) => "API",
            ResourceProperties::ApiOperation(_) => "APIOperation",
            ResourceProperties::ApiParameterList(_) => "APIParameterList",
            ResourceProperties::Connection(_) => "Connection",
            ResourceProperties::Endpoint(_) => "Endpoint",
            ResourceProperties::ConnectorType(_) => "ConnectorType",
            ResourceProperties::Topic(_) => "Topic",
            ResourceProperties::EventType(_) => "EventType",
            ResourceProperties::FileSystem(_) => "FileSystem",
            ResourceProperties::FileFolder(_) => "FileFolder",
            ResourceProperties::DataFile(_) => "DataFile",
            ResourceProperties::ValidValue(_) => "ValidValue",
        }
    }
}
