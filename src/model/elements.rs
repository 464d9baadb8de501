//! Typed catalog elements returned by read operations.

use serde::{Deserialize, Serialize};

use super::header::ElementHeader;
use super::properties::{
    ApiOperationProperties, ApiParameterListProperties, ApiProperties, ConnectionProperties,
    ConnectorTypeProperties, DataFileProperties, DatabaseColumnProperties,
    DatabaseForeignKeyProperties, DatabasePrimaryKeyProperties, DatabaseProperties,
    DatabaseSchemaProperties, DatabaseTableProperties, DatabaseViewProperties,
    EndpointProperties, EventTypeProperties, FileFolderProperties, FileSystemProperties,
    TopicProperties, ValidValueProperties,
};

/// A projected element: identity envelope plus typed properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataElement<P> {
    pub element_header: ElementHeader,
    pub properties: P,
}

pub type ApiElement = MetadataElement<ApiProperties>;
pub type ApiOperationElement = MetadataElement<ApiOperationProperties>;
pub type ApiParameterListElement = MetadataElement<ApiParameterListProperties>;
pub type ConnectionElement = MetadataElement<ConnectionProperties>;
pub type EndpointElement = MetadataElement<EndpointProperties>;
pub type ConnectorTypeElement = MetadataElement<ConnectorTypeProperties>;
pub type TopicElement = MetadataElement<TopicProperties>;
pub type EventTypeElement = MetadataElement<EventTypeProperties>;
pub type FileSystemElement = MetadataElement<FileSystemProperties>;
pub type FileFolderElement = MetadataElement<FileFolderProperties>;
pub type DataFileElement = MetadataElement<DataFileProperties>;
pub type ValidValueElement = MetadataElement<ValidValueProperties>;
pub type DatabaseElement = MetadataElement<DatabaseProperties>;
pub type DatabaseSchemaElement = MetadataElement<DatabaseSchemaProperties>;
pub type DatabaseTableElement = MetadataElement<DatabaseTableProperties>;
pub type DatabaseViewElement = MetadataElement<DatabaseViewProperties>;

/// A foreign-key link from one database column to another, lifted from a
/// schema-attribute relationship by the projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseForeignKey {
    pub linked_column_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_column_qualified_name: Option<String>,
    pub properties: DatabaseForeignKeyProperties,
}

/// A database column with its lifted key facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseColumnElement {
    pub element_header: ElementHeader,
    pub properties: DatabaseColumnProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key_properties: Option<DatabasePrimaryKeyProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<DatabaseForeignKey>,
}
