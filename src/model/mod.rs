//! # Service Data Model
//!
//! Typed beans exposed on the REST surface: element headers, domain
//! properties, projected elements and the service-side enumerations.

pub mod elements;
pub mod enums;
pub mod header;
pub mod properties;

pub use elements::{
    ApiElement, ApiOperationElement, ApiParameterListElement, ConnectionElement,
    ConnectorTypeElement, DataFileElement, DatabaseColumnElement, DatabaseElement,
    DatabaseForeignKey, DatabaseSchemaElement, DatabaseTableElement, DatabaseViewElement,
    EndpointElement, EventTypeElement, FileFolderElement, FileSystemElement, MetadataElement,
    TopicElement, ValidValueElement,
};
pub use enums::{
    DataItemSortOrder, ElementOriginCategory, KeyPattern, OwnerCategory, ParameterListType,
};
pub use header::{
    ElementClassification, ElementHeader, ElementProvenance, ElementType, GlossaryTermReference,
};
pub use properties::{
    ApiOperationProperties, ApiParameterListProperties, ApiProperties, AssetConnectionProperties,
    ConnectionProperties, ConnectorTypeProperties, DataFileProperties, DatabaseColumnProperties,
    DatabaseForeignKeyProperties, DatabasePrimaryKeyProperties, DatabaseProperties,
    DatabaseSchemaProperties, DatabaseTableProperties, DatabaseViewProperties,
    EmbeddedConnectionProperties, EndpointProperties, EventTypeProperties, FileFolderProperties,
    FileSystemProperties, PropertyBean, ResourceProperties, TemplateProperties, TopicProperties,
    ValidValueProperties,
};
