//! Generic element representation shared with the metadata repository.
//!
//! These are the framework-level shapes the repository traffics in:
//! untyped property bags, named classifications, and relationship edges.
//! The projector turns them into the service's typed beans.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open-ended property bag keyed by property name
pub type PropertyMap = serde_json::Map<String, Value>;

/// Well-known property names used across element types
pub mod property_name {
    pub const QUALIFIED_NAME: &str = "qualifiedName";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const DESCRIPTION: &str = "description";

    /// Properties searched by find operations
    pub const SEARCHABLE: &[&str] = &[QUALIFIED_NAME, DISPLAY_NAME, DESCRIPTION];
}

/// Where an element's master copy lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginCategory {
    #[default]
    Unknown,
    LocalCohort,
    ExportArchive,
    ContentPack,
    DeregisteredRepository,
    ConfigurationProperty,
    External,
}

/// How an element owner is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerCategory {
    UserId,
    ProfileId,
    #[default]
    Other,
}

/// Sort order recorded for a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataItemSortOrder {
    Ascending,
    Descending,
    Unsorted,
    #[default]
    Unknown,
}

/// How a key value is generated and maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyPattern {
    LocalKey,
    RecycledKey,
    NaturalKey,
    MirrorKey,
    AggregateKey,
    CallersKey,
    StableKey,
    #[default]
    Other,
}

/// Provenance of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementOrigin {
    pub origin_category: OriginCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// A named property bag attached to an element by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub name: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Classification {
    pub fn new(name: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// Reference to a glossary term attached to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub guid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generic catalog element as held by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenElement {
    /// Repository-assigned identity; immutable once assigned
    pub guid: String,
    pub type_name: String,
    pub origin: ElementOrigin,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_properties: Option<HashMap<String, String>>,
    #[serde(default)]
    pub zones: Vec<String>,
}

impl OpenElement {
    /// Read a string property from the property bag
    pub fn string_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// The element's qualified name, when set
    pub fn qualified_name(&self) -> Option<&str> {
        self.string_property(property_name::QUALIFIED_NAME)
    }
}

/// Typed edge between two elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub guid: String,
    pub type_name: String,
    pub end_one_guid: String,
    pub end_two_guid: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Link from one schema attribute to another, as seen from the first end.
///
/// Carries enough of the far end's identity for projection without another
/// repository round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeLink {
    pub type_name: String,
    pub linked_attribute_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_attribute_qualified_name: Option<String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_element() -> OpenElement {
        let mut properties = PropertyMap::new();
        properties.insert("qualifiedName".to_string(), json!("conn-1"));
        properties.insert("displayName".to_string(), json!("Connection One"));
        OpenElement {
            guid: "guid-1".to_string(),
            type_name: "Connection".to_string(),
            origin: ElementOrigin::default(),
            classifications: Vec::new(),
            meanings: Vec::new(),
            properties,
            vendor_properties: None,
            zones: vec!["quarantine".to_string()],
        }
    }

    #[test]
    fn test_string_property_access() {
        let element = sample_element();
        assert_eq!(element.qualified_name(), Some("conn-1"));
        assert_eq!(element.string_property("displayName"), Some("Connection One"));
        assert_eq!(element.string_property("missing"), None);
    }

    #[test]
    fn test_element_serializes_camel_case() {
        let element = sample_element();
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["typeName"], "Connection");
        assert_eq!(value["properties"]["qualifiedName"], "conn-1");
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(OriginCategory::default(), OriginCategory::Unknown);
        assert_eq!(KeyPattern::default(), KeyPattern::Other);
        assert_eq!(DataItemSortOrder::default(), DataItemSortOrder::Unknown);
    }
}
