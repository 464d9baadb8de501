//! Identity and provenance envelope for catalog elements.

use serde::{Deserialize, Serialize};

use crate::repository::PropertyMap;

use super::enums::ElementOriginCategory;

/// Type descriptor attached to every projected element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementType {
    pub type_id: String,
    pub type_name: String,
    pub type_version: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_type_names: Vec<String>,
}

/// Provenance of a projected element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementProvenance {
    pub origin_category: ElementOriginCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Classification as shown on a projected element.
///
/// Classifications whose contents were lifted into first-class fields by
/// the projector do not appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementClassification {
    pub classification_name: String,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub classification_properties: PropertyMap,
}

/// Glossary term attached to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermReference {
    pub guid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identity and provenance envelope for any catalog element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    /// Repository-assigned identity; immutable once assigned
    pub guid: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub origin: ElementProvenance,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifications: Vec<ElementClassification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meanings: Vec<GlossaryTermReference>,
}

impl ElementHeader {
    /// True if a classification with the given name is attached
    pub fn has_classification(&self, name: &str) -> bool {
        self.classifications
            .iter()
            .any(|c| c.classification_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_serialization() {
        let header = ElementHeader {
            guid: "guid-1".to_string(),
            element_type: ElementType {
                type_id: "114e9f8f".to_string(),
                type_name: "Connection".to_string(),
                type_version: 1,
                super_type_names: vec!["Referenceable".to_string()],
            },
            origin: ElementProvenance::default(),
            classifications: Vec::new(),
            meanings: Vec::new(),
        };

        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["type"]["typeName"], "Connection");
        assert_eq!(value["origin"]["originCategory"], "UNKNOWN");
        assert!(value.get("classifications").is_none());
    }

    #[test]
    fn test_has_classification() {
        let mut header = ElementHeader {
            guid: "guid-1".to_string(),
            element_type: ElementType {
                type_id: "id".to_string(),
                type_name: "DatabaseColumn".to_string(),
                type_version: 1,
                super_type_names: Vec::new(),
            },
            origin: ElementProvenance::default(),
            classifications: Vec::new(),
            meanings: Vec::new(),
        };
        assert!(!header.has_classification("PrimaryKey"));
        header.classifications.push(ElementClassification {
            classification_name: "PrimaryKey".to_string(),
            classification_properties: PropertyMap::new(),
        });
        assert!(header.has_classification("PrimaryKey"));
    }
}
