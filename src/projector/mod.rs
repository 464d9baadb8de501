//! # Bean Projector
//!
//! Converts the repository's generic elements into the service's typed
//! beans. Classification-encoded facts (primary keys, view expressions)
//! are lifted into first-class fields through a central registry of
//! (classification name, lifter) pairs; lifted classifications are removed
//! from the projected header so the fact is not reported twice.
//! Foreign-key facts are lifted from schema-attribute relationship links
//! rather than classifications.

pub mod convert;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{
    DatabaseColumnElement, DatabaseColumnProperties, DatabaseForeignKey,
    DatabaseForeignKeyProperties, DatabasePrimaryKeyProperties, DatabaseSchemaElement,
    DatabaseSchemaProperties, DatabaseViewElement, DatabaseViewProperties, ElementClassification,
    ElementHeader, ElementProvenance, ElementType, GlossaryTermReference, MetadataElement,
    PropertyBean,
};
use crate::repository::types as generic;
use crate::repository::{AttributeLink, OpenElement, PropertyMap};

/// Classification carrying primary-key facts for a schema attribute
pub const PRIMARY_KEY_CLASSIFICATION: &str = "PrimaryKey";
/// Classification carrying the expression of a derived (view) attribute
pub const CALCULATED_VALUE_CLASSIFICATION: &str = "CalculatedValue";
/// Relationship type carrying foreign-key links between columns
pub const FOREIGN_KEY_LINK_TYPE: &str = "ForeignKey";

/// A fact lifted out of a classification property bag
#[derive(Debug, Clone, PartialEq)]
pub enum LiftedFacet {
    PrimaryKey(DatabasePrimaryKeyProperties),
    ViewExpression(Option<String>),
}

/// One entry of the lifting registry
pub struct ClassificationLifter {
    pub classification_name: &'static str,
    pub lift: fn(&PropertyMap) -> LiftedFacet,
}

/// The set of classifications the projector knows how to lift
pub const CLASSIFICATION_LIFTERS: &[ClassificationLifter] = &[
    ClassificationLifter {
        classification_name: PRIMARY_KEY_CLASSIFICATION,
        lift: lift_primary_key,
    },
    ClassificationLifter {
        classification_name: CALCULATED_VALUE_CLASSIFICATION,
        lift: lift_calculated_value,
    },
];

fn lift_primary_key(properties: &PropertyMap) -> LiftedFacet {
    let name = properties
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let key_pattern = generic_enum::<generic::KeyPattern>(properties, "keyPattern");
    LiftedFacet::PrimaryKey(DatabasePrimaryKeyProperties {
        name,
        key_pattern: convert::key_pattern_to_service(key_pattern),
    })
}

fn lift_calculated_value(properties: &PropertyMap) -> LiftedFacet {
    LiftedFacet::ViewExpression(
        properties
            .get("formula")
            .and_then(Value::as_str)
            .map(str::to_string),
    )
}

/// Parse a generic-vocabulary enum out of a property bag; unrecognized
/// values behave as absent so translation applies its fallback.
fn generic_enum<T: DeserializeOwned>(properties: &PropertyMap, key: &str) -> Option<T> {
    properties
        .get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Known type descriptors; the projector refuses unknown type names.
const KNOWN_TYPES: &[(&str, &str, &[&str])] = &[
    ("DeployedAPI", "7dbb3e63", &["Asset", "Referenceable"]),
    ("APIOperation", "f1c0af19", &["SchemaElement", "Referenceable"]),
    ("APIParameterList", "ba167b12", &["SchemaElement", "Referenceable"]),
    ("Connection", "114e9f8f", &["Referenceable"]),
    ("Endpoint", "dbc20663", &["Referenceable"]),
    ("ConnectorType", "954421eb", &["Referenceable"]),
    ("Topic", "29100f49", &["Asset", "Referenceable"]),
    ("EventType", "8bc88aba", &["SchemaElement", "Referenceable"]),
    ("FileSystem", "14145458", &["SoftwareCapability", "Referenceable"]),
    ("FileFolder", "229ed5cc", &["Asset", "Referenceable"]),
    ("DataFile", "10752b4a", &["Asset", "Referenceable"]),
    ("ValidValueDefinition", "09b2133a", &["Referenceable"]),
    ("Database", "0921c83f", &["Asset", "Referenceable"]),
    ("DeployedDatabaseSchema", "eab811e2", &["Asset", "Referenceable"]),
    ("DatabaseTable", "ce7e72b8", &["SchemaAttribute", "Referenceable"]),
    ("DatabaseView", "archd121", &["SchemaAttribute", "Referenceable"]),
    ("DatabaseColumn", "aad93673", &["SchemaAttribute", "Referenceable"]),
    ("SoftwareCapability", "54055c38", &["Referenceable"]),
];

/// Look up the descriptor for a repository type name
pub fn type_descriptor(type_name: &str) -> CatalogResult<ElementType> {
    KNOWN_TYPES
        .iter()
        .find(|(name, _, _)| *name == type_name)
        .map(|(name, id, supertypes)| ElementType {
            type_id: (*id).to_string(),
            type_name: (*name).to_string(),
            type_version: 1,
            super_type_names: supertypes.iter().map(|s| (*s).to_string()).collect(),
        })
        .ok_or_else(|| {
            CatalogError::property_server(format!(
                "repository returned element of unknown type {type_name}"
            ))
        })
}

/// Stateless projector from generic elements to typed beans
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanProjector;

impl BeanProjector {
    pub fn new() -> Self {
        Self
    }

    /// Project the identity envelope, keeping every classification.
    pub fn project_header(&self, element: &OpenElement) -> CatalogResult<ElementHeader> {
        let (header, _facets) = self.project_header_lifting(element, &[])?;
        Ok(header)
    }

    /// Project the identity envelope, lifting the named classifications
    /// out of the header and returning their facets separately.
    fn project_header_lifting(
        &self,
        element: &OpenElement,
        lifters: &[ClassificationLifter],
    ) -> CatalogResult<(ElementHeader, Vec<LiftedFacet>)> {
        let element_type = type_descriptor(&element.type_name)?;

        let mut classifications = Vec::new();
        let mut facets = Vec::new();
        for classification in &element.classifications {
            match lifters
                .iter()
                .find(|l| l.classification_name == classification.name)
            {
                Some(lifter) => facets.push((lifter.lift)(&classification.properties)),
                None => classifications.push(ElementClassification {
                    classification_name: classification.name.clone(),
                    classification_properties: classification.properties.clone(),
                }),
            }
        }

        let header = ElementHeader {
            guid: element.guid.clone(),
            element_type,
            origin: ElementProvenance {
                origin_category: convert::origin_category_to_service(Some(
                    element.origin.origin_category,
                )),
                home_metadata_collection_id: element.origin.home_metadata_collection_id.clone(),
                home_metadata_collection_name: element.origin.home_metadata_collection_name.clone(),
                license: element.origin.license.clone(),
            },
            classifications,
            meanings: element
                .meanings
                .iter()
                .map(|m| GlossaryTermReference {
                    guid: m.guid.clone(),
                    name: m.name.clone(),
                    description: m.description.clone(),
                })
                .collect(),
        };
        Ok((header, facets))
    }

    /// Project a generic element into a typed element
    pub fn project<P: PropertyBean>(
        &self,
        element: &OpenElement,
    ) -> CatalogResult<MetadataElement<P>> {
        let header = self.project_header(element)?;
        let properties = P::from_repo_properties(&element.properties)?;
        Ok(MetadataElement {
            element_header: header,
            properties,
        })
    }

    /// Project a database schema, bridging the owner category through the
    /// generic vocabulary.
    pub fn project_database_schema(
        &self,
        element: &OpenElement,
    ) -> CatalogResult<DatabaseSchemaElement> {
        let header = self.project_header(element)?;
        let mut properties = DatabaseSchemaProperties::from_repo_properties(&element.properties)?;
        if element.properties.contains_key("ownerCategory") {
            let stored = generic_enum::<generic::OwnerCategory>(&element.properties, "ownerCategory");
            properties.owner_category = Some(convert::owner_category_to_service(stored));
        }
        Ok(MetadataElement {
            element_header: header,
            properties,
        })
    }

    /// Project a database view, lifting the calculated-value expression
    /// into the properties bean.
    pub fn project_database_view(
        &self,
        element: &OpenElement,
    ) -> CatalogResult<DatabaseViewElement> {
        let (header, facets) = self.project_header_lifting(element, CLASSIFICATION_LIFTERS)?;
        let mut properties = DatabaseViewProperties::from_repo_properties(&element.properties)?;
        for facet in facets {
            if let LiftedFacet::ViewExpression(expression) = facet {
                properties.expression = expression;
            }
        }
        Ok(MetadataElement {
            element_header: header,
            properties,
        })
    }

    /// Project a database column, lifting primary-key facts from its
    /// classifications and foreign keys from its relationship links.
    pub fn project_database_column(
        &self,
        element: &OpenElement,
        links: &[AttributeLink],
    ) -> CatalogResult<DatabaseColumnElement> {
        let (header, facets) = self.project_header_lifting(element, CLASSIFICATION_LIFTERS)?;
        let mut properties = DatabaseColumnProperties::from_repo_properties(&element.properties)?;
        if element.properties.contains_key("sortOrder") {
            let stored =
                generic_enum::<generic::DataItemSortOrder>(&element.properties, "sortOrder");
            properties.sort_order = Some(convert::sort_order_to_service(stored));
        }

        let mut primary_key_properties = None;
        for facet in facets {
            if let LiftedFacet::PrimaryKey(primary_key) = facet {
                primary_key_properties = Some(primary_key);
            }
        }

        let foreign_keys = links
            .iter()
            .filter(|link| link.type_name == FOREIGN_KEY_LINK_TYPE)
            .map(|link| DatabaseForeignKey {
                linked_column_guid: link.linked_attribute_guid.clone(),
                linked_column_qualified_name: link.linked_attribute_qualified_name.clone(),
                properties: foreign_key_properties(&link.properties),
            })
            .collect();

        Ok(DatabaseColumnElement {
            element_header: header,
            properties,
            primary_key_properties,
            foreign_keys,
        })
    }
}

/// Build foreign-key properties from a relationship property bag
fn foreign_key_properties(properties: &PropertyMap) -> DatabaseForeignKeyProperties {
    DatabaseForeignKeyProperties {
        name: properties
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string),
        description: properties
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        confidence: properties
            .get("confidence")
            .and_then(Value::as_i64)
            .unwrap_or(0) as i32,
        steward: properties
            .get("steward")
            .and_then(Value::as_str)
            .map(str::to_string),
        source: properties
            .get("source")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
