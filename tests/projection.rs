//! Bean projection tests.
//!
//! Covers classification lifting (primary key, calculated value),
//! foreign-key link lifting and the translation between the repository's
//! generic enumerations and the service-side vocabulary.

use serde_json::json;

use catalogd::model::{self, PropertyBean, TopicProperties};
use catalogd::projector::{convert, BeanProjector};
use catalogd::repository::{
    self, AttributeLink, Classification, ElementOrigin, OpenElement, PropertyMap,
};

fn properties(pairs: &[(&str, serde_json::Value)]) -> PropertyMap {
    let mut map = PropertyMap::new();
    for (key, value) in pairs {
        map.insert((*key).to_string(), value.clone());
    }
    map
}

fn element(type_name: &str, props: PropertyMap, classifications: Vec<Classification>) -> OpenElement {
    OpenElement {
        guid: "elem-1".to_string(),
        type_name: type_name.to_string(),
        origin: ElementOrigin::default(),
        classifications,
        meanings: Vec::new(),
        properties: props,
        vendor_properties: None,
        zones: vec!["quarantine".to_string()],
    }
}

#[test]
fn test_primary_key_classification_becomes_a_facet() {
    let projector = BeanProjector::new();
    let column = element(
        "DatabaseColumn",
        properties(&[("qualifiedName", json!("db.orders.id"))]),
        vec![Classification {
            name: "PrimaryKey".to_string(),
            properties: properties(&[("name", json!("orders_pk")), ("keyPattern", json!("NATURAL_KEY"))]),
        }],
    );

    let projected = projector.project_database_column(&column, &[]).unwrap();
    let primary_key = projected.primary_key_properties.expect("primary key lifted");
    assert_eq!(primary_key.name.as_deref(), Some("orders_pk"));
    assert_eq!(primary_key.key_pattern, model::KeyPattern::NaturalKey);

    // The lifted classification no longer appears on the header.
    assert!(!projected.element_header.has_classification("PrimaryKey"));
}

#[test]
fn test_unrelated_classifications_stay_on_the_header() {
    let projector = BeanProjector::new();
    let column = element(
        "DatabaseColumn",
        properties(&[("qualifiedName", json!("db.orders.id"))]),
        vec![
            Classification {
                name: "PrimaryKey".to_string(),
                properties: PropertyMap::new(),
            },
            Classification {
                name: "Confidentiality".to_string(),
                properties: properties(&[("level", json!(3))]),
            },
        ],
    );

    let projected = projector.project_database_column(&column, &[]).unwrap();
    assert!(projected.primary_key_properties.is_some());
    assert!(projected.element_header.has_classification("Confidentiality"));
    assert_eq!(projected.element_header.classifications.len(), 1);
}

#[test]
fn test_unknown_key_pattern_falls_back() {
    let projector = BeanProjector::new();
    let column = element(
        "DatabaseColumn",
        properties(&[("qualifiedName", json!("db.orders.id"))]),
        vec![Classification {
            name: "PrimaryKey".to_string(),
            properties: properties(&[("keyPattern", json!("SOMETHING_NEW"))]),
        }],
    );

    let projected = projector.project_database_column(&column, &[]).unwrap();
    let primary_key = projected.primary_key_properties.unwrap();
    assert_eq!(primary_key.key_pattern, model::KeyPattern::Other);
}

#[test]
fn test_calculated_value_expression_lifted_into_view() {
    let projector = BeanProjector::new();
    let view = element(
        "DatabaseView",
        properties(&[("qualifiedName", json!("db.orders.summary"))]),
        vec![Classification {
            name: "CalculatedValue".to_string(),
            properties: properties(&[("formula", json!("sum(total) group by day"))]),
        }],
    );

    let projected = projector.project_database_view(&view).unwrap();
    assert_eq!(
        projected.properties.expression.as_deref(),
        Some("sum(total) group by day")
    );
    assert!(!projected.element_header.has_classification("CalculatedValue"));
}

#[test]
fn test_foreign_key_links_are_lifted() {
    let projector = BeanProjector::new();
    let column = element(
        "DatabaseColumn",
        properties(&[("qualifiedName", json!("db.orders.customer_id"))]),
        Vec::new(),
    );
    let links = vec![
        AttributeLink {
            type_name: "ForeignKey".to_string(),
            linked_attribute_guid: "col-99".to_string(),
            linked_attribute_qualified_name: Some("db.customers.id".to_string()),
            properties: properties(&[("name", json!("orders_customers_fk")), ("confidence", json!(95))]),
        },
        // Other link types are ignored.
        AttributeLink {
            type_name: "SemanticAssignment".to_string(),
            linked_attribute_guid: "term-1".to_string(),
            linked_attribute_qualified_name: None,
            properties: PropertyMap::new(),
        },
    ];

    let projected = projector.project_database_column(&column, &links).unwrap();
    assert_eq!(projected.foreign_keys.len(), 1);
    let foreign_key = &projected.foreign_keys[0];
    assert_eq!(
        foreign_key.linked_column_qualified_name.as_deref(),
        Some("db.customers.id")
    );
    assert_eq!(foreign_key.properties.name.as_deref(), Some("orders_customers_fk"));
    assert_eq!(foreign_key.properties.confidence, 95);
}

#[test]
fn test_schema_owner_category_is_bridged() {
    let projector = BeanProjector::new();
    let schema = element(
        "DeployedDatabaseSchema",
        properties(&[
            ("qualifiedName", json!("db.sales")),
            ("ownerCategory", json!("USER_ID")),
        ]),
        Vec::new(),
    );

    let projected = projector.project_database_schema(&schema).unwrap();
    assert_eq!(
        projected.properties.owner_category,
        Some(model::OwnerCategory::UserId)
    );
}

#[test]
fn test_sort_order_is_bridged() {
    let projector = BeanProjector::new();
    let column = element(
        "DatabaseColumn",
        properties(&[
            ("qualifiedName", json!("db.orders.placed_at")),
            ("sortOrder", json!("DESCENDING")),
        ]),
        Vec::new(),
    );

    let projected = projector.project_database_column(&column, &[]).unwrap();
    assert_eq!(
        projected.properties.sort_order,
        Some(model::DataItemSortOrder::Descending)
    );
}

#[test]
fn test_enum_translation_round_trips() {
    for value in [
        repository::KeyPattern::NaturalKey,
        repository::KeyPattern::StableKey,
        repository::KeyPattern::MirrorKey,
        repository::KeyPattern::Other,
    ] {
        let service = convert::key_pattern_to_service(Some(value));
        assert_eq!(convert::key_pattern_to_generic(Some(service)), value);
    }

    for value in [
        repository::OwnerCategory::UserId,
        repository::OwnerCategory::ProfileId,
        repository::OwnerCategory::Other,
    ] {
        let service = convert::owner_category_to_service(Some(value));
        assert_eq!(convert::owner_category_to_generic(Some(service)), value);
    }

    for value in [
        repository::DataItemSortOrder::Ascending,
        repository::DataItemSortOrder::Descending,
        repository::DataItemSortOrder::Unsorted,
    ] {
        let service = convert::sort_order_to_service(Some(value));
        assert_eq!(convert::sort_order_to_generic(Some(service)), value);
    }
}

#[test]
fn test_header_carries_type_descriptor_and_provenance() {
    let projector = BeanProjector::new();
    let topic = element(
        "Topic",
        properties(&[("qualifiedName", json!("orders.topic"))]),
        Vec::new(),
    );

    let projected = projector.project::<TopicProperties>(&topic).unwrap();
    assert_eq!(projected.element_header.element_type.type_name, "Topic");
    assert!(projected
        .element_header
        .element_type
        .super_type_names
        .iter()
        .any(|name| name == "Asset"));
    assert_eq!(projected.properties.qualified_name, "orders.topic");
}

#[test]
fn test_unknown_repository_type_is_a_server_fault() {
    let projector = BeanProjector::new();
    let unknown = element(
        "Banana",
        properties(&[("qualifiedName", json!("x"))]),
        Vec::new(),
    );
    let err = projector.project::<TopicProperties>(&unknown).unwrap_err();
    assert!(err.correlation_id().is_some());
}

#[test]
fn test_vendor_properties_never_leak_into_repo_property_map() {
    let mut bean = TopicProperties {
        qualified_name: "orders.topic".to_string(),
        ..TopicProperties::default()
    };
    let mut vendor = std::collections::HashMap::new();
    vendor.insert("partitions".to_string(), "12".to_string());
    bean.vendor_properties = Some(vendor);

    let map = bean.to_repo_properties().unwrap();
    assert!(map.get("vendorProperties").is_none());
    assert_eq!(map.get("qualifiedName"), Some(&json!("orders.topic")));
}
