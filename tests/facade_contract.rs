//! Facade contract tests.
//!
//! Exercises the dispatch services end to end against the in-memory
//! repository: ownership-edge creation, merge versus overlay updates,
//! the vendor-properties sub-rule, guarded deletes, regex search,
//! zone publishing and call-log completeness.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use catalogd::dispatch::{
    ApiService, ConnectionService, ReferenceableRequestBody, TopicService,
};
use catalogd::errors::CatalogError;
use catalogd::model::{
    ApiOperationProperties, ApiParameterListProperties, ApiProperties, ConnectionProperties,
    ParameterListType, ResourceProperties, TopicProperties,
};
use catalogd::observability::calls::{CallEvent, CallOutcome};
use catalogd::observability::MemoryCallLog;
use catalogd::repository::{
    CallerContext, InMemoryRepository, MetadataRepository, OriginCategory, PagingRequest,
    PropertyMap,
};

const SERVER: &str = "cocoMDS1";
const USER: &str = "peterprofile";

fn ctx() -> CallerContext {
    CallerContext::new(SERVER, USER)
}

fn capability(repository: &InMemoryRepository, qualified_name: &str) -> String {
    let mut properties = PropertyMap::new();
    properties.insert("qualifiedName".to_string(), json!(qualified_name));
    repository
        .create_element(&ctx(), "SoftwareCapability", properties, None)
        .unwrap()
}

fn connection_body(qualified_name: &str) -> ReferenceableRequestBody {
    ReferenceableRequestBody {
        external_source_guid: None,
        external_source_name: None,
        properties: ResourceProperties::Connection(ConnectionProperties {
            qualified_name: qualified_name.to_string(),
            ..ConnectionProperties::default()
        }),
    }
}

fn topic_body(qualified_name: &str) -> ReferenceableRequestBody {
    ReferenceableRequestBody {
        external_source_guid: None,
        external_source_name: None,
        properties: ResourceProperties::Topic(TopicProperties {
            qualified_name: qualified_name.to_string(),
            ..TopicProperties::default()
        }),
    }
}

#[test]
fn test_ownership_edge_requires_owner_is_home() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = ConnectionService::new(repository.clone(), Arc::new(MemoryCallLog::new()));
    let owner = capability(&repository, "etl-engine");

    let mut owned = connection_body("owned.conn");
    owned.external_source_guid = Some(owner.clone());
    owned.external_source_name = Some("etl".to_string());
    let owned_guid = service
        .create_connection(SERVER, USER, true, Some(owned))
        .unwrap();

    // Same external source, but no ownership flag: origin recorded, no edge.
    let mut referenced = connection_body("referenced.conn");
    referenced.external_source_guid = Some(owner.clone());
    referenced.external_source_name = Some("etl".to_string());
    let referenced_guid = service
        .create_connection(SERVER, USER, false, Some(referenced))
        .unwrap();

    let for_owner = service
        .get_connections_for_owner(SERVER, USER, &owner, 0, 10)
        .unwrap();
    assert_eq!(for_owner.len(), 1);
    assert_eq!(for_owner[0].element_header.guid, owned_guid);

    let element = repository
        .get_element_by_guid(&ctx(), &referenced_guid, None)
        .unwrap();
    assert_eq!(element.origin.origin_category, OriginCategory::External);
    assert_eq!(element.origin.home_metadata_collection_id.as_deref(), Some(owner.as_str()));
}

#[test]
fn test_merge_update_overlays_supplied_keys_only() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = TopicService::new(repository, Arc::new(MemoryCallLog::new()));

    let mut create = topic_body("orders.topic");
    if let ResourceProperties::Topic(ref mut properties) = create.properties {
        properties.display_name = Some("Orders".to_string());
        properties.description = Some("Order events".to_string());
    }
    let guid = service.create_topic(SERVER, USER, false, Some(create)).unwrap();

    let mut update = topic_body("orders.topic");
    if let ResourceProperties::Topic(ref mut properties) = update.properties {
        properties.display_name = Some("Orders v2".to_string());
    }
    service
        .update_topic(SERVER, USER, &guid, true, Some(update))
        .unwrap();

    let element = service.get_topic_by_guid(SERVER, USER, &guid).unwrap();
    assert_eq!(element.properties.display_name.as_deref(), Some("Orders v2"));
    assert_eq!(element.properties.description.as_deref(), Some("Order events"));
}

#[test]
fn test_overlay_update_replaces_everything() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = TopicService::new(repository, Arc::new(MemoryCallLog::new()));

    let mut create = topic_body("orders.topic");
    if let ResourceProperties::Topic(ref mut properties) = create.properties {
        properties.description = Some("Order events".to_string());
    }
    let guid = service.create_topic(SERVER, USER, false, Some(create)).unwrap();

    service
        .update_topic(SERVER, USER, &guid, false, Some(topic_body("orders.topic")))
        .unwrap();

    let element = service.get_topic_by_guid(SERVER, USER, &guid).unwrap();
    assert_eq!(element.properties.description, None);
}

#[test]
fn test_vendor_properties_follow_the_update_sub_rule() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = ConnectionService::new(repository, Arc::new(MemoryCallLog::new()));

    let mut create = connection_body("vendor.conn");
    if let ResourceProperties::Connection(ref mut properties) = create.properties {
        let mut vendor = HashMap::new();
        vendor.insert("encoding".to_string(), "avro".to_string());
        properties.vendor_properties = Some(vendor);
    }
    let guid = service
        .create_connection(SERVER, USER, false, Some(create))
        .unwrap();

    // Merge update with no vendor map: bag untouched.
    service
        .update_connection(SERVER, USER, &guid, true, Some(connection_body("vendor.conn")))
        .unwrap();
    let element = service.get_connection_by_guid(SERVER, USER, &guid).unwrap();
    assert!(element.properties.vendor_properties.is_some());

    // Overlay update with no vendor map: bag cleared.
    service
        .update_connection(SERVER, USER, &guid, false, Some(connection_body("vendor.conn")))
        .unwrap();
    let element = service.get_connection_by_guid(SERVER, USER, &guid).unwrap();
    assert_eq!(element.properties.vendor_properties, None);
}

#[test]
fn test_remove_rejects_stale_qualified_name() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = TopicService::new(repository, Arc::new(MemoryCallLog::new()));
    let guid = service
        .create_topic(SERVER, USER, false, Some(topic_body("orders.topic")))
        .unwrap();

    let err = service
        .remove_topic(SERVER, USER, &guid, "renamed.topic", None)
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidParameter { .. }));
    assert!(service.get_topic_by_guid(SERVER, USER, &guid).is_ok());

    service
        .remove_topic(SERVER, USER, &guid, "orders.topic", None)
        .unwrap();
    assert!(service.get_topic_by_guid(SERVER, USER, &guid).is_err());
}

#[test]
fn test_search_string_is_a_regex() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = TopicService::new(repository, Arc::new(MemoryCallLog::new()));
    service
        .create_topic(SERVER, USER, false, Some(topic_body("orders.topic")))
        .unwrap();
    service
        .create_topic(SERVER, USER, false, Some(topic_body("payments.topic")))
        .unwrap();

    let all = service.find_topics(SERVER, USER, ".*\\.topic", 0, 10).unwrap();
    assert_eq!(all.len(), 2);

    let orders = service.find_topics(SERVER, USER, "^orders\\.", 0, 10).unwrap();
    assert_eq!(orders.len(), 1);

    let err = service.find_topics(SERVER, USER, "([", 0, 10).unwrap_err();
    match err {
        CatalogError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "searchString"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_publish_and_withdraw_move_between_zones() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = TopicService::new(repository.clone(), Arc::new(MemoryCallLog::new()));
    let guid = service
        .create_topic(SERVER, USER, false, Some(topic_body("orders.topic")))
        .unwrap();

    let element = repository.get_element_by_guid(&ctx(), &guid, None).unwrap();
    assert_eq!(element.zones, vec!["quarantine".to_string()]);

    service.publish_topic(SERVER, USER, &guid).unwrap();
    let element = repository.get_element_by_guid(&ctx(), &guid, None).unwrap();
    assert_eq!(element.zones, vec!["published".to_string()]);

    service.withdraw_topic(SERVER, USER, &guid).unwrap();
    let element = repository.get_element_by_guid(&ctx(), &guid, None).unwrap();
    assert_eq!(element.zones, vec!["quarantine".to_string()]);
}

#[test]
fn test_parameter_list_discriminator_defaults_to_header() {
    let repository = Arc::new(InMemoryRepository::new());
    let service = ApiService::new(repository.clone(), Arc::new(MemoryCallLog::new()));

    let api_guid = service
        .create_api(
            SERVER,
            USER,
            false,
            Some(ReferenceableRequestBody {
                external_source_guid: None,
                external_source_name: None,
                properties: ResourceProperties::Api(ApiProperties {
                    qualified_name: "orders-api".to_string(),
                    ..ApiProperties::default()
                }),
            }),
        )
        .unwrap();
    let operation_guid = service
        .create_api_operation(
            SERVER,
            USER,
            &api_guid,
            false,
            Some(ReferenceableRequestBody {
                external_source_guid: None,
                external_source_name: None,
                properties: ResourceProperties::ApiOperation(ApiOperationProperties {
                    qualified_name: "orders-api.getOrder".to_string(),
                    ..ApiOperationProperties::default()
                }),
            }),
        )
        .unwrap();

    let parameter_list_guid = service
        .create_api_parameter_list(
            SERVER,
            USER,
            &operation_guid,
            ParameterListType::default(),
            false,
            Some(ReferenceableRequestBody {
                external_source_guid: None,
                external_source_name: None,
                properties: ResourceProperties::ApiParameterList(ApiParameterListProperties {
                    qualified_name: "orders-api.getOrder.header".to_string(),
                    ..ApiParameterListProperties::default()
                }),
            }),
        )
        .unwrap();

    // The unset discriminator attached over the header relationship.
    let paging = PagingRequest::new(0, 10);
    let headers = repository
        .get_attached_elements(&ctx(), &operation_guid, "APIHeader", "APIParameterList", &paging)
        .unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].guid, parameter_list_guid);

    assert!(repository
        .get_attached_elements(&ctx(), &operation_guid, "APIRequest", "APIParameterList", &paging)
        .unwrap()
        .is_empty());
}

#[test]
fn test_call_log_records_failures_with_both_ends() {
    let repository = Arc::new(InMemoryRepository::new());
    let call_log = Arc::new(MemoryCallLog::new());
    let service = ConnectionService::new(repository, call_log.clone());

    let err = service.create_connection(SERVER, USER, false, None).unwrap_err();
    assert!(matches!(err, CatalogError::MissingRequestBody { .. }));

    let records = call_log.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].event, CallEvent::CallStarted);
    assert_eq!(records[1].event, CallEvent::CallCompleted);
    assert_eq!(records[0].call_id, records[1].call_id);
    assert_eq!(records[0].method, "createConnection");
    assert_eq!(records[1].outcome, Some(CallOutcome::Failed));
    assert!(records[1].detail.as_deref().unwrap().contains("createConnection"));
}

#[test]
fn test_every_operation_appends_two_records() {
    let repository = Arc::new(InMemoryRepository::new());
    let call_log = Arc::new(MemoryCallLog::new());
    let service = TopicService::new(repository, call_log.clone());

    let guid = service
        .create_topic(SERVER, USER, false, Some(topic_body("orders.topic")))
        .unwrap();
    service.get_topic_by_guid(SERVER, USER, &guid).unwrap();
    service.find_topics(SERVER, USER, ".*", 0, 10).unwrap();

    assert_eq!(call_log.len(), 6);
}
