//! Dispatch for the event-broker family: topics and the event types
//! attached to them.

use std::sync::Arc;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{EventTypeElement, ResourceProperties, TopicElement};
use crate::observability::CallLog;
use crate::repository::{CallerContext, MetadataRepository, PagingRequest};

use super::core::ResourceDispatcher;
use super::{
    external_source, relationship_type, ExternalSourceRequestBody, ReferenceableRequestBody,
    TemplateRequestBody,
};

/// REST dispatch for topics and event types
pub struct TopicService {
    core: ResourceDispatcher,
}

impl TopicService {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            core: ResourceDispatcher::new(repository, call_log),
        }
    }

    // ==================
    // Topics
    // ==================

    pub fn create_topic(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createTopic", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createTopic",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::Topic(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createTopic",
                    expected: "Topic",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn create_topic_from_template(
        &self,
        server_name: &str,
        user_id: &str,
        template_guid: &str,
        owner_is_home: bool,
        body: Option<TemplateRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createTopicFromTemplate", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createTopicFromTemplate",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            self.core.create_from_template(
                &ctx,
                "Topic",
                template_guid,
                owner_is_home,
                source,
                &body.properties,
            )
        })
    }

    pub fn update_topic(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateTopic", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateTopic",
            })?;
            match body.properties {
                ResourceProperties::Topic(properties) => {
                    self.core
                        .update(&ctx, topic_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateTopic",
                    expected: "Topic",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn publish_topic(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core
            .tracked("publishTopic", &ctx, || self.core.publish(&ctx, topic_guid))
    }

    pub fn withdraw_topic(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("withdrawTopic", &ctx, || {
            self.core.withdraw(&ctx, topic_guid)
        })
    }

    pub fn remove_topic(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeTopic", &ctx, || {
            self.core
                .remove::<crate::model::TopicProperties>(&ctx, topic_guid, qualified_name)
        })
    }

    pub fn find_topics(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<TopicElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findTopics", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_topics_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<TopicElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getTopicsByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, true)
        })
    }

    pub fn get_topic_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
    ) -> CatalogResult<TopicElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getTopicByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, topic_guid, true)
        })
    }

    /// Topics owned by an event-broker capability
    pub fn get_topics_for_owner(
        &self,
        server_name: &str,
        user_id: &str,
        owner_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<TopicElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getTopicsForOwner", &ctx, || {
            self.core.get_for_owner(&ctx, owner_guid, &paging, true)
        })
    }

    // ==================
    // Event types
    // ==================

    /// Create an event type attached to a topic
    pub fn create_event_type(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createEventType", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createEventType",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            let properties = match body.properties {
                ResourceProperties::EventType(properties) => properties,
                other => {
                    return Err(CatalogError::InvalidPropertiesObject {
                        method: "createEventType",
                        expected: "EventType",
                        received: other.variant_name().to_string(),
                    })
                }
            };

            self.core
                .repository()
                .get_element_by_guid(&ctx, topic_guid, Some("Topic"))?;
            let guid = self.core.create(&ctx, owner_is_home, source, &properties)?;
            self.core.repository().link_elements(
                &ctx,
                relationship_type::ATTACHED_EVENT_TYPE,
                topic_guid,
                &guid,
                None,
            )?;
            Ok(guid)
        })
    }

    pub fn update_event_type(
        &self,
        server_name: &str,
        user_id: &str,
        event_type_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateEventType", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateEventType",
            })?;
            match body.properties {
                ResourceProperties::EventType(properties) => {
                    self.core
                        .update(&ctx, event_type_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateEventType",
                    expected: "EventType",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_event_type(
        &self,
        server_name: &str,
        user_id: &str,
        event_type_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeEventType", &ctx, || {
            self.core
                .remove::<crate::model::EventTypeProperties>(&ctx, event_type_guid, qualified_name)
        })
    }

    pub fn find_event_types(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<EventTypeElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findEventTypes", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_event_types_for_topic(
        &self,
        server_name: &str,
        user_id: &str,
        topic_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<EventTypeElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getEventTypesForTopic", &ctx, || {
            self.core.get_attached(
                &ctx,
                topic_guid,
                relationship_type::ATTACHED_EVENT_TYPE,
                &paging,
                true,
            )
        })
    }

    pub fn get_event_type_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        event_type_guid: &str,
    ) -> CatalogResult<EventTypeElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getEventTypeByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, event_type_guid, true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventTypeProperties, TopicProperties};
    use crate::observability::MemoryCallLog;
    use crate::repository::InMemoryRepository;

    const SERVER: &str = "cocoMDS1";
    const USER: &str = "peterprofile";

    fn service() -> TopicService {
        TopicService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryCallLog::new()),
        )
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

    fn event_type_body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::EventType(EventTypeProperties {
                qualified_name: qualified_name.to_string(),
                ..EventTypeProperties::default()
            }),
        }
    }

    #[test]
    fn test_event_type_attaches_to_topic() {
        let service = service();
        let topic_guid = service
            .create_topic(SERVER, USER, false, Some(topic_body("orders.topic")))
            .unwrap();
        let event_type_guid = service
            .create_event_type(
                SERVER,
                USER,
                &topic_guid,
                false,
                Some(event_type_body("orders.topic.orderPlaced")),
            )
            .unwrap();

        let event_types = service
            .get_event_types_for_topic(SERVER, USER, &topic_guid, 0, 10)
            .unwrap();
        assert_eq!(event_types.len(), 1);
        assert_eq!(event_types[0].element_header.guid, event_type_guid);
    }

    #[test]
    fn test_event_type_under_unknown_topic_rejected() {
        let service = service();
        let err = service
            .create_event_type(
                SERVER,
                USER,
                "no-such-topic",
                false,
                Some(event_type_body("orders.topic.orderPlaced")),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { .. }));
    }

    #[test]
    fn test_get_topics_by_name_matches_display_name() {
        let service = service();
        let mut body = topic_body("orders.topic");
        if let ResourceProperties::Topic(ref mut properties) = body.properties {
            properties.display_name = Some("Orders".to_string());
        }
        service.create_topic(SERVER, USER, false, Some(body)).unwrap();

        let by_display = service
            .get_topics_by_name(SERVER, USER, "Orders", 0, 10)
            .unwrap();
        assert_eq!(by_display.len(), 1);

        // Exact match only; a regex-looking name finds nothing.
        let by_pattern = service
            .get_topics_by_name(SERVER, USER, "Ord.*", 0, 10)
            .unwrap();
        assert!(by_pattern.is_empty());
    }

    #[test]
    fn test_owner_edge_created_only_when_owner_is_home() {
        let service = service();

        // Seed the owning capability as an element so linkage can resolve.
        let broker_guid = service
            .create_topic(SERVER, USER, false, Some(topic_body("kafka.broker")))
            .unwrap();

        let mut owned = topic_body("orders.topic");
        owned.external_source_guid = Some(broker_guid.clone());
        owned.external_source_name = Some("kafka".to_string());
        service.create_topic(SERVER, USER, true, Some(owned)).unwrap();

        let mut unowned = topic_body("audit.topic");
        unowned.external_source_guid = Some(broker_guid.clone());
        unowned.external_source_name = Some("kafka".to_string());
        service
            .create_topic(SERVER, USER, false, Some(unowned))
            .unwrap();

        let owned_topics = service
            .get_topics_for_owner(SERVER, USER, &broker_guid, 0, 10)
            .unwrap();
        assert_eq!(owned_topics.len(), 1);
        assert_eq!(owned_topics[0].properties.qualified_name, "orders.topic");
    }
}
