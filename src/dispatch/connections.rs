//! Dispatch for the connection family: connections, endpoints, connector
//! types, and the relationship edges between them and their assets.

use std::sync::Arc;

use serde::Serialize;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{
    AssetConnectionProperties, ConnectionElement, ConnectorTypeElement,
    EmbeddedConnectionProperties, EndpointElement, ResourceProperties,
};
use crate::observability::CallLog;
use crate::repository::{CallerContext, MetadataRepository, PagingRequest, PropertyMap};

use super::core::ResourceDispatcher;
use super::{
    external_source, relationship_type, EdgeRequestBody, ExternalSourceRequestBody,
    ReferenceableRequestBody, TemplateRequestBody,
};

fn edge_properties<P: Serialize>(properties: &Option<P>) -> CatalogResult<Option<PropertyMap>> {
    match properties {
        None => Ok(None),
        Some(value) => match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(CatalogError::property_server(
                "edge properties did not serialize to an object",
            )),
            Err(e) => Err(CatalogError::property_server(format!(
                "edge properties serialization failed: {e}"
            ))),
        },
    }
}

/// REST dispatch for connections, endpoints and connector types
pub struct ConnectionService {
    core: ResourceDispatcher,
}

impl ConnectionService {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            core: ResourceDispatcher::new(repository, call_log),
        }
    }

    // ==================
    // Connections
    // ==================

    pub fn create_connection(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createConnection", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createConnection",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::Connection(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createConnection",
                    expected: "Connection",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn create_connection_from_template(
        &self,
        server_name: &str,
        user_id: &str,
        template_guid: &str,
        owner_is_home: bool,
        body: Option<TemplateRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createConnectionFromTemplate", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createConnectionFromTemplate",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            self.core.create_from_template(
                &ctx,
                "Connection",
                template_guid,
                owner_is_home,
                source,
                &body.properties,
            )
        })
    }

    pub fn update_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateConnection", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateConnection",
            })?;
            match body.properties {
                ResourceProperties::Connection(properties) => {
                    self.core
                        .update(&ctx, connection_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateConnection",
                    expected: "Connection",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeConnection", &ctx, || {
            self.core
                .remove::<crate::model::ConnectionProperties>(&ctx, connection_guid, qualified_name)
        })
    }

    pub fn find_connections(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ConnectionElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findConnections", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_connections_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ConnectionElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getConnectionsByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, true)
        })
    }

    pub fn get_connection_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
    ) -> CatalogResult<ConnectionElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getConnectionByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, connection_guid, true)
        })
    }

    pub fn get_connections_for_owner(
        &self,
        server_name: &str,
        user_id: &str,
        owner_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ConnectionElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getConnectionsForOwner", &ctx, || {
            self.core.get_for_owner(&ctx, owner_guid, &paging, true)
        })
    }

    // ==================
    // Endpoints
    // ==================

    pub fn create_endpoint(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createEndpoint", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createEndpoint",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::Endpoint(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createEndpoint",
                    expected: "Endpoint",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn update_endpoint(
        &self,
        server_name: &str,
        user_id: &str,
        endpoint_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateEndpoint", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateEndpoint",
            })?;
            match body.properties {
                ResourceProperties::Endpoint(properties) => {
                    self.core
                        .update(&ctx, endpoint_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateEndpoint",
                    expected: "Endpoint",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_endpoint(
        &self,
        server_name: &str,
        user_id: &str,
        endpoint_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeEndpoint", &ctx, || {
            self.core
                .remove::<crate::model::EndpointProperties>(&ctx, endpoint_guid, qualified_name)
        })
    }

    pub fn find_endpoints(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<EndpointElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findEndpoints", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_endpoints_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<EndpointElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getEndpointsByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, true)
        })
    }

    pub fn get_endpoint_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        endpoint_guid: &str,
    ) -> CatalogResult<EndpointElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getEndpointByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, endpoint_guid, true)
        })
    }

    // ==================
    // Connector types
    // ==================

    pub fn create_connector_type(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createConnectorType", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createConnectorType",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::ConnectorType(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createConnectorType",
                    expected: "ConnectorType",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn update_connector_type(
        &self,
        server_name: &str,
        user_id: &str,
        connector_type_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateConnectorType", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateConnectorType",
            })?;
            match body.properties {
                ResourceProperties::ConnectorType(properties) => {
                    self.core
                        .update(&ctx, connector_type_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateConnectorType",
                    expected: "ConnectorType",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_connector_type(
        &self,
        server_name: &str,
        user_id: &str,
        connector_type_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeConnectorType", &ctx, || {
            self.core.remove::<crate::model::ConnectorTypeProperties>(
                &ctx,
                connector_type_guid,
                qualified_name,
            )
        })
    }

    pub fn find_connector_types(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ConnectorTypeElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findConnectorTypes", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_connector_type_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        connector_type_guid: &str,
    ) -> CatalogResult<ConnectorTypeElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getConnectorTypeByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, connector_type_guid, true)
        })
    }

    // ==================
    // Relationship edges
    // ==================

    pub fn setup_connector_type_edge(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        connector_type_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("setupConnectorType", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "setupConnectorType",
            })?;
            let repository = self.core.repository();
            repository.get_element_by_guid(&ctx, connection_guid, Some("Connection"))?;
            repository.get_element_by_guid(&ctx, connector_type_guid, Some("ConnectorType"))?;
            repository.link_elements(
                &ctx,
                relationship_type::CONNECTION_CONNECTOR_TYPE,
                connection_guid,
                connector_type_guid,
                None,
            )?;
            Ok(())
        })
    }

    pub fn clear_connector_type_edge(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        connector_type_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("clearConnectorType", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "clearConnectorType",
            })?;
            self.core.repository().unlink_elements(
                &ctx,
                relationship_type::CONNECTION_CONNECTOR_TYPE,
                connection_guid,
                connector_type_guid,
            )
        })
    }

    pub fn setup_endpoint_edge(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        endpoint_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("setupEndpoint", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "setupEndpoint",
            })?;
            let repository = self.core.repository();
            repository.get_element_by_guid(&ctx, connection_guid, Some("Connection"))?;
            repository.get_element_by_guid(&ctx, endpoint_guid, Some("Endpoint"))?;
            repository.link_elements(
                &ctx,
                relationship_type::CONNECTION_ENDPOINT,
                connection_guid,
                endpoint_guid,
                None,
            )?;
            Ok(())
        })
    }

    pub fn clear_endpoint_edge(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        endpoint_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("clearEndpoint", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "clearEndpoint",
            })?;
            self.core.repository().unlink_elements(
                &ctx,
                relationship_type::CONNECTION_ENDPOINT,
                connection_guid,
                endpoint_guid,
            )
        })
    }

    /// Embed one connection inside another (virtual connections)
    pub fn setup_embedded_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        embedded_connection_guid: &str,
        body: Option<EdgeRequestBody<EmbeddedConnectionProperties>>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("setupEmbeddedConnection", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "setupEmbeddedConnection",
            })?;
            let repository = self.core.repository();
            repository.get_element_by_guid(&ctx, connection_guid, Some("Connection"))?;
            repository.get_element_by_guid(&ctx, embedded_connection_guid, Some("Connection"))?;
            repository.link_elements(
                &ctx,
                relationship_type::EMBEDDED_CONNECTION,
                connection_guid,
                embedded_connection_guid,
                edge_properties(&body.properties)?,
            )?;
            Ok(())
        })
    }

    pub fn clear_embedded_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        embedded_connection_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("clearEmbeddedConnection", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "clearEmbeddedConnection",
            })?;
            self.core.repository().unlink_elements(
                &ctx,
                relationship_type::EMBEDDED_CONNECTION,
                connection_guid,
                embedded_connection_guid,
            )
        })
    }

    /// Attach a connection to the asset it gives access to.
    ///
    /// The asset end is only checked for existence; any asset type may
    /// carry a connection.
    pub fn setup_asset_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        asset_guid: &str,
        body: Option<EdgeRequestBody<AssetConnectionProperties>>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("setupAssetConnection", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "setupAssetConnection",
            })?;
            let repository = self.core.repository();
            repository.get_element_by_guid(&ctx, connection_guid, Some("Connection"))?;
            repository.get_element_by_guid(&ctx, asset_guid, None)?;
            repository.link_elements(
                &ctx,
                relationship_type::CONNECTION_TO_ASSET,
                connection_guid,
                asset_guid,
                edge_properties(&body.properties)?,
            )?;
            Ok(())
        })
    }

    pub fn clear_asset_connection(
        &self,
        server_name: &str,
        user_id: &str,
        connection_guid: &str,
        asset_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("clearAssetConnection", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "clearAssetConnection",
            })?;
            self.core.repository().unlink_elements(
                &ctx,
                relationship_type::CONNECTION_TO_ASSET,
                connection_guid,
                asset_guid,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectionProperties, ConnectorTypeProperties, EndpointProperties};
    use crate::observability::MemoryCallLog;
    use crate::repository::InMemoryRepository;
    use std::collections::HashMap;

    const SERVER: &str = "cocoMDS1";
    const USER: &str = "peterprofile";

    fn service() -> ConnectionService {
        ConnectionService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryCallLog::new()),
        )
    }

    fn connection_body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::Connection(ConnectionProperties {
                qualified_name: qualified_name.to_string(),
                display_name: Some("Test connection".to_string()),
                ..ConnectionProperties::default()
            }),
        }
    }

    #[test]
    fn test_missing_body_rejected_before_any_repository_call() {
        let service = service();
        let err = service
            .create_connection(SERVER, USER, false, None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingRequestBody { .. }));
    }

    #[test]
    fn test_wrong_properties_variant_rejected() {
        let service = service();
        let body = ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::Endpoint(EndpointProperties {
                qualified_name: "endpoint-1".to_string(),
                ..EndpointProperties::default()
            }),
        };
        let err = service
            .create_connection(SERVER, USER, false, Some(body))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPropertiesObject { .. }));
    }

    #[test]
    fn test_vendor_properties_round_trip() {
        let service = service();
        let mut body = connection_body("conn-1");
        if let ResourceProperties::Connection(ref mut properties) = body.properties {
            let mut vendor = HashMap::new();
            vendor.insert("sys".to_string(), "x".to_string());
            properties.vendor_properties = Some(vendor);
        }

        let guid = service
            .create_connection(SERVER, USER, false, Some(body))
            .unwrap();
        let element = service.get_connection_by_guid(SERVER, USER, &guid).unwrap();
        assert_eq!(
            element.properties.vendor_properties.as_ref().unwrap().get("sys"),
            Some(&"x".to_string())
        );
    }

    #[test]
    fn test_remove_with_stale_qualified_name_fails() {
        let service = service();
        let guid = service
            .create_connection(SERVER, USER, false, Some(connection_body("conn-1")))
            .unwrap();

        let err = service
            .remove_connection(SERVER, USER, &guid, "conn-stale", None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { .. }));
        assert!(service.get_connection_by_guid(SERVER, USER, &guid).is_ok());

        service
            .remove_connection(SERVER, USER, &guid, "conn-1", None)
            .unwrap();
        assert!(service.get_connection_by_guid(SERVER, USER, &guid).is_err());
    }

    #[test]
    fn test_find_connections_uses_regex() {
        let service = service();
        service
            .create_connection(SERVER, USER, false, Some(connection_body("kafka.conn")))
            .unwrap();
        service
            .create_connection(SERVER, USER, false, Some(connection_body("s3.conn")))
            .unwrap();

        let all = service.find_connections(SERVER, USER, ".*", 0, 10).unwrap();
        assert_eq!(all.len(), 2);

        let kafka = service
            .find_connections(SERVER, USER, "^kafka\\..*", 0, 10)
            .unwrap();
        assert_eq!(kafka.len(), 1);
        assert_eq!(kafka[0].properties.qualified_name, "kafka.conn");
    }

    #[test]
    fn test_connector_type_edge_lifecycle() {
        let service = service();
        let connection_guid = service
            .create_connection(SERVER, USER, false, Some(connection_body("conn-1")))
            .unwrap();
        let connector_type_body = ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::ConnectorType(ConnectorTypeProperties {
                qualified_name: "kafka-connector".to_string(),
                ..ConnectorTypeProperties::default()
            }),
        };
        let connector_type_guid = service
            .create_connector_type(SERVER, USER, false, Some(connector_type_body))
            .unwrap();

        // Missing body fails before any link is attempted.
        assert!(service
            .setup_connector_type_edge(SERVER, USER, &connection_guid, &connector_type_guid, None)
            .is_err());

        service
            .setup_connector_type_edge(
                SERVER,
                USER,
                &connection_guid,
                &connector_type_guid,
                Some(ExternalSourceRequestBody::default()),
            )
            .unwrap();

        service
            .clear_connector_type_edge(
                SERVER,
                USER,
                &connection_guid,
                &connector_type_guid,
                Some(ExternalSourceRequestBody::default()),
            )
            .unwrap();

        // Clearing removed only the edge.
        assert!(service
            .get_connection_by_guid(SERVER, USER, &connection_guid)
            .is_ok());
        assert!(service
            .get_connector_type_by_guid(SERVER, USER, &connector_type_guid)
            .is_ok());
    }

    #[test]
    fn test_embedded_connection_carries_edge_properties() {
        let service = service();
        let outer = service
            .create_connection(SERVER, USER, false, Some(connection_body("outer.conn")))
            .unwrap();
        let inner = service
            .create_connection(SERVER, USER, false, Some(connection_body("inner.conn")))
            .unwrap();

        let body = EdgeRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: Some(EmbeddedConnectionProperties {
                position: 1,
                display_name: Some("inner".to_string()),
                arguments: None,
            }),
        };
        service
            .setup_embedded_connection(SERVER, USER, &outer, &inner, Some(body))
            .unwrap();

        // Embedding a non-connection is rejected by the type guard.
        let err = service
            .setup_embedded_connection(
                SERVER,
                USER,
                &outer,
                "no-such-guid",
                Some(EdgeRequestBody {
                    external_source_guid: None,
                    external_source_name: None,
                    properties: None,
                }),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { .. }));
    }
}
