//! Dispatch for the API family: deployed APIs, their operations, and the
//! header/request/response parameter lists under each operation.
//!
//! API payloads are schema-like rather than asset-like, so read paths do
//! not enrich beans with vendor properties.

use std::sync::Arc;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{
    ApiElement, ApiOperationElement, ApiParameterListElement, ParameterListType,
    ResourceProperties,
};
use crate::observability::CallLog;
use crate::repository::{CallerContext, MetadataRepository, PagingRequest};

use super::core::ResourceDispatcher;
use super::{
    external_source, relationship_type, ExternalSourceRequestBody, ReferenceableRequestBody,
    TemplateRequestBody,
};

/// REST dispatch for deployed APIs and their operation structure
pub struct ApiService {
    core: ResourceDispatcher,
}

impl ApiService {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            core: ResourceDispatcher::new(repository, call_log),
        }
    }

    // ==================
    // APIs
    // ==================

    pub fn create_api(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createAPI", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createAPI",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::Api(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createAPI",
                    expected: "API",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn create_api_from_template(
        &self,
        server_name: &str,
        user_id: &str,
        template_guid: &str,
        owner_is_home: bool,
        body: Option<TemplateRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createAPIFromTemplate", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createAPIFromTemplate",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            self.core.create_from_template(
                &ctx,
                "DeployedAPI",
                template_guid,
                owner_is_home,
                source,
                &body.properties,
            )
        })
    }

    pub fn update_api(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateAPI", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateAPI",
            })?;
            match body.properties {
                ResourceProperties::Api(properties) => {
                    self.core.update(&ctx, api_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateAPI",
                    expected: "API",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    /// Move the API from the quarantine zones to the published zones
    pub fn publish_api(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core
            .tracked("publishAPI", &ctx, || self.core.publish(&ctx, api_guid))
    }

    /// Move the API back from the published zones to the quarantine zones
    pub fn withdraw_api(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core
            .tracked("withdrawAPI", &ctx, || self.core.withdraw(&ctx, api_guid))
    }

    pub fn remove_api(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeAPI", &ctx, || {
            self.core
                .remove::<crate::model::ApiProperties>(&ctx, api_guid, qualified_name)
        })
    }

    pub fn find_apis(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findAPIs", &ctx, || {
            self.core.find(&ctx, search_string, &paging, false)
        })
    }

    pub fn get_apis_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getAPIsByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, false)
        })
    }

    pub fn get_api_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
    ) -> CatalogResult<ApiElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getAPIByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, api_guid, false)
        })
    }

    pub fn get_apis_for_owner(
        &self,
        server_name: &str,
        user_id: &str,
        owner_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getAPIsForOwner", &ctx, || {
            self.core.get_for_owner(&ctx, owner_guid, &paging, false)
        })
    }

    // ==================
    // API operations
    // ==================

    /// Create an operation nested under an API.
    ///
    /// The operation element and its containment edge are two sequential
    /// repository calls; a linkage failure leaves the operation detached.
    pub fn create_api_operation(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createAPIOperation", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createAPIOperation",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            let properties = match body.properties {
                ResourceProperties::ApiOperation(properties) => properties,
                other => {
                    return Err(CatalogError::InvalidPropertiesObject {
                        method: "createAPIOperation",
                        expected: "APIOperation",
                        received: other.variant_name().to_string(),
                    })
                }
            };

            self.core
                .repository()
                .get_element_by_guid(&ctx, api_guid, Some("DeployedAPI"))?;
            let guid = self.core.create(&ctx, owner_is_home, source, &properties)?;
            self.core.repository().link_elements(
                &ctx,
                relationship_type::API_OPERATIONS,
                api_guid,
                &guid,
                None,
            )?;
            Ok(guid)
        })
    }

    pub fn update_api_operation(
        &self,
        server_name: &str,
        user_id: &str,
        operation_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateAPIOperation", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateAPIOperation",
            })?;
            match body.properties {
                ResourceProperties::ApiOperation(properties) => {
                    self.core
                        .update(&ctx, operation_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateAPIOperation",
                    expected: "APIOperation",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_api_operation(
        &self,
        server_name: &str,
        user_id: &str,
        operation_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeAPIOperation", &ctx, || {
            self.core.remove::<crate::model::ApiOperationProperties>(
                &ctx,
                operation_guid,
                qualified_name,
            )
        })
    }

    pub fn find_api_operations(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiOperationElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findAPIOperations", &ctx, || {
            self.core.find(&ctx, search_string, &paging, false)
        })
    }

    pub fn get_operations_for_api(
        &self,
        server_name: &str,
        user_id: &str,
        api_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiOperationElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getOperationsForAPI", &ctx, || {
            self.core.get_attached(
                &ctx,
                api_guid,
                relationship_type::API_OPERATIONS,
                &paging,
                false,
            )
        })
    }

    pub fn get_api_operation_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        operation_guid: &str,
    ) -> CatalogResult<ApiOperationElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getAPIOperationByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, operation_guid, false)
        })
    }

    // ==================
    // API parameter lists
    // ==================

    /// Create a parameter list nested under an operation.
    ///
    /// The containment edge's type comes from the parameter list's role:
    /// header, request or response.
    pub fn create_api_parameter_list(
        &self,
        server_name: &str,
        user_id: &str,
        operation_guid: &str,
        parameter_list_type: ParameterListType,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createAPIParameterList", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createAPIParameterList",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            let properties = match body.properties {
                ResourceProperties::ApiParameterList(properties) => properties,
                other => {
                    return Err(CatalogError::InvalidPropertiesObject {
                        method: "createAPIParameterList",
                        expected: "APIParameterList",
                        received: other.variant_name().to_string(),
                    })
                }
            };

            self.core
                .repository()
                .get_element_by_guid(&ctx, operation_guid, Some("APIOperation"))?;
            let guid = self.core.create(&ctx, owner_is_home, source, &properties)?;
            self.core.repository().link_elements(
                &ctx,
                parameter_list_type.relationship_type_name(),
                operation_guid,
                &guid,
                None,
            )?;
            Ok(guid)
        })
    }

    pub fn update_api_parameter_list(
        &self,
        server_name: &str,
        user_id: &str,
        parameter_list_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateAPIParameterList", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateAPIParameterList",
            })?;
            match body.properties {
                ResourceProperties::ApiParameterList(properties) => {
                    self.core
                        .update(&ctx, parameter_list_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateAPIParameterList",
                    expected: "APIParameterList",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_api_parameter_list(
        &self,
        server_name: &str,
        user_id: &str,
        parameter_list_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeAPIParameterList", &ctx, || {
            self.core.remove::<crate::model::ApiParameterListProperties>(
                &ctx,
                parameter_list_guid,
                qualified_name,
            )
        })
    }

    /// All parameter lists attached to an operation, in header, request,
    /// response order
    pub fn get_parameter_lists_for_operation(
        &self,
        server_name: &str,
        user_id: &str,
        operation_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ApiParameterListElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getParameterListsForOperation", &ctx, || {
            let mut lists = Vec::new();
            for parameter_list_type in [
                ParameterListType::Header,
                ParameterListType::Request,
                ParameterListType::Response,
            ] {
                let mut attached = self.core.get_attached(
                    &ctx,
                    operation_guid,
                    parameter_list_type.relationship_type_name(),
                    &paging,
                    false,
                )?;
                lists.append(&mut attached);
            }
            Ok(lists)
        })
    }

    pub fn get_api_parameter_list_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        parameter_list_guid: &str,
    ) -> CatalogResult<ApiParameterListElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getAPIParameterListByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, parameter_list_guid, false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiOperationProperties, ApiParameterListProperties, ApiProperties};
    use crate::observability::MemoryCallLog;
    use crate::repository::InMemoryRepository;

    const SERVER: &str = "cocoMDS1";
    const USER: &str = "peterprofile";

    fn service() -> ApiService {
        ApiService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryCallLog::new()),
        )
    }

    fn api_body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::Api(ApiProperties {
                qualified_name: qualified_name.to_string(),
                ..ApiProperties::default()
            }),
        }
    }

    fn operation_body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::ApiOperation(ApiOperationProperties {
                qualified_name: qualified_name.to_string(),
                ..ApiOperationProperties::default()
            }),
        }
    }

    fn parameter_list_body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::ApiParameterList(ApiParameterListProperties {
                qualified_name: qualified_name.to_string(),
                ..ApiParameterListProperties::default()
            }),
        }
    }

    #[test]
    fn test_operation_nests_under_api() {
        let service = service();
        let api_guid = service
            .create_api(SERVER, USER, false, Some(api_body("orders-api")))
            .unwrap();

        let operation_guid = service
            .create_api_operation(
                SERVER,
                USER,
                &api_guid,
                false,
                Some(operation_body("orders-api.getOrder")),
            )
            .unwrap();

        let operations = service
            .get_operations_for_api(SERVER, USER, &api_guid, 0, 10)
            .unwrap();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].element_header.guid, operation_guid);
    }

    #[test]
    fn test_operation_under_unknown_api_rejected() {
        let service = service();
        let err = service
            .create_api_operation(
                SERVER,
                USER,
                "no-such-api",
                false,
                Some(operation_body("orders-api.getOrder")),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { .. }));
    }

    #[test]
    fn test_parameter_list_type_selects_relationship() {
        let service = service();
        let api_guid = service
            .create_api(SERVER, USER, false, Some(api_body("orders-api")))
            .unwrap();
        let operation_guid = service
            .create_api_operation(
                SERVER,
                USER,
                &api_guid,
                false,
                Some(operation_body("orders-api.getOrder")),
            )
            .unwrap();

        service
            .create_api_parameter_list(
                SERVER,
                USER,
                &operation_guid,
                ParameterListType::Request,
                false,
                Some(parameter_list_body("orders-api.getOrder.request")),
            )
            .unwrap();
        service
            .create_api_parameter_list(
                SERVER,
                USER,
                &operation_guid,
                ParameterListType::Response,
                false,
                Some(parameter_list_body("orders-api.getOrder.response")),
            )
            .unwrap();

        let lists = service
            .get_parameter_lists_for_operation(SERVER, USER, &operation_guid, 0, 10)
            .unwrap();
        assert_eq!(lists.len(), 2);
        // Request lists sort before response lists.
        assert_eq!(
            lists[0].properties.qualified_name,
            "orders-api.getOrder.request"
        );
        assert_eq!(
            lists[1].properties.qualified_name,
            "orders-api.getOrder.response"
        );
    }

    #[test]
    fn test_publish_and_withdraw_swap_zones() {
        let service = service();
        let api_guid = service
            .create_api(SERVER, USER, false, Some(api_body("orders-api")))
            .unwrap();

        service.publish_api(SERVER, USER, &api_guid).unwrap();
        service.withdraw_api(SERVER, USER, &api_guid).unwrap();
        assert!(service.get_api_by_guid(SERVER, USER, &api_guid).is_ok());
    }

    #[test]
    fn test_api_reads_do_not_enrich_vendor_properties() {
        let service = service();
        let mut body = api_body("orders-api");
        if let ResourceProperties::Api(ref mut properties) = body.properties {
            let mut vendor = std::collections::HashMap::new();
            vendor.insert("sys".to_string(), "x".to_string());
            properties.vendor_properties = Some(vendor);
        }
        let api_guid = service.create_api(SERVER, USER, false, Some(body)).unwrap();

        // Stored, but not folded back into the read projection.
        let element = service.get_api_by_guid(SERVER, USER, &api_guid).unwrap();
        assert_eq!(element.properties.vendor_properties, None);
    }
}
