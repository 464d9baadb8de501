//! Dispatch for valid value definitions.

use std::sync::Arc;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{ResourceProperties, ValidValueElement};
use crate::observability::CallLog;
use crate::repository::{CallerContext, MetadataRepository, PagingRequest};

use super::core::ResourceDispatcher;
use super::{external_source, ExternalSourceRequestBody, ReferenceableRequestBody};

/// REST dispatch for valid value definitions
pub struct ValidValuesService {
    core: ResourceDispatcher,
}

impl ValidValuesService {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            core: ResourceDispatcher::new(repository, call_log),
        }
    }

    pub fn create_valid_value(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createValidValue", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createValidValue",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::ValidValue(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createValidValue",
                    expected: "ValidValue",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn update_valid_value(
        &self,
        server_name: &str,
        user_id: &str,
        valid_value_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateValidValue", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateValidValue",
            })?;
            match body.properties {
                ResourceProperties::ValidValue(properties) => {
                    self.core
                        .update(&ctx, valid_value_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateValidValue",
                    expected: "ValidValue",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_valid_value(
        &self,
        server_name: &str,
        user_id: &str,
        valid_value_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeValidValue", &ctx, || {
            self.core.remove::<crate::model::ValidValueProperties>(
                &ctx,
                valid_value_guid,
                qualified_name,
            )
        })
    }

    pub fn find_valid_values(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ValidValueElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findValidValues", &ctx, || {
            self.core.find(&ctx, search_string, &paging, true)
        })
    }

    pub fn get_valid_values_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ValidValueElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getValidValuesByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, true)
        })
    }

    pub fn get_valid_value_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        valid_value_guid: &str,
    ) -> CatalogResult<ValidValueElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getValidValueByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, valid_value_guid, true)
        })
    }

    pub fn get_valid_values_for_owner(
        &self,
        server_name: &str,
        user_id: &str,
        owner_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<ValidValueElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getValidValuesForOwner", &ctx, || {
            self.core.get_for_owner(&ctx, owner_guid, &paging, true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidValueProperties;
    use crate::observability::MemoryCallLog;
    use crate::repository::InMemoryRepository;

    const SERVER: &str = "cocoMDS1";
    const USER: &str = "peterprofile";

    fn service() -> ValidValuesService {
        ValidValuesService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryCallLog::new()),
        )
    }

    fn body(qualified_name: &str) -> ReferenceableRequestBody {
        ReferenceableRequestBody {
            external_source_guid: None,
            external_source_name: None,
            properties: ResourceProperties::ValidValue(ValidValueProperties {
                qualified_name: qualified_name.to_string(),
                ..ValidValueProperties::default()
            }),
        }
    }

    #[test]
    fn test_merge_update_preserves_unmentioned_properties() {
        let service = service();
        let mut create = body("status-values");
        if let ResourceProperties::ValidValue(ref mut properties) = create.properties {
            properties.display_name = Some("Status".to_string());
            properties.description = Some("Order status codes".to_string());
        }
        let guid = service
            .create_valid_value(SERVER, USER, false, Some(create))
            .unwrap();

        // Merge update touching only the display name.
        let mut update = body("status-values");
        if let ResourceProperties::ValidValue(ref mut properties) = update.properties {
            properties.display_name = Some("Order status".to_string());
        }
        service
            .update_valid_value(SERVER, USER, &guid, true, Some(update))
            .unwrap();

        let element = service
            .get_valid_value_by_guid(SERVER, USER, &guid)
            .unwrap();
        assert_eq!(
            element.properties.display_name.as_deref(),
            Some("Order status")
        );
        assert_eq!(
            element.properties.description.as_deref(),
            Some("Order status codes")
        );
    }

    #[test]
    fn test_overlay_update_replaces_whole_property_map() {
        let service = service();
        let mut create = body("status-values");
        if let ResourceProperties::ValidValue(ref mut properties) = create.properties {
            properties.description = Some("Order status codes".to_string());
        }
        let guid = service
            .create_valid_value(SERVER, USER, false, Some(create))
            .unwrap();

        service
            .update_valid_value(SERVER, USER, &guid, false, Some(body("status-values")))
            .unwrap();

        let element = service
            .get_valid_value_by_guid(SERVER, USER, &guid)
            .unwrap();
        assert_eq!(element.properties.description, None);
    }

    #[test]
    fn test_invalid_search_regex_reported_as_bad_parameter() {
        let service = service();
        let err = service
            .find_valid_values(SERVER, USER, "([", 0, 10)
            .unwrap_err();
        match err {
            CatalogError::InvalidParameter { parameter, .. } => {
                assert_eq!(parameter, "searchString")
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
