//! Generic dispatcher core shared by every resource family.
//!
//! Implements the common operation contract once — create (with optional
//! ownership edge), template creation, merge/overlay update with the
//! vendor-property sub-rule, publish/withdraw, qualified-name-guarded
//! remove, regex find, exact-name lookup and owner traversal — leaving the
//! family services to contribute type names, payload matching and
//! family-specific edges.

use std::sync::Arc;

use serde::Serialize;

use crate::errors::CatalogResult;
use crate::model::{MetadataElement, PropertyBean, TemplateProperties};
use crate::observability::{CallLog, RestCallLog};
use crate::projector::BeanProjector;
use crate::repository::{CallerContext, ExternalSourceId, MetadataRepository, PagingRequest};

use super::relationship_type;

/// Shared plumbing for the family services
pub struct ResourceDispatcher {
    repository: Arc<dyn MetadataRepository>,
    calls: RestCallLog,
    projector: BeanProjector,
}

impl ResourceDispatcher {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            repository,
            calls: RestCallLog::new(call_log),
            projector: BeanProjector::new(),
        }
    }

    pub fn repository(&self) -> &dyn MetadataRepository {
        self.repository.as_ref()
    }

    pub fn projector(&self) -> &BeanProjector {
        &self.projector
    }

    /// Run an operation with call-start/call-end bookkeeping.
    ///
    /// The result, success or failure, is stringified into the call log;
    /// errors still flow back to the caller for envelope capture.
    pub fn tracked<T: Serialize>(
        &self,
        method: &'static str,
        ctx: &CallerContext,
        operation: impl FnOnce() -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let token = self.calls.start(method, &ctx.server_name, &ctx.user_id);
        let result = operation();
        self.calls.complete(token, &result);
        result
    }

    /// Create an element, store its vendor properties, and optionally link
    /// it to its owning capability.
    ///
    /// The three repository calls are sequential with no compensation: a
    /// failure after the first leaves the element without vendor
    /// properties or linkage and is reported to the caller as-is.
    pub fn create<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        owner_is_home: bool,
        external_source: Option<ExternalSourceId>,
        properties: &P,
    ) -> CatalogResult<String> {
        let repo_properties = properties.to_repo_properties()?;
        let guid =
            self.repository
                .create_element(ctx, P::TYPE_NAME, repo_properties, external_source.as_ref())?;

        if let Some(vendor) = properties.vendor_properties() {
            self.repository
                .set_vendor_properties(ctx, &guid, vendor.clone())?;
        }

        if owner_is_home {
            if let Some(source) = &external_source {
                self.repository.link_elements(
                    ctx,
                    relationship_type::SERVER_ASSET_USE,
                    &source.guid,
                    &guid,
                    None,
                )?;
            }
        }
        Ok(guid)
    }

    /// Create an element by copying a template; the ownership-edge rule is
    /// the same as for plain creation.
    pub fn create_from_template(
        &self,
        ctx: &CallerContext,
        type_name: &str,
        template_guid: &str,
        owner_is_home: bool,
        external_source: Option<ExternalSourceId>,
        overrides: &TemplateProperties,
    ) -> CatalogResult<String> {
        let override_map = serde_json::to_value(overrides)
            .ok()
            .and_then(|v| match v {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();

        let guid = self.repository.create_element_from_template(
            ctx,
            type_name,
            template_guid,
            override_map,
            external_source.as_ref(),
        )?;

        if owner_is_home {
            if let Some(source) = &external_source {
                self.repository.link_elements(
                    ctx,
                    relationship_type::SERVER_ASSET_USE,
                    &source.guid,
                    &guid,
                    None,
                )?;
            }
        }
        Ok(guid)
    }

    /// Update an element's properties.
    ///
    /// Vendor properties are touched only when the update is an overlay
    /// (merge=false) or a vendor map was explicitly supplied; under
    /// merge=false an absent map clears the stored bag.
    pub fn update<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        guid: &str,
        is_merge_update: bool,
        properties: &P,
    ) -> CatalogResult<()> {
        // Type guard before mutating anything.
        self.repository
            .get_element_by_guid(ctx, guid, Some(P::TYPE_NAME))?;

        let repo_properties = properties.to_repo_properties()?;
        self.repository
            .update_element(ctx, guid, is_merge_update, repo_properties)?;

        if !is_merge_update || properties.vendor_properties().is_some() {
            let vendor = properties.vendor_properties().cloned().unwrap_or_default();
            self.repository.set_vendor_properties(ctx, guid, vendor)?;
        }
        Ok(())
    }

    pub fn publish(&self, ctx: &CallerContext, guid: &str) -> CatalogResult<()> {
        self.repository.publish_element(ctx, guid)
    }

    pub fn withdraw(&self, ctx: &CallerContext, guid: &str) -> CatalogResult<()> {
        self.repository.withdraw_element(ctx, guid)
    }

    /// Hard delete, guarded by the caller's view of the qualified name
    pub fn remove<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        guid: &str,
        qualified_name: &str,
    ) -> CatalogResult<()> {
        self.repository
            .get_element_by_guid(ctx, guid, Some(P::TYPE_NAME))?;
        self.repository.delete_element(ctx, guid, qualified_name)
    }

    /// Regex search over the family's searchable properties
    pub fn find<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        search_string: &str,
        paging: &PagingRequest,
        enrich_vendor_properties: bool,
    ) -> CatalogResult<Vec<MetadataElement<P>>> {
        let elements = self
            .repository
            .find_elements(ctx, P::TYPE_NAME, search_string, paging)?;
        self.project_all(ctx, &elements, enrich_vendor_properties)
    }

    /// Exact qualified-name or display-name lookup
    pub fn get_by_name<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        name: &str,
        paging: &PagingRequest,
        enrich_vendor_properties: bool,
    ) -> CatalogResult<Vec<MetadataElement<P>>> {
        let elements = self
            .repository
            .get_elements_by_name(ctx, P::TYPE_NAME, name, paging)?;
        self.project_all(ctx, &elements, enrich_vendor_properties)
    }

    pub fn get_by_guid<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        guid: &str,
        enrich_vendor_properties: bool,
    ) -> CatalogResult<MetadataElement<P>> {
        let element = self
            .repository
            .get_element_by_guid(ctx, guid, Some(P::TYPE_NAME))?;
        let mut projected = self.projector.project::<P>(&element)?;
        if enrich_vendor_properties {
            self.attach_vendor_properties(ctx, &mut projected)?;
        }
        Ok(projected)
    }

    /// Elements owned by a capability via the server-asset-use edge
    pub fn get_for_owner<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        owner_guid: &str,
        paging: &PagingRequest,
        enrich_vendor_properties: bool,
    ) -> CatalogResult<Vec<MetadataElement<P>>> {
        let elements = self.repository.get_attached_elements(
            ctx,
            owner_guid,
            relationship_type::SERVER_ASSET_USE,
            P::TYPE_NAME,
            paging,
        )?;
        self.project_all(ctx, &elements, enrich_vendor_properties)
    }

    /// Elements attached to a parent over a family-specific relationship
    pub fn get_attached<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        parent_guid: &str,
        relationship: &str,
        paging: &PagingRequest,
        enrich_vendor_properties: bool,
    ) -> CatalogResult<Vec<MetadataElement<P>>> {
        let elements = self.repository.get_attached_elements(
            ctx,
            parent_guid,
            relationship,
            P::TYPE_NAME,
            paging,
        )?;
        self.project_all(ctx, &elements, enrich_vendor_properties)
    }

    fn project_all<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        elements: &[crate::repository::OpenElement],
        enrich_vendor_properties: bool,
    ) -> CatalogResult<Vec<MetadataElement<P>>> {
        let mut projected = Vec::with_capacity(elements.len());
        for element in elements {
            let mut typed = self.projector.project::<P>(element)?;
            if enrich_vendor_properties {
                self.attach_vendor_properties(ctx, &mut typed)?;
            }
            projected.push(typed);
        }
        Ok(projected)
    }

    fn attach_vendor_properties<P: PropertyBean>(
        &self,
        ctx: &CallerContext,
        element: &mut MetadataElement<P>,
    ) -> CatalogResult<()> {
        let vendor = self
            .repository
            .get_vendor_properties(ctx, &element.element_header.guid)?;
        element.properties.set_vendor_properties(vendor);
        Ok(())
    }
}
