//! # Metadata Repository Contract
//!
//! The facade's only collaborator: a repository offering typed-element
//! CRUD, relationship linking, regex search, zone management and
//! vendor-property storage. Everything behind this trait (storage,
//! replication, authorization decisions) is out of scope for the facade;
//! the facade's job is to validate, delegate and project.

pub mod memory;
pub mod types;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::CatalogResult;

pub use memory::InMemoryRepository;
pub use types::{
    AttributeLink, Classification, DataItemSortOrder, ElementOrigin, KeyPattern, Meaning,
    OpenElement, OriginCategory, OwnerCategory, PropertyMap, Relationship,
};

/// Hard cap on page sizes accepted by read operations
pub const MAX_PAGE_SIZE: usize = 500;

/// Identity of an external metadata source acting as element home
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSourceId {
    pub guid: String,
    pub name: String,
}

/// Per-call context threaded into every repository operation.
///
/// The lineage and duplicate-processing flags are always false at this
/// layer today; they stay on the contract as an extensibility point.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub server_name: String,
    pub user_id: String,
    pub effective_time: Option<DateTime<Utc>>,
    pub for_lineage: bool,
    pub for_duplicate_processing: bool,
}

impl CallerContext {
    pub fn new(server_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            user_id: user_id.into(),
            effective_time: None,
            for_lineage: false,
            for_duplicate_processing: false,
        }
    }
}

/// Paging window for list-returning operations
#[derive(Debug, Clone, Copy)]
pub struct PagingRequest {
    pub start_from: usize,
    pub page_size: usize,
}

impl PagingRequest {
    pub fn new(start_from: usize, page_size: usize) -> Self {
        Self {
            start_from,
            page_size,
        }
    }

    /// Reject page sizes of zero or above the cap
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page_size == 0 {
            return Err(crate::errors::CatalogError::invalid_parameter(
                "pageSize",
                "page size must be greater than zero",
            ));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(crate::errors::CatalogError::invalid_parameter(
                "pageSize",
                format!("page size {} exceeds maximum {MAX_PAGE_SIZE}", self.page_size),
            ));
        }
        Ok(())
    }

    /// Apply the window to an already-ordered result set
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.start_from)
            .take(self.page_size)
            .collect()
    }
}

/// The repository operations this service consumes.
///
/// Every method takes the caller context for downstream authorization;
/// failures come back as [`crate::errors::CatalogError`] values, never
/// panics.
pub trait MetadataRepository: Send + Sync {
    /// Create a new element of the given type; returns its GUID.
    ///
    /// The qualified name in `properties` must be unique across the
    /// repository. When `external_source` is given, the element's origin
    /// records the external collection as its home.
    fn create_element(
        &self,
        ctx: &CallerContext,
        type_name: &str,
        properties: PropertyMap,
        external_source: Option<&ExternalSourceId>,
    ) -> CatalogResult<String>;

    /// Create an element by copying a template, overlaying `overrides`.
    fn create_element_from_template(
        &self,
        ctx: &CallerContext,
        type_name: &str,
        template_guid: &str,
        overrides: PropertyMap,
        external_source: Option<&ExternalSourceId>,
    ) -> CatalogResult<String>;

    /// Update an element's properties.
    ///
    /// `merge` true overlays only the supplied keys; false replaces the
    /// whole property set, clearing anything omitted.
    fn update_element(
        &self,
        ctx: &CallerContext,
        guid: &str,
        merge: bool,
        properties: PropertyMap,
    ) -> CatalogResult<()>;

    /// Delete an element, guarded by its current qualified name.
    fn delete_element(
        &self,
        ctx: &CallerContext,
        guid: &str,
        qualified_name: &str,
    ) -> CatalogResult<()>;

    /// Move the element into the publish zone set
    fn publish_element(&self, ctx: &CallerContext, guid: &str) -> CatalogResult<()>;

    /// Return the element to the default zone set
    fn withdraw_element(&self, ctx: &CallerContext, guid: &str) -> CatalogResult<()>;

    /// Create a typed relationship between two existing elements
    fn link_elements(
        &self,
        ctx: &CallerContext,
        relationship_type: &str,
        end_one_guid: &str,
        end_two_guid: &str,
        properties: Option<PropertyMap>,
    ) -> CatalogResult<String>;

    /// Remove a typed relationship; both endpoint elements are untouched
    fn unlink_elements(
        &self,
        ctx: &CallerContext,
        relationship_type: &str,
        end_one_guid: &str,
        end_two_guid: &str,
    ) -> CatalogResult<()>;

    /// Find elements of a type whose searchable properties match a regex
    fn find_elements(
        &self,
        ctx: &CallerContext,
        type_name: &str,
        search_pattern: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>>;

    /// Elements of a type with an exact qualified-name or display-name match
    fn get_elements_by_name(
        &self,
        ctx: &CallerContext,
        type_name: &str,
        name: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>>;

    /// Fetch one element; `expected_type` mismatch is an invalid parameter
    fn get_element_by_guid(
        &self,
        ctx: &CallerContext,
        guid: &str,
        expected_type: Option<&str>,
    ) -> CatalogResult<OpenElement>;

    /// Elements reached from `start_guid` over a relationship type.
    ///
    /// Returns the far end (end two) of matching edges, filtered to
    /// `attached_type`.
    fn get_attached_elements(
        &self,
        ctx: &CallerContext,
        start_guid: &str,
        relationship_type: &str,
        attached_type: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>>;

    /// Read the vendor-property extension bag for an element
    fn get_vendor_properties(
        &self,
        ctx: &CallerContext,
        guid: &str,
    ) -> CatalogResult<Option<HashMap<String, String>>>;

    /// Replace the vendor-property extension bag for an element
    fn set_vendor_properties(
        &self,
        ctx: &CallerContext,
        guid: &str,
        vendor_properties: HashMap<String, String>,
    ) -> CatalogResult<()>;
}
