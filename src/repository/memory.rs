//! In-memory metadata repository.
//!
//! Backs the standalone server and the test suites. In a production
//! deployment this would be replaced by a connector to the real metadata
//! store; the facade only ever sees the [`MetadataRepository`] trait.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;
use uuid::Uuid;

use crate::errors::{CatalogError, CatalogResult};

use super::types::{property_name, ElementOrigin, OpenElement, OriginCategory, PropertyMap, Relationship};
use super::{CallerContext, ExternalSourceId, MetadataRepository, PagingRequest};

/// Zone sets applied by publish and withdraw
#[derive(Debug, Clone)]
pub struct ZoneConfig {
    pub default_zones: Vec<String>,
    pub publish_zones: Vec<String>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            default_zones: vec!["quarantine".to_string()],
            publish_zones: vec!["published".to_string()],
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    elements: HashMap<String, OpenElement>,
    relationships: Vec<Relationship>,
}

/// `RwLock`-guarded element and relationship store
pub struct InMemoryRepository {
    store: RwLock<Store>,
    zones: ZoneConfig,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::with_zones(ZoneConfig::default())
    }

    pub fn with_zones(zones: ZoneConfig) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            zones,
        }
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| CatalogError::property_server("repository lock poisoned"))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| CatalogError::property_server("repository lock poisoned"))
    }

    fn require_qualified_name(properties: &PropertyMap) -> CatalogResult<String> {
        properties
            .get(property_name::QUALIFIED_NAME)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CatalogError::invalid_parameter(
                    property_name::QUALIFIED_NAME,
                    "qualified name is required",
                )
            })
    }

    fn check_name_unique(store: &Store, qualified_name: &str, skip_guid: Option<&str>) -> CatalogResult<()> {
        let clash = store.elements.values().any(|e| {
            Some(e.guid.as_str()) != skip_guid && e.qualified_name() == Some(qualified_name)
        });
        if clash {
            return Err(CatalogError::invalid_parameter(
                property_name::QUALIFIED_NAME,
                format!("qualified name {qualified_name} is already in use"),
            ));
        }
        Ok(())
    }

    fn origin_for(external_source: Option<&ExternalSourceId>) -> ElementOrigin {
        match external_source {
            Some(source) => ElementOrigin {
                origin_category: OriginCategory::External,
                home_metadata_collection_id: Some(source.guid.clone()),
                home_metadata_collection_name: Some(source.name.clone()),
                license: None,
            },
            None => ElementOrigin {
                origin_category: OriginCategory::LocalCohort,
                ..ElementOrigin::default()
            },
        }
    }
}

impl MetadataRepository for InMemoryRepository {
    fn create_element(
        &self,
        _ctx: &CallerContext,
        type_name: &str,
        properties: PropertyMap,
        external_source: Option<&ExternalSourceId>,
    ) -> CatalogResult<String> {
        let qualified_name = Self::require_qualified_name(&properties)?;
        let mut store = self.write()?;
        Self::check_name_unique(&store, &qualified_name, None)?;

        let guid = Uuid::new_v4().to_string();
        let element = OpenElement {
            guid: guid.clone(),
            type_name: type_name.to_string(),
            origin: Self::origin_for(external_source),
            classifications: Vec::new(),
            meanings: Vec::new(),
            properties,
            vendor_properties: None,
            zones: self.zones.default_zones.clone(),
        };
        store.elements.insert(guid.clone(), element);
        Ok(guid)
    }

    fn create_element_from_template(
        &self,
        _ctx: &CallerContext,
        type_name: &str,
        template_guid: &str,
        overrides: PropertyMap,
        external_source: Option<&ExternalSourceId>,
    ) -> CatalogResult<String> {
        let mut store = self.write()?;
        let template = store
            .elements
            .get(template_guid)
            .ok_or_else(|| CatalogError::unknown_guid("templateGUID", template_guid))?;

        // Template properties first, then the overrides on top.
        let mut properties = template.properties.clone();
        for (key, value) in overrides {
            properties.insert(key, value);
        }
        let qualified_name = Self::require_qualified_name(&properties)?;
        Self::check_name_unique(&store, &qualified_name, None)?;

        let guid = Uuid::new_v4().to_string();
        let element = OpenElement {
            guid: guid.clone(),
            type_name: type_name.to_string(),
            origin: Self::origin_for(external_source),
            classifications: Vec::new(),
            meanings: Vec::new(),
            properties,
            vendor_properties: None,
            zones: self.zones.default_zones.clone(),
        };
        store.elements.insert(guid.clone(), element);
        Ok(guid)
    }

    fn update_element(
        &self,
        _ctx: &CallerContext,
        guid: &str,
        merge: bool,
        properties: PropertyMap,
    ) -> CatalogResult<()> {
        let mut store = self.write()?;
        if let Some(new_name) = properties
            .get(property_name::QUALIFIED_NAME)
            .and_then(|v| v.as_str())
        {
            Self::check_name_unique(&store, new_name, Some(guid))?;
        }
        let element = store
            .elements
            .get_mut(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;

        if merge {
            for (key, value) in properties {
                element.properties.insert(key, value);
            }
        } else {
            element.properties = properties;
        }
        Ok(())
    }

    fn delete_element(
        &self,
        _ctx: &CallerContext,
        guid: &str,
        qualified_name: &str,
    ) -> CatalogResult<()> {
        let mut store = self.write()?;
        let element = store
            .elements
            .get(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;

        // Stale-GUID guard: the caller's view of the element must match.
        if element.qualified_name() != Some(qualified_name) {
            return Err(CatalogError::invalid_parameter(
                property_name::QUALIFIED_NAME,
                format!(
                    "qualified name {qualified_name} does not match the stored element for GUID {guid}"
                ),
            ));
        }

        store.elements.remove(guid);
        store
            .relationships
            .retain(|r| r.end_one_guid != guid && r.end_two_guid != guid);
        Ok(())
    }

    fn publish_element(&self, _ctx: &CallerContext, guid: &str) -> CatalogResult<()> {
        let mut store = self.write()?;
        let element = store
            .elements
            .get_mut(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;
        element.zones = self.zones.publish_zones.clone();
        Ok(())
    }

    fn withdraw_element(&self, _ctx: &CallerContext, guid: &str) -> CatalogResult<()> {
        let mut store = self.write()?;
        let element = store
            .elements
            .get_mut(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;
        element.zones = self.zones.default_zones.clone();
        Ok(())
    }

    fn link_elements(
        &self,
        _ctx: &CallerContext,
        relationship_type: &str,
        end_one_guid: &str,
        end_two_guid: &str,
        properties: Option<PropertyMap>,
    ) -> CatalogResult<String> {
        let mut store = self.write()?;
        if !store.elements.contains_key(end_one_guid) {
            return Err(CatalogError::unknown_guid("endOneGUID", end_one_guid));
        }
        if !store.elements.contains_key(end_two_guid) {
            return Err(CatalogError::unknown_guid("endTwoGUID", end_two_guid));
        }

        let guid = Uuid::new_v4().to_string();
        store.relationships.push(Relationship {
            guid: guid.clone(),
            type_name: relationship_type.to_string(),
            end_one_guid: end_one_guid.to_string(),
            end_two_guid: end_two_guid.to_string(),
            properties: properties.unwrap_or_default(),
        });
        Ok(guid)
    }

    fn unlink_elements(
        &self,
        _ctx: &CallerContext,
        relationship_type: &str,
        end_one_guid: &str,
        end_two_guid: &str,
    ) -> CatalogResult<()> {
        let mut store = self.write()?;
        let before = store.relationships.len();
        store.relationships.retain(|r| {
            !(r.type_name == relationship_type
                && r.end_one_guid == end_one_guid
                && r.end_two_guid == end_two_guid)
        });
        if store.relationships.len() == before {
            return Err(CatalogError::invalid_parameter(
                "relationshipTypeName",
                format!("no {relationship_type} relationship between {end_one_guid} and {end_two_guid}"),
            ));
        }
        Ok(())
    }

    fn find_elements(
        &self,
        _ctx: &CallerContext,
        type_name: &str,
        search_pattern: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>> {
        paging.validate()?;
        // The search string is a regular expression, not a substring.
        let pattern = Regex::new(search_pattern).map_err(|e| {
            CatalogError::invalid_parameter("searchString", format!("invalid regular expression: {e}"))
        })?;

        let store = self.read()?;
        let mut matches: Vec<OpenElement> = store
            .elements
            .values()
            .filter(|e| e.type_name == type_name)
            .filter(|e| {
                property_name::SEARCHABLE.iter().any(|name| {
                    e.string_property(name)
                        .map(|v| pattern.is_match(v))
                        .unwrap_or(false)
                })
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.qualified_name().cmp(&b.qualified_name()));
        Ok(paging.apply(matches))
    }

    fn get_elements_by_name(
        &self,
        _ctx: &CallerContext,
        type_name: &str,
        name: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>> {
        paging.validate()?;
        let store = self.read()?;
        let mut matches: Vec<OpenElement> = store
            .elements
            .values()
            .filter(|e| e.type_name == type_name)
            .filter(|e| {
                e.qualified_name() == Some(name)
                    || e.string_property(property_name::DISPLAY_NAME) == Some(name)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.qualified_name().cmp(&b.qualified_name()));
        Ok(paging.apply(matches))
    }

    fn get_element_by_guid(
        &self,
        _ctx: &CallerContext,
        guid: &str,
        expected_type: Option<&str>,
    ) -> CatalogResult<OpenElement> {
        let store = self.read()?;
        let element = store
            .elements
            .get(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;
        if let Some(expected) = expected_type {
            if element.type_name != expected {
                return Err(CatalogError::invalid_parameter(
                    "guid",
                    format!(
                        "element {guid} is a {} rather than a {expected}",
                        element.type_name
                    ),
                ));
            }
        }
        Ok(element.clone())
    }

    fn get_attached_elements(
        &self,
        _ctx: &CallerContext,
        start_guid: &str,
        relationship_type: &str,
        attached_type: &str,
        paging: &PagingRequest,
    ) -> CatalogResult<Vec<OpenElement>> {
        paging.validate()?;
        let store = self.read()?;
        if !store.elements.contains_key(start_guid) {
            return Err(CatalogError::unknown_guid("startGUID", start_guid));
        }
        let mut attached: Vec<OpenElement> = store
            .relationships
            .iter()
            .filter(|r| r.type_name == relationship_type && r.end_one_guid == start_guid)
            .filter_map(|r| store.elements.get(&r.end_two_guid))
            .filter(|e| e.type_name == attached_type)
            .cloned()
            .collect();
        attached.sort_by(|a, b| a.qualified_name().cmp(&b.qualified_name()));
        Ok(paging.apply(attached))
    }

    fn get_vendor_properties(
        &self,
        _ctx: &CallerContext,
        guid: &str,
    ) -> CatalogResult<Option<HashMap<String, String>>> {
        let store = self.read()?;
        let element = store
            .elements
            .get(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;
        Ok(element.vendor_properties.clone())
    }

    fn set_vendor_properties(
        &self,
        _ctx: &CallerContext,
        guid: &str,
        vendor_properties: HashMap<String, String>,
    ) -> CatalogResult<()> {
        let mut store = self.write()?;
        let element = store
            .elements
            .get_mut(guid)
            .ok_or_else(|| CatalogError::unknown_guid("guid", guid))?;
        element.vendor_properties = if vendor_properties.is_empty() {
            None
        } else {
            Some(vendor_properties)
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> CallerContext {
        CallerContext::new("cocoMDS1", "peterprofile")
    }

    fn props(qualified_name: &str, display_name: &str) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert("qualifiedName".to_string(), json!(qualified_name));
        map.insert("displayName".to_string(), json!(display_name));
        map
    }

    #[test]
    fn test_create_and_get() {
        let repo = InMemoryRepository::new();
        let guid = repo
            .create_element(&ctx(), "Connection", props("conn-1", "One"), None)
            .unwrap();

        let element = repo.get_element_by_guid(&ctx(), &guid, Some("Connection")).unwrap();
        assert_eq!(element.qualified_name(), Some("conn-1"));
        assert_eq!(element.zones, vec!["quarantine".to_string()]);
    }

    #[test]
    fn test_qualified_name_unique() {
        let repo = InMemoryRepository::new();
        repo.create_element(&ctx(), "Connection", props("conn-1", "One"), None)
            .unwrap();
        let err = repo
            .create_element(&ctx(), "Connection", props("conn-1", "Two"), None)
            .unwrap_err();
        assert!(err.to_string().contains("already in use"));
    }

    #[test]
    fn test_external_source_sets_origin() {
        let repo = InMemoryRepository::new();
        let source = ExternalSourceId {
            guid: "cap-1".to_string(),
            name: "etl-engine".to_string(),
        };
        let guid = repo
            .create_element(&ctx(), "Connection", props("conn-1", "One"), Some(&source))
            .unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.origin.origin_category, OriginCategory::External);
        assert_eq!(element.origin.home_metadata_collection_id.as_deref(), Some("cap-1"));
    }

    #[test]
    fn test_template_copy_with_overrides() {
        let repo = InMemoryRepository::new();
        let mut template_props = props("template-1", "Template");
        template_props.insert("description".to_string(), json!("base description"));
        let template_guid = repo
            .create_element(&ctx(), "Endpoint", template_props, None)
            .unwrap();

        let guid = repo
            .create_element_from_template(
                &ctx(),
                "Endpoint",
                &template_guid,
                props("endpoint-1", "Copy"),
                None,
            )
            .unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.qualified_name(), Some("endpoint-1"));
        // Untouched template properties carry over.
        assert_eq!(element.string_property("description"), Some("base description"));
    }

    #[test]
    fn test_update_merge_vs_replace() {
        let repo = InMemoryRepository::new();
        let mut initial = props("conn-1", "One");
        initial.insert("description".to_string(), json!("keep me maybe"));
        let guid = repo.create_element(&ctx(), "Connection", initial, None).unwrap();

        // Merge keeps the description.
        let mut overlay = PropertyMap::new();
        overlay.insert("displayName".to_string(), json!("Renamed"));
        repo.update_element(&ctx(), &guid, true, overlay).unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.string_property("description"), Some("keep me maybe"));
        assert_eq!(element.string_property("displayName"), Some("Renamed"));

        // Replace clears it.
        repo.update_element(&ctx(), &guid, false, props("conn-1", "Replaced"))
            .unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.string_property("description"), None);
    }

    #[test]
    fn test_delete_guarded_by_qualified_name() {
        let repo = InMemoryRepository::new();
        let guid = repo
            .create_element(&ctx(), "Connection", props("conn-1", "One"), None)
            .unwrap();

        let err = repo.delete_element(&ctx(), &guid, "stale-name").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidParameter { .. }));
        assert!(repo.get_element_by_guid(&ctx(), &guid, None).is_ok());

        repo.delete_element(&ctx(), &guid, "conn-1").unwrap();
        assert!(repo.get_element_by_guid(&ctx(), &guid, None).is_err());
    }

    #[test]
    fn test_publish_and_withdraw_zones() {
        let repo = InMemoryRepository::new();
        let guid = repo
            .create_element(&ctx(), "Topic", props("topic-1", "One"), None)
            .unwrap();

        repo.publish_element(&ctx(), &guid).unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.zones, vec!["published".to_string()]);

        repo.withdraw_element(&ctx(), &guid).unwrap();
        let element = repo.get_element_by_guid(&ctx(), &guid, None).unwrap();
        assert_eq!(element.zones, vec!["quarantine".to_string()]);
    }

    #[test]
    fn test_find_uses_regex() {
        let repo = InMemoryRepository::new();
        repo.create_element(&ctx(), "Topic", props("orders.topic", "Orders"), None)
            .unwrap();
        repo.create_element(&ctx(), "Topic", props("payments.topic", "Payments"), None)
            .unwrap();

        let paging = PagingRequest::new(0, 10);
        let all = repo.find_elements(&ctx(), "Topic", ".*", &paging).unwrap();
        assert_eq!(all.len(), 2);

        let orders = repo
            .find_elements(&ctx(), "Topic", "^orders\\..*", &paging)
            .unwrap();
        assert_eq!(orders.len(), 1);

        // A literal that matches nothing as a regex finds nothing.
        let none = repo
            .find_elements(&ctx(), "Topic", "^orders$", &paging)
            .unwrap();
        assert!(none.is_empty());

        // Invalid regex is rejected rather than treated as a literal.
        assert!(repo.find_elements(&ctx(), "Topic", "(", &paging).is_err());
    }

    #[test]
    fn test_get_by_name_is_exact() {
        let repo = InMemoryRepository::new();
        repo.create_element(&ctx(), "Topic", props("orders.topic", "Orders"), None)
            .unwrap();

        let paging = PagingRequest::new(0, 10);
        assert_eq!(
            repo.get_elements_by_name(&ctx(), "Topic", "orders.topic", &paging)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            repo.get_elements_by_name(&ctx(), "Topic", "Orders", &paging)
                .unwrap()
                .len(),
            1
        );
        assert!(repo
            .get_elements_by_name(&ctx(), "Topic", "orders.*", &paging)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_link_unlink_and_attached() {
        let repo = InMemoryRepository::new();
        let capability = repo
            .create_element(&ctx(), "SoftwareCapability", props("cap-1", "Engine"), None)
            .unwrap();
        let topic = repo
            .create_element(&ctx(), "Topic", props("topic-1", "One"), None)
            .unwrap();

        repo.link_elements(&ctx(), "ServerAssetUse", &capability, &topic, None)
            .unwrap();

        let paging = PagingRequest::new(0, 10);
        let attached = repo
            .get_attached_elements(&ctx(), &capability, "ServerAssetUse", "Topic", &paging)
            .unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].guid, topic);

        repo.unlink_elements(&ctx(), "ServerAssetUse", &capability, &topic)
            .unwrap();
        assert!(repo
            .get_attached_elements(&ctx(), &capability, "ServerAssetUse", "Topic", &paging)
            .unwrap()
            .is_empty());

        // Unlink removed only the edge.
        assert!(repo.get_element_by_guid(&ctx(), &topic, None).is_ok());
    }

    #[test]
    fn test_vendor_properties_round_trip() {
        let repo = InMemoryRepository::new();
        let guid = repo
            .create_element(&ctx(), "Connection", props("conn-1", "One"), None)
            .unwrap();

        assert_eq!(repo.get_vendor_properties(&ctx(), &guid).unwrap(), None);

        let mut vendor = HashMap::new();
        vendor.insert("sys".to_string(), "x".to_string());
        repo.set_vendor_properties(&ctx(), &guid, vendor.clone()).unwrap();
        assert_eq!(repo.get_vendor_properties(&ctx(), &guid).unwrap(), Some(vendor));

        // Replacing with an empty map clears the bag.
        repo.set_vendor_properties(&ctx(), &guid, HashMap::new()).unwrap();
        assert_eq!(repo.get_vendor_properties(&ctx(), &guid).unwrap(), None);
    }
}
