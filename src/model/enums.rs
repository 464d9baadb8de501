//! Service-side enumerations.
//!
//! These deliberately mirror the repository's generic enums; the two
//! hierarchies evolve independently and are bridged by the exhaustive
//! translations in `projector::convert`.

use serde::{Deserialize, Serialize};

/// How the owner of an element is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerCategory {
    UserId,
    ProfileId,
    #[default]
    Other,
}

/// Sort order for values stored in a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataItemSortOrder {
    Ascending,
    Descending,
    Unsorted,
    #[default]
    Unknown,
}

/// How a key value is generated and maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyPattern {
    LocalKey,
    RecycledKey,
    NaturalKey,
    MirrorKey,
    AggregateKey,
    CallersKey,
    StableKey,
    #[default]
    Other,
}

/// Where an element's master copy is maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementOriginCategory {
    #[default]
    Unknown,
    LocalCohort,
    ExportArchive,
    ContentPack,
    DeregisteredRepository,
    ConfigurationProperty,
    External,
}

/// Which relationship attaches an API parameter list to its operation.
///
/// An unset discriminator defaults to `Header`; this is the documented
/// behavior for callers that omit the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterListType {
    #[default]
    Header,
    Request,
    Response,
}

impl ParameterListType {
    /// The repository relationship type name for this discriminator
    pub fn relationship_type_name(self) -> &'static str {
        match self {
            ParameterListType::Header => "APIHeader",
            ParameterListType::Request => "APIRequest",
            ParameterListType::Response => "APIResponse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_list_type_default_is_header() {
        assert_eq!(ParameterListType::default(), ParameterListType::Header);
        assert_eq!(
            ParameterListType::default().relationship_type_name(),
            "APIHeader"
        );
    }

    #[test]
    fn test_parameter_list_relationship_names() {
        assert_eq!(ParameterListType::Request.relationship_type_name(), "APIRequest");
        assert_eq!(ParameterListType::Response.relationship_type_name(), "APIResponse");
    }

    #[test]
    fn test_enum_wire_format() {
        let value = serde_json::to_value(KeyPattern::NaturalKey).unwrap();
        assert_eq!(value, "NATURAL_KEY");
        let parsed: DataItemSortOrder = serde_json::from_value(serde_json::json!("ASCENDING")).unwrap();
        assert_eq!(parsed, DataItemSortOrder::Ascending);
    }
}
