//! Enum translation between the repository's generic vocabulary and the
//! service's own enumerations.
//!
//! Every mapping is total: each defined value is matched explicitly, and
//! an absent value maps to the defined fallback in both directions.

use crate::model;
use crate::repository::types as generic;

/// Generic owner category to service vocabulary
pub fn owner_category_to_service(value: Option<generic::OwnerCategory>) -> model::OwnerCategory {
    match value {
        Some(generic::OwnerCategory::UserId) => model::OwnerCategory::UserId,
        Some(generic::OwnerCategory::ProfileId) => model::OwnerCategory::ProfileId,
        Some(generic::OwnerCategory::Other) | None => model::OwnerCategory::Other,
    }
}

/// Service owner category to generic vocabulary
pub fn owner_category_to_generic(value: Option<model::OwnerCategory>) -> generic::OwnerCategory {
    match value {
        Some(model::OwnerCategory::UserId) => generic::OwnerCategory::UserId,
        Some(model::OwnerCategory::ProfileId) => generic::OwnerCategory::ProfileId,
        Some(model::OwnerCategory::Other) | None => generic::OwnerCategory::Other,
    }
}

/// Generic sort order to service vocabulary
pub fn sort_order_to_service(value: Option<generic::DataItemSortOrder>) -> model::DataItemSortOrder {
    match value {
        Some(generic::DataItemSortOrder::Ascending) => model::DataItemSortOrder::Ascending,
        Some(generic::DataItemSortOrder::Descending) => model::DataItemSortOrder::Descending,
        Some(generic::DataItemSortOrder::Unsorted) => model::DataItemSortOrder::Unsorted,
        Some(generic::DataItemSortOrder::Unknown) | None => model::DataItemSortOrder::Unknown,
    }
}

/// Service sort order to generic vocabulary
pub fn sort_order_to_generic(value: Option<model::DataItemSortOrder>) -> generic::DataItemSortOrder {
    match value {
        Some(model::DataItemSortOrder::Ascending) => generic::DataItemSortOrder::Ascending,
        Some(model::DataItemSortOrder::Descending) => generic::DataItemSortOrder::Descending,
        Some(model::DataItemSortOrder::Unsorted) => generic::DataItemSortOrder::Unsorted,
        Some(model::DataItemSortOrder::Unknown) | None => generic::DataItemSortOrder::Unknown,
    }
}

/// Generic key pattern to service vocabulary
pub fn key_pattern_to_service(value: Option<generic::KeyPattern>) -> model::KeyPattern {
    match value {
        Some(generic::KeyPattern::LocalKey) => model::KeyPattern::LocalKey,
        Some(generic::KeyPattern::RecycledKey) => model::KeyPattern::RecycledKey,
        Some(generic::KeyPattern::NaturalKey) => model::KeyPattern::NaturalKey,
        Some(generic::KeyPattern::MirrorKey) => model::KeyPattern::MirrorKey,
        Some(generic::KeyPattern::AggregateKey) => model::KeyPattern::AggregateKey,
        Some(generic::KeyPattern::CallersKey) => model::KeyPattern::CallersKey,
        Some(generic::KeyPattern::StableKey) => model::KeyPattern::StableKey,
        Some(generic::KeyPattern::Other) | None => model::KeyPattern::Other,
    }
}

/// Service key pattern to generic vocabulary
pub fn key_pattern_to_generic(value: Option<model::KeyPattern>) -> generic::KeyPattern {
    match value {
        Some(model::KeyPattern::LocalKey) => generic::KeyPattern::LocalKey,
        Some(model::KeyPattern::RecycledKey) => generic::KeyPattern::RecycledKey,
        Some(model::KeyPattern::NaturalKey) => generic::KeyPattern::NaturalKey,
        Some(model::KeyPattern::MirrorKey) => generic::KeyPattern::MirrorKey,
        Some(model::KeyPattern::AggregateKey) => generic::KeyPattern::AggregateKey,
        Some(model::KeyPattern::CallersKey) => generic::KeyPattern::CallersKey,
        Some(model::KeyPattern::StableKey) => generic::KeyPattern::StableKey,
        Some(model::KeyPattern::Other) | None => generic::KeyPattern::Other,
    }
}

/// Generic origin category to service vocabulary
pub fn origin_category_to_service(
    value: Option<generic::OriginCategory>,
) -> model::ElementOriginCategory {
    match value {
        Some(generic::OriginCategory::LocalCohort) => model::ElementOriginCategory::LocalCohort,
        Some(generic::OriginCategory::ExportArchive) => model::ElementOriginCategory::ExportArchive,
        Some(generic::OriginCategory::ContentPack) => model::ElementOriginCategory::ContentPack,
        Some(generic::OriginCategory::DeregisteredRepository) => {
            model::ElementOriginCategory::DeregisteredRepository
        }
        Some(generic::OriginCategory::ConfigurationProperty) => {
            model::ElementOriginCategory::ConfigurationProperty
        }
        Some(generic::OriginCategory::External) => model::ElementOriginCategory::External,
        Some(generic::OriginCategory::Unknown) | None => model::ElementOriginCategory::Unknown,
    }
}

/// Service origin category to generic vocabulary
pub fn origin_category_to_generic(
    value: Option<model::ElementOriginCategory>,
) -> generic::OriginCategory {
    match value {
        Some(model::ElementOriginCategory::LocalCohort) => generic::OriginCategory::LocalCohort,
        Some(model::ElementOriginCategory::ExportArchive) => generic::OriginCategory::ExportArchive,
        Some(model::ElementOriginCategory::ContentPack) => generic::OriginCategory::ContentPack,
        Some(model::ElementOriginCategory::DeregisteredRepository) => {
            generic::OriginCategory::DeregisteredRepository
        }
        Some(model::ElementOriginCategory::ConfigurationProperty) => {
            generic::OriginCategory::ConfigurationProperty
        }
        Some(model::ElementOriginCategory::External) => generic::OriginCategory::External,
        Some(model::ElementOriginCategory::Unknown) | None => generic::OriginCategory::Unknown,
    }
}
