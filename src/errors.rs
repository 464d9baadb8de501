//! # Catalog Error Taxonomy
//!
//! Central error types shared by the repository, the dispatch layer and
//! the REST surface. Dispatchers never let these escape: every error is
//! captured into a response envelope at the facade boundary.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Broad failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed, missing, or stale input (includes missing request body)
    InvalidParameter,
    /// Caller lacks rights; determined by the downstream repository
    NotAuthorized,
    /// Repository or handler-level fault
    PropertyServerFailure,
    /// A polymorphic properties payload did not match the expected subtype
    InvalidPropertiesObject,
}

/// Errors raised by the repository and the dispatch layer.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A named parameter failed validation
    #[error("invalid value for parameter {parameter}: {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Mutating operation called without a request body
    #[error("no request body supplied for {method}")]
    MissingRequestBody { method: &'static str },

    /// Discriminated properties payload carried the wrong variant
    #[error("{method} expected {expected} properties, received {received}")]
    InvalidPropertiesObject {
        method: &'static str,
        expected: &'static str,
        received: String,
    },

    /// Caller is not permitted to perform the operation
    #[error("user {user} is not authorized to {operation}")]
    NotAuthorized { user: String, operation: String },

    /// Fault inside the repository; correlates with a call-log record
    #[error("repository fault: {message} (correlation {correlation_id})")]
    PropertyServer {
        message: String,
        correlation_id: Uuid,
    },
}

impl CatalogError {
    /// Invalid-parameter helper
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Unknown-GUID helper; unknown identifiers surface as invalid parameters
    pub fn unknown_guid(parameter: impl Into<String>, guid: &str) -> Self {
        CatalogError::InvalidParameter {
            parameter: parameter.into(),
            message: format!("no element found for GUID {guid}"),
        }
    }

    /// Repository-fault helper with a fresh correlation id
    pub fn property_server(message: impl Into<String>) -> Self {
        CatalogError::PropertyServer {
            message: message.into(),
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Get the failure category for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            CatalogError::MissingRequestBody { .. } => ErrorKind::InvalidParameter,
            CatalogError::InvalidPropertiesObject { .. } => ErrorKind::InvalidPropertiesObject,
            CatalogError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            CatalogError::PropertyServer { .. } => ErrorKind::PropertyServerFailure,
        }
    }

    /// Correlation id for server faults, if any
    pub fn correlation_id(&self) -> Option<Uuid> {
        match self {
            CatalogError::PropertyServer { correlation_id, .. } => Some(*correlation_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            CatalogError::invalid_parameter("guid", "empty").kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            CatalogError::MissingRequestBody {
                method: "createConnection"
            }
            .kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            CatalogError::property_server("store offline").kind(),
            ErrorKind::PropertyServerFailure
        );
    }

    #[test]
    fn test_server_fault_carries_correlation_id() {
        let err = CatalogError::property_server("store offline");
        assert!(err.correlation_id().is_some());
        assert!(err.to_string().contains("store offline"));
    }

    #[test]
    fn test_invalid_properties_object_message() {
        let err = CatalogError::InvalidPropertiesObject {
            method: "createConnection",
            expected: "Connection",
            received: "Endpoint".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidPropertiesObject);
        assert!(err.to_string().contains("Connection"));
        assert!(err.to_string().contains("Endpoint"));
    }
}
