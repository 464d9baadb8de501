//! Response envelopes for the REST facade.
//!
//! Every endpoint answers HTTP 200 with an envelope carrying either the
//! payload or a captured error; transport status codes are not used for
//! catalog failures.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::{CatalogError, CatalogResult, ErrorKind};

/// Captured error detail inside an envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Correlates with a call-log record for repository faults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl From<&CatalogError> for ErrorInfo {
    fn from(error: &CatalogError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            correlation_id: error.correlation_id(),
        }
    }
}

/// Envelope for operations returning a new element GUID
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl From<CatalogResult<String>> for GuidResponse {
    fn from(result: CatalogResult<String>) -> Self {
        match result {
            Ok(guid) => Self {
                success: true,
                guid: Some(guid),
                error: None,
            },
            Err(error) => Self {
                success: false,
                guid: None,
                error: Some(ErrorInfo::from(&error)),
            },
        }
    }
}

/// Envelope for operations with no payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl From<CatalogResult<()>> for VoidResponse {
    fn from(result: CatalogResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                error: None,
            },
            Err(error) => Self {
                success: false,
                error: Some(ErrorInfo::from(&error)),
            },
        }
    }
}

/// Envelope for a single element
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T> From<CatalogResult<T>> for ElementResponse<T> {
    fn from(result: CatalogResult<T>) -> Self {
        match result {
            Ok(element) => Self {
                success: true,
                element: Some(element),
                error: None,
            },
            Err(error) => Self {
                success: false,
                element: None,
                error: Some(ErrorInfo::from(&error)),
            },
        }
    }
}

/// Envelope for a page of elements
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementListResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T> From<CatalogResult<Vec<T>>> for ElementListResponse<T> {
    fn from(result: CatalogResult<Vec<T>>) -> Self {
        match result {
            Ok(elements) => Self {
                success: true,
                elements: Some(elements),
                error: None,
            },
            Err(error) => Self {
                success: false,
                elements: None,
                error: Some(ErrorInfo::from(&error)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error() {
        let response = GuidResponse::from(Ok("guid-1".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["guid"], "guid-1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_carries_kind_and_correlation() {
        let error = CatalogError::property_server("store offline");
        let expected = error.correlation_id().unwrap();
        let response = VoidResponse::from(Err(error));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["kind"], "PROPERTY_SERVER_FAILURE");
        assert_eq!(json["error"]["correlationId"], expected.to_string());
    }

    #[test]
    fn test_invalid_parameter_has_no_correlation_id() {
        let response =
            VoidResponse::from(Err(CatalogError::invalid_parameter("guid", "empty")));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["kind"], "INVALID_PARAMETER");
        assert!(json["error"].get("correlationId").is_none());
    }
}
