//! # CLI Error Type
//!
//! What a failed run prints on stderr, and how it exits.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  run() ── anyhow::Error ──┐                                             │
//! │                           ▼                                             │
//! │        ┌──────────────────────────────────────────┐                     │
//! │        │  CoreError?    is_client_error → 2/1     │                     │
//! │        │  ConfigError?  bad SPLITWISER_* → 2      │                     │
//! │        │  JSON error?   malformed input  → 2      │                     │
//! │        │  anything else (I/O, ...)       → 1      │                     │
//! │        └──────────────────┬───────────────────────┘                     │
//! │                           ▼                                             │
//! │   stderr: {"code":"VALIDATION_ERROR","message":"subtotal cannot be     │
//! │            zero"}                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use splitwiser_core::CoreError;

use crate::config::ConfigError;

/// Error printed when a command fails.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "must have at least one participant"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for failed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input was rejected (exit 2)
    ValidationError,

    /// Anything else (exit 1)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::Internal => 1,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Serializes to one line of JSON, falling back to plain text.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }
}

/// Converts core errors to API errors.
impl From<&CoreError> for ApiError {
    fn from(err: &CoreError) -> Self {
        if err.is_client_error() {
            ApiError::validation(err.to_string())
        } else {
            tracing::error!(error = %err, "Engine rejected stored data");
            ApiError::internal(err.to_string())
        }
    }
}

/// Picks the code from the first typed error found in the chain.
///
/// The message joins the context layers down to that error, so
/// `Validation(..)` isn't repeated by its own source.
impl From<&anyhow::Error> for ApiError {
    fn from(err: &anyhow::Error) -> Self {
        let mut layers = Vec::new();

        for cause in err.chain() {
            layers.push(cause.to_string());

            if let Some(core) = cause.downcast_ref::<CoreError>() {
                return ApiError {
                    message: layers.join(": "),
                    ..ApiError::from(core)
                };
            }
            if cause.downcast_ref::<ConfigError>().is_some()
                || cause.downcast_ref::<serde_json::Error>().is_some()
            {
                return ApiError::validation(layers.join(": "));
            }
        }

        ApiError::internal(layers.join(": "))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use splitwiser_core::ValidationError;

    #[test]
    fn test_client_core_errors_are_validation() {
        let api = ApiError::from(&CoreError::ZeroSubtotal);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "subtotal cannot be zero");
        assert_eq!(api.code.exit_code(), 2);

        let api = ApiError::from(&CoreError::Validation(ValidationError::Required {
            field: "from".to_string(),
        }));
        assert_eq!(api.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_non_finite_is_internal() {
        let api = ApiError::from(&CoreError::NonFiniteAmount {
            field: "total".to_string(),
        });
        assert_eq!(api.code, ErrorCode::Internal);
        assert_eq!(api.code.exit_code(), 1);
    }

    #[test]
    fn test_anyhow_chain_finds_core_error() {
        let result: Result<(), CoreError> = Err(CoreError::NoParticipants);
        let err = result.context("Failed to split dinner.json").unwrap_err();

        let api = ApiError::from(&err);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(
            api.message,
            "Failed to split dinner.json: must have at least one participant"
        );
    }

    #[test]
    fn test_wrapped_validation_message_is_not_repeated() {
        let result: Result<(), CoreError> = Err(CoreError::Validation(ValidationError::Required {
            field: "group_id".to_string(),
        }));
        let err = result.context("settlement s1 is invalid").unwrap_err();

        assert_eq!(
            ApiError::from(&err).message,
            "settlement s1 is invalid: Validation error: group_id is required"
        );
    }

    #[test]
    fn test_malformed_json_is_validation() {
        let err = anyhow::Error::from(serde_json::from_str::<u32>("{").unwrap_err());
        assert_eq!(ApiError::from(&err).code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = anyhow::Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(ApiError::from(&err).code, ErrorCode::Internal);
    }

    #[test]
    fn test_serialized_shape() {
        let json = ApiError::validation("bad").to_json();
        assert_eq!(json, r#"{"code":"VALIDATION_ERROR","message":"bad"}"#);
    }
}
