//! Error types for the import system

use thiserror::Error;

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that abort an import run
///
/// A single record that the destination refuses to create is not an error;
/// create operations report that as `Ok(None)` and only that record's subtree
/// is skipped.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A required credential or input field is empty
    #[error("{0}")]
    InputValidation(String),

    /// Destination plan limit would be exceeded
    #[error("Quota exceeded for {category}: {projected} > {limit}")]
    QuotaExceeded {
        category: String,
        projected: usize,
        limit: i64,
    },

    /// Failure surfaced by the source or destination API
    #[error("{platform} API error: {message}")]
    PlatformApi { platform: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ImportError {
    /// Build a platform API error for the given platform
    pub fn platform(platform: impl Into<String>, message: impl Into<String>) -> Self {
        ImportError::PlatformApi {
            platform: platform.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from one of the external platforms
    pub fn is_platform_error(&self) -> bool {
        matches!(
            self,
            ImportError::PlatformApi { .. } | ImportError::SerializationError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message_names_category_and_limit() {
        let err = ImportError::QuotaExceeded {
            category: "projects_open".to_string(),
            projected: 11,
            limit: 10,
        };

        assert_eq!(err.to_string(), "Quota exceeded for projects_open: 11 > 10");
    }

    #[test]
    fn test_input_validation_message_is_verbatim() {
        let err = ImportError::InputValidation("Missing source app key".to_string());
        assert_eq!(err.to_string(), "Missing source app key");
        assert!(!err.is_platform_error());
    }

    #[test]
    fn test_platform_error_display() {
        let err = ImportError::platform("Nozbe", "API returned status 401");
        assert_eq!(err.to_string(), "Nozbe API error: API returned status 401");
        assert!(err.is_platform_error());
    }
}
