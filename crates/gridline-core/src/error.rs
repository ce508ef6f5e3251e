//! Error types for grid configuration, storage, and edit coercion.
//!
//! None of these cross the controller boundary: handlers degrade to "no visible change"
//! and storage failures are logged and replaced with defaults.

use thiserror::Error;

/// Failures raised by key-value storage backends and the JSON codec in front of them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    #[error("storage backend operation failed")]
    Backend {
        /// Operation identifier (`get`, `set`, `remove`).
        operation: &'static str,
        /// Storage key involved.
        key: String,
        /// Backend-provided detail.
        detail: String,
    },
    /// Encoding a value for storage failed.
    #[error("failed to serialize stored value")]
    Serialize {
        /// Storage key involved.
        key: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A stored value could not be decoded (corrupt or from an incompatible version).
    #[error("failed to deserialize stored value")]
    Deserialize {
        /// Storage key involved.
        key: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

/// Invalid table options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options JSON could not be parsed.
    #[error("failed to parse table options")]
    Parse {
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A field held an unusable value.
    #[error("invalid table option")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Draft text that cannot be coerced to the column type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// A numeric column received non-numeric text.
    #[error("value is not a number")]
    NotANumber {
        /// Draft text as typed.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn json_error() -> serde_json::Error {
        match serde_json::from_str::<serde_json::Value>("{") {
            Ok(_) => serde::de::Error::custom("expected invalid json"),
            Err(err) => err,
        }
    }

    #[test]
    fn storage_error_display_and_source() {
        let cases = vec![
            (
                StorageError::Backend {
                    operation: "get",
                    key: "k".into(),
                    detail: "quota".into(),
                },
                "storage backend operation failed",
                false,
            ),
            (
                StorageError::Serialize {
                    key: "k".into(),
                    source: json_error(),
                },
                "failed to serialize stored value",
                true,
            ),
            (
                StorageError::Deserialize {
                    key: "k".into(),
                    source: json_error(),
                },
                "failed to deserialize stored value",
                true,
            ),
        ];
        for (err, message, has_source) in cases {
            assert_eq!(err.to_string(), message);
            assert_eq!(err.source().is_some(), has_source);
        }
    }

    #[test]
    fn config_and_coercion_messages() {
        let parse = ConfigError::Parse {
            source: json_error(),
        };
        assert_eq!(parse.to_string(), "failed to parse table options");
        assert!(parse.source().is_some());

        let invalid = ConfigError::InvalidField {
            field: "page_size",
            value: "0".into(),
            reason: "must be greater than zero",
        };
        assert_eq!(invalid.to_string(), "invalid table option");

        let coercion = CoercionError::NotANumber { value: "x".into() };
        assert_eq!(coercion.to_string(), "value is not a number");
    }
}
