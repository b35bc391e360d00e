//! Error types and error codes for confreg
//!
//! This module defines:
//! - `RegistryError`: error kinds surfaced by the store adapter and repositories
//! - `ErrorCode`: structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Error kinds surfaced by the registry core
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} '{key}' not found")]
    NotFound { kind: String, key: String },

    #[error("{kind} '{key}' already exists")]
    AlreadyExists { kind: String, key: String },

    #[error("cannot decode {kind} stored at '{key}': {reason}")]
    Decode {
        kind: String,
        key: String,
        reason: String,
    },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{kind} '{key}' was modified concurrently")]
    ConcurrentModification { kind: String, key: String },

    #[error("caused: {0}")]
    InvalidArgument(String),
}

impl RegistryError {
    pub fn not_found(kind: impl ToString, key: impl Into<String>) -> Self {
        RegistryError::NotFound {
            kind: kind.to_string(),
            key: key.into(),
        }
    }

    pub fn already_exists(kind: impl ToString, key: impl Into<String>) -> Self {
        RegistryError::AlreadyExists {
            kind: kind.to_string(),
            key: key.into(),
        }
    }

    pub fn decode(kind: impl ToString, key: impl Into<String>, reason: impl ToString) -> Self {
        RegistryError::Decode {
            kind: kind.to_string(),
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn concurrent_modification(kind: impl ToString, key: impl Into<String>) -> Self {
        RegistryError::ConcurrentModification {
            kind: kind.to_string(),
            key: key.into(),
        }
    }

    /// Structured code reported alongside this error in API responses
    pub fn code(&self) -> ErrorCode<'static> {
        match self {
            RegistryError::NotFound { .. } => RESOURCE_NOT_FOUND,
            RegistryError::AlreadyExists { .. } => RESOURCE_CONFLICT,
            RegistryError::Decode { .. } => PARSING_DATA_FAILED,
            RegistryError::StoreUnavailable(_) => DATA_ACCESS_ERROR,
            RegistryError::ConcurrentModification { .. } => CONCURRENT_MODIFICATION,
            RegistryError::InvalidArgument(_) => PARAMETER_VALIDATE_ERROR,
        }
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const MEDIA_TYPE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20003,
    message: "MediaType Error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const CONCURRENT_MODIFICATION: ErrorCode<'static> = ErrorCode {
    code: 20006,
    message: "resource modified concurrently",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

pub const PARSING_DATA_FAILED: ErrorCode<'static> = ErrorCode {
    code: 100004,
    message: "Failed to parse data",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::not_found("configuration", "configuration/abc/v1");
        assert_eq!(
            format!("{}", err),
            "configuration 'configuration/abc/v1' not found"
        );

        let err = RegistryError::already_exists("group", "group/abc/v1");
        assert_eq!(format!("{}", err), "group 'group/abc/v1' already exists");

        let err = RegistryError::StoreUnavailable("connection refused".to_string());
        assert_eq!(format!("{}", err), "store unavailable: connection refused");

        let err = RegistryError::InvalidArgument("version is empty".to_string());
        assert_eq!(format!("{}", err), "caused: version is empty");
    }

    #[test]
    fn test_decode_error_keeps_reason() {
        let err = RegistryError::decode("group", "group/g/v1", "expected value at line 1");
        assert_eq!(
            format!("{}", err),
            "cannot decode group stored at 'group/g/v1': expected value at line 1"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RegistryError::not_found("group", "k").code().code,
            RESOURCE_NOT_FOUND.code
        );
        assert_eq!(
            RegistryError::already_exists("group", "k").code().code,
            RESOURCE_CONFLICT.code
        );
        assert_eq!(
            RegistryError::StoreUnavailable(String::new()).code().code,
            DATA_ACCESS_ERROR.code
        );
        assert_eq!(
            RegistryError::concurrent_modification("group", "k")
                .code()
                .code,
            CONCURRENT_MODIFICATION.code
        );
    }

    #[test]
    fn test_error_code_default() {
        let default_code = ErrorCode::default();
        assert_eq!(default_code.code, 0);
        assert_eq!(default_code.message, "");
    }
}
