//! Shared error type across rpcacl crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Caller does not satisfy the method's policy tier.
    PermissionDenied,
    /// Internal error (including failures of external resolvers).
    Internal,
}

impl ClientCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::PermissionDenied => "PERMISSION_DENIED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AclError>;

/// Unified error type used by core and policy.
#[derive(Debug, Error)]
pub enum AclError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AclError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AclError::BadRequest(_) => ClientCode::BadRequest,
            AclError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AclError::PermissionDenied(_) => ClientCode::PermissionDenied,
            AclError::Internal(_) => ClientCode::Internal,
        }
    }
}
