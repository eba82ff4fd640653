//! Error types for signing and verification.
//!
//! A signature that is well-formed but does not match is *not* an error:
//! verification returns `Ok(false)` for that case. Every variant here means
//! the inputs could not be processed at all, which usually points at a
//! configuration problem rather than tampering.

use crate::scheme::SignatureScheme;

/// Stable error kinds for callers that need to branch on the failure class
/// (CLI exit codes, FFI, metrics labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorKind {
    /// Payload value cannot be represented canonically
    Encoding = 1000,
    /// Key material failed to decode or has the wrong length
    KeyFormat = 2000,
    /// Signature failed to decode or has the wrong length
    SignatureFormat = 3000,
    /// Scheme name not recognised
    UnknownScheme = 4000,
    /// Configuration lacks the key for the requested scheme
    MissingKey = 4001,
}

impl ErrorKind {
    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encoding => "encoding",
            Self::KeyFormat => "key_format",
            Self::SignatureFormat => "signature_format",
            Self::UnknownScheme => "unknown_scheme",
            Self::MissingKey => "missing_key",
        }
    }

    /// Numeric code for callers that cannot carry the enum (exit reports, FFI).
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by canonicalization, signing and verification.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// A payload value has a type the canonical form cannot carry.
    #[error("cannot encode field '{field}': {reason}")]
    Encoding {
        /// Offending field name (empty for top-level problems)
        field: String,
        /// What was wrong with the value
        reason: String,
    },

    /// Key material could not be used.
    #[error("invalid key: {0}")]
    KeyFormat(String),

    /// The supplied signature could not be decoded.
    #[error("invalid signature format: {0}")]
    SignatureFormat(String),

    #[error("unknown signature scheme '{0}' (use 'hmac' or 'ed25519')")]
    UnknownScheme(String),

    #[error("no {scheme} key configured")]
    MissingKey { scheme: SignatureScheme },
}

impl SigningError {
    /// Get the stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::KeyFormat(_) => ErrorKind::KeyFormat,
            Self::SignatureFormat(_) => ErrorKind::SignatureFormat,
            Self::UnknownScheme(_) => ErrorKind::UnknownScheme,
            Self::MissingKey { .. } => ErrorKind::MissingKey,
        }
    }

    /// Create an encoding error for a field.
    pub fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn key_format(reason: impl Into<String>) -> Self {
        Self::KeyFormat(reason.into())
    }

    pub(crate) fn signature_format(reason: impl Into<String>) -> Self {
        Self::SignatureFormat(reason.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SigningError>;
