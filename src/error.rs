//! Error type for SMTP credential derivation
//!
//! Every failure is a deterministic input-validation failure. Nothing here is
//! transient, and no variant ever carries secret material.
//!
//! # Example
//!
//! ```
//! use ses_smtp_credential::{derive, DerivationError};
//!
//! let err = derive(b"secret", "mars-north-1").unwrap_err();
//! assert!(matches!(err, DerivationError::UnsupportedRegion(_)));
//! assert!(!err.is_retryable());
//! ```

use thiserror::Error;

/// Errors returned by the derivation engine
#[derive(Debug, Error)]
pub enum DerivationError {
    /// Region is not in the compiled allow-list
    #[error("unsupported region: {0:?}")]
    UnsupportedRegion(String),

    /// Secret access key is zero-length
    #[error("secret access key is empty")]
    EmptySecretKey,

    /// Access key id (the SMTP username) is zero-length
    #[error("access key id is empty")]
    EmptyAccessKeyId,

    /// Input is not a well-formed derived credential
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// HMAC primitive failure
    #[error("HMAC error: {0}")]
    Hmac(#[from] ses_smtp_credential_crypto::HmacError),

    /// Digest length mismatch
    #[error("key error: {0}")]
    Key(#[from] ses_smtp_credential_crypto::KeyError),
}

impl DerivationError {
    /// Returns true if the error is potentially retryable
    ///
    /// Always false: retrying with the same input cannot succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns a suggestion for resolving this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnsupportedRegion(_) => {
                Some("use a region where the SMTP endpoint is deployed; run `list-regions` to see them")
            }
            Self::EmptySecretKey => Some("check that the secret access key was provisioned"),
            Self::EmptyAccessKeyId => Some("pass the access key id paired with the secret key"),
            _ => None,
        }
    }

    /// Returns true if this error stems from caller-supplied configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRegion(_) | Self::EmptySecretKey | Self::EmptyAccessKeyId
        )
    }
}
