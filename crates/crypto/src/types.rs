//! Zeroizing key types
//!
//! Wrappers for secret key material and intermediate chain digests that
//! clear their memory on drop, so nothing outlives the derivation call.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of an HMAC-SHA256 output in bytes
pub const DIGEST_LEN: usize = 32;

/// Long-term secret access key that zeroizes on drop
///
/// The bytes are never printed; `Debug` only reports the length.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Copy secret bytes into a zeroizing buffer
    pub fn from_slice(bytes: &[u8]) -> Self {
        SecretKey(Zeroizing::new(bytes.to_vec()))
    }

    /// Get a reference to the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretKey {
    fn from(mut value: String) -> Self {
        let key = SecretKey::from_slice(value.as_bytes());
        value.zeroize();
        key
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        SecretKey::from_slice(value.as_bytes())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// 32-byte HMAC-SHA256 output that zeroizes on drop
///
/// Used for every link of the signing-key chain as well as the final digest.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Digest(pub(crate) [u8; DIGEST_LEN]);

impl Digest {
    /// Create a digest from a 32-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != DIGEST_LEN {
            return Err(KeyError::InvalidLength {
                expected: DIGEST_LEN,
                got: bytes.len(),
            });
        }
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(bytes);
        Ok(Digest(digest))
    }

    /// Get a reference to the digest bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Digest(..)")
    }
}

/// Key-related errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
