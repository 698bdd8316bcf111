//! SES SMTP credential cryptographic primitives
//!
//! This crate holds the low-level pieces the derivation engine is built from:
//! - Zeroizing key types that clear memory on drop
//! - HMAC-SHA256 and HMAC chaining
//! - Constant-time comparison of derived material
//!
//! # Example
//!
//! ```
//! use ses_smtp_credential_crypto::{chain_hmac, SecretKey};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = SecretKey::from("example");
//! let digest = chain_hmac(secret.as_slice(), &[b"first", b"second"])?;
//! assert_eq!(digest.as_slice().len(), 32);
//! # Ok(())
//! # }
//! ```

pub mod hmac;
pub mod types;

pub use crate::hmac::{HmacError, calculate_hmac, chain_hmac, constant_time_eq};
pub use crate::types::{DIGEST_LEN, Digest, KeyError, SecretKey};
