//! SES SMTP credential derivation
//!
//! Turns a secret access key into the password the SES SMTP endpoint accepts
//! for AUTH LOGIN. The username is the access key id paired with the secret.
//!
//! ```
//! use ses_smtp_credential::{derive_checked, VERSION_TAG};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let password = derive_checked(b"wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY", "eu-west-1")?;
//! let (version, _digest) = password.decode()?;
//! assert_eq!(version, VERSION_TAG);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod credentials;
mod derivation;
mod encoding;
mod error;
mod region;

pub mod prelude;

pub use credentials::SmtpCredentials;
pub use derivation::{
    derive, derive_checked, derive_signature, verify, DATE_STAMP, KEY_PREFIX, MESSAGE, SERVICE,
    TERMINAL,
};
pub use encoding::{
    decode_credential, encode_credential, DerivedCredential, CREDENTIAL_LEN, CREDENTIAL_RAW_LEN,
    VERSION_TAG,
};
pub use error::DerivationError;
pub use region::{
    is_supported_region, supported_regions, validate_region, Region, SMTP_PORTS,
    SUPPORTED_REGIONS,
};

pub use ses_smtp_credential_crypto::{Digest, SecretKey};
