//! SMTP password derivation
//!
//! The password is a SigV4-style signing key scoped to a fixed date, the
//! region, the `ses` service and the `SendRawEmail` action:
//!
//! ```text
//! D1 = HMAC("AWS4" || secret, "11111111")
//! D2 = HMAC(D1, region)
//! D3 = HMAC(D2, "ses")
//! D4 = HMAC(D3, "aws4_request")
//! D5 = HMAC(D4, "SendRawEmail")
//! password = Base64(0x04 || D5)
//! ```
//!
//! Every constant is fixed by the SMTP endpoint operator. The date stamp does
//! not track the current date and must stay exactly as written.

use crate::encoding::{decode_credential, encode_credential, DerivedCredential};
use crate::error::DerivationError;
use crate::region::{validate_region, Region};
use ses_smtp_credential_crypto::{chain_hmac, constant_time_eq, Digest, SecretKey};
use zeroize::Zeroizing;

/// Prepended to the secret to form the first HMAC key
pub const KEY_PREFIX: &[u8] = b"AWS4";

/// Fixed date stamp hashed at the first step
pub const DATE_STAMP: &str = "11111111";

/// Service name
pub const SERVICE: &str = "ses";

/// Terminal scope marker
pub const TERMINAL: &str = "aws4_request";

/// Operation the derived key authorizes
pub const MESSAGE: &str = "SendRawEmail";

/// Run the five-step HMAC chain for an allow-listed region
///
/// Accepts an empty secret; rejecting one is left to [`derive_checked`].
pub fn derive_signature(secret: &SecretKey, region: &Region) -> Result<Digest, DerivationError> {
    let mut root_key = Zeroizing::new(Vec::with_capacity(KEY_PREFIX.len() + secret.len()));
    root_key.extend_from_slice(KEY_PREFIX);
    root_key.extend_from_slice(secret.as_slice());

    let digest = chain_hmac(
        &root_key,
        &[
            DATE_STAMP.as_bytes(),
            region.as_str().as_bytes(),
            SERVICE.as_bytes(),
            TERMINAL.as_bytes(),
            MESSAGE.as_bytes(),
        ],
    )?;
    Ok(digest)
}

/// Derive the SMTP password for `secret` in `region`
///
/// Fails with [`DerivationError::UnsupportedRegion`] before any hashing when
/// the region is not allow-listed. An empty secret still yields a credential.
///
/// # Example
///
/// ```
/// use ses_smtp_credential::derive;
///
/// let password = derive(b"wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY", "us-east-1").unwrap();
/// assert_eq!(password.as_str(), "BLBM/9hSUELfq8Gw+rU1YcBjkOxGbhT2XG763xVLGWL9");
/// ```
pub fn derive(secret: &[u8], region: &str) -> Result<DerivedCredential, DerivationError> {
    let region = validate_region(region)?;
    let secret = SecretKey::from_slice(secret);
    let signature = derive_signature(&secret, &region)?;

    tracing::debug!(region = %region, "derived SMTP credential");
    Ok(encode_credential(&signature))
}

/// Like [`derive`], but rejects an empty secret with
/// [`DerivationError::EmptySecretKey`]
pub fn derive_checked(secret: &[u8], region: &str) -> Result<DerivedCredential, DerivationError> {
    if secret.is_empty() {
        return Err(DerivationError::EmptySecretKey);
    }
    derive(secret, region)
}

/// Check whether `candidate` is the credential for `secret` in `region`
///
/// The digests are compared in constant time. A candidate that is not a
/// well-formed credential is an error rather than a mismatch.
pub fn verify(secret: &[u8], region: &str, candidate: &str) -> Result<bool, DerivationError> {
    let region = validate_region(region)?;
    if secret.is_empty() {
        return Err(DerivationError::EmptySecretKey);
    }
    let (_, candidate) = decode_credential(candidate)?;

    let secret = SecretKey::from_slice(secret);
    let expected = derive_signature(&secret, &region)?;
    Ok(constant_time_eq(expected.as_slice(), candidate.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ses_smtp_credential_crypto::calculate_hmac;

    const EXAMPLE_SECRET: &[u8] = b"wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_chain_matches_step_by_step() {
        let secret = SecretKey::from_slice(EXAMPLE_SECRET);
        let region = Region::new("us-east-1").unwrap();

        let mut key = b"AWS4".to_vec();
        key.extend_from_slice(EXAMPLE_SECRET);
        let d1 = calculate_hmac(&key, b"11111111").unwrap();
        let d2 = calculate_hmac(d1.as_slice(), b"us-east-1").unwrap();
        let d3 = calculate_hmac(d2.as_slice(), b"ses").unwrap();
        let d4 = calculate_hmac(d3.as_slice(), b"aws4_request").unwrap();
        let d5 = calculate_hmac(d4.as_slice(), b"SendRawEmail").unwrap();

        let signature = derive_signature(&secret, &region).unwrap();
        assert_eq!(signature.as_slice(), d5.as_slice());
    }

    #[test]
    fn test_known_vector() {
        let password = derive(EXAMPLE_SECRET, "us-east-1").unwrap();
        assert_eq!(
            password.as_str(),
            "BLBM/9hSUELfq8Gw+rU1YcBjkOxGbhT2XG763xVLGWL9"
        );
    }

    #[test]
    fn test_unsupported_region_short_circuits() {
        let err = derive(EXAMPLE_SECRET, "not-a-real-region").unwrap_err();
        assert!(matches!(err, DerivationError::UnsupportedRegion(ref r) if r == "not-a-real-region"));
    }

    #[test]
    fn test_empty_secret() {
        // core derivation still produces a value
        let password = derive(b"", "us-east-1").unwrap();
        assert_eq!(
            password.as_str(),
            "BOW79JVhDT89FyiFKOdz7GgFSn54m/kvJC9qQ6Zd5iK0"
        );

        assert!(matches!(
            derive_checked(b"", "us-east-1"),
            Err(DerivationError::EmptySecretKey)
        ));
    }

    #[test]
    fn test_checked_still_validates_region() {
        assert!(matches!(
            derive_checked(EXAMPLE_SECRET, "us-east-9"),
            Err(DerivationError::UnsupportedRegion(_))
        ));
    }

    #[test]
    fn test_verify() {
        let password = derive(EXAMPLE_SECRET, "eu-west-1").unwrap();

        assert!(verify(EXAMPLE_SECRET, "eu-west-1", password.as_str()).unwrap());
        assert!(!verify(EXAMPLE_SECRET, "eu-west-2", password.as_str()).unwrap());
        assert!(!verify(b"rotated-secret", "eu-west-1", password.as_str()).unwrap());
        assert!(matches!(
            verify(EXAMPLE_SECRET, "eu-west-1", "garbage"),
            Err(DerivationError::InvalidCredential(_))
        ));
    }
}
