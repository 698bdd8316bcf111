//! Credential encoding
//!
//! A derived credential is the version tag followed by the final 32-byte
//! digest, base64-encoded with the standard alphabet and padding. 33 raw
//! bytes are a whole number of base64 groups, so the 44-character result
//! never carries a `=`.

use crate::error::DerivationError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Serialize, Serializer};
use ses_smtp_credential_crypto::{constant_time_eq, Digest, DIGEST_LEN};
use std::fmt;
use zeroize::Zeroizing;

/// Identifies the derivation scheme; leads every credential
pub const VERSION_TAG: u8 = 0x04;

/// Raw length of a credential before base64 encoding
pub const CREDENTIAL_RAW_LEN: usize = 1 + DIGEST_LEN;

/// Length of the base64 credential string
pub const CREDENTIAL_LEN: usize = 44;

/// Base64 SMTP password produced by the derivation
///
/// The string is zeroized on drop and redacted from `Debug`. Use
/// [`DerivedCredential::as_str`] to hand it to the mail client.
#[derive(Clone)]
pub struct DerivedCredential(Zeroizing<String>);

impl DerivedCredential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the encoded string
    ///
    /// The returned `String` is no longer zeroized on drop.
    pub fn into_string(self) -> String {
        self.0.as_str().to_owned()
    }

    /// Split the credential back into version tag and digest
    pub fn decode(&self) -> Result<(u8, Digest), DerivationError> {
        decode_credential(&self.0)
    }
}

impl fmt::Debug for DerivedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedCredential(<redacted>)")
    }
}

impl PartialEq for DerivedCredential {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl Eq for DerivedCredential {}

impl Serialize for DerivedCredential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Encode the final chain digest as a credential string
pub fn encode_credential(digest: &Digest) -> DerivedCredential {
    let mut raw = Zeroizing::new([0u8; CREDENTIAL_RAW_LEN]);
    raw[0] = VERSION_TAG;
    raw[1..].copy_from_slice(digest.as_slice());
    DerivedCredential(Zeroizing::new(BASE64.encode(raw.as_slice())))
}

/// Parse a credential string into its version tag and digest
///
/// Rejects malformed base64, a decoded length other than 33 bytes, and any
/// version tag other than [`VERSION_TAG`].
pub fn decode_credential(credential: &str) -> Result<(u8, Digest), DerivationError> {
    let raw = Zeroizing::new(
        BASE64
            .decode(credential)
            .map_err(|e| DerivationError::InvalidCredential(e.to_string()))?,
    );

    if raw.len() != CREDENTIAL_RAW_LEN {
        return Err(DerivationError::InvalidCredential(format!(
            "expected {} decoded bytes, got {}",
            CREDENTIAL_RAW_LEN,
            raw.len()
        )));
    }

    let version = raw[0];
    if version != VERSION_TAG {
        return Err(DerivationError::InvalidCredential(format!(
            "unknown version tag {version:#04x}"
        )));
    }

    let digest = Digest::from_slice(&raw[1..])?;
    Ok((version, digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_shape() {
        let digest = Digest::from_slice(&[0x5a; 32]).unwrap();
        let credential = encode_credential(&digest);

        assert_eq!(credential.as_str().len(), CREDENTIAL_LEN);
        assert!(!credential.as_str().contains('='));
        // 0x04 as the leading six bits is 'B' in the standard alphabet
        assert!(credential.as_str().starts_with('B'));
    }

    #[test]
    fn test_zero_digest_literal() {
        let digest = Digest::from_slice(&[0u8; 32]).unwrap();
        let credential = encode_credential(&digest);
        assert_eq!(
            credential.as_str(),
            "BAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
        );
    }

    #[test]
    fn test_decode_recovers_digest() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let digest = Digest::from_slice(&bytes).unwrap();
        let (version, decoded) = encode_credential(&digest).decode().unwrap();
        assert_eq!(version, VERSION_TAG);
        assert_eq!(decoded.as_slice(), bytes.as_slice());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(matches!(
            decode_credential("not base64!"),
            Err(DerivationError::InvalidCredential(_))
        ));

        let short = BASE64.encode([VERSION_TAG; 10]);
        assert!(matches!(
            decode_credential(&short),
            Err(DerivationError::InvalidCredential(_))
        ));

        let mut wrong_version = [0u8; CREDENTIAL_RAW_LEN];
        wrong_version[0] = 0x03;
        let err = decode_credential(&BASE64.encode(wrong_version)).unwrap_err();
        assert!(err.to_string().contains("0x03"));
    }

    #[test]
    fn test_debug_redacts_and_serialize_exposes() {
        let digest = Digest::from_slice(&[1u8; 32]).unwrap();
        let credential = encode_credential(&digest);

        let debug = format!("{:?}", credential);
        assert!(!debug.contains(credential.as_str()));

        let json = serde_json::to_string(&credential).unwrap();
        assert_eq!(json, format!("\"{}\"", credential.as_str()));
    }
}
