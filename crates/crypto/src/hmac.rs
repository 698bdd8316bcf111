//! HMAC operations with constant-time verification
//!
//! This module provides the HMAC-SHA256 primitive the signing-key chain is
//! built from. Comparison of derived material uses constant-time equality
//! to avoid leaking how many leading bytes of a candidate matched.

use crate::types::{Digest, DIGEST_LEN};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum HmacError {
    #[error("HMAC initialization failed")]
    InitFailed,
}

/// Calculate HMAC-SHA256 over data
///
/// Returns the 32-byte tag in a zeroizing [`Digest`] so it can directly key
/// the next step of a chain.
pub fn calculate_hmac(key: &[u8], data: &[u8]) -> Result<Digest, HmacError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| HmacError::InitFailed)?;
    mac.update(data);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(Digest(out))
}

/// Derive a key by feeding each message through HMAC-SHA256 in turn
///
/// The first message is keyed with `initial_key`; every following message is
/// keyed with the previous step's output. Intermediate digests are dropped
/// (and zeroized) as soon as the next step has consumed them.
pub fn chain_hmac(initial_key: &[u8], messages: &[&[u8]]) -> Result<Digest, HmacError> {
    let (first, rest) = messages.split_first().ok_or(HmacError::InitFailed)?;
    let mut digest = calculate_hmac(initial_key, first)?;
    for message in rest {
        digest = calculate_hmac(digest.as_slice(), message)?;
    }
    Ok(digest)
}

/// Compare two byte strings in constant time
///
/// Slices of different lengths compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231, test case 2
    const RFC4231_KEY: &[u8] = b"Jefe";
    const RFC4231_DATA: &[u8] = b"what do ya want for nothing?";
    const RFC4231_SHA256: [u8; 32] = [
        0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95, 0x75,
        0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9, 0x64, 0xec,
        0x38, 0x43,
    ];

    #[test]
    fn test_calculate_hmac_known_answer() {
        let result = calculate_hmac(RFC4231_KEY, RFC4231_DATA).unwrap();
        assert_eq!(result.as_slice(), &RFC4231_SHA256);
    }

    #[test]
    fn test_calculate_hmac_accepts_empty_key() {
        let result = calculate_hmac(b"", b"data").unwrap();
        assert_eq!(result.as_slice().len(), 32);
    }

    #[test]
    fn test_chain_matches_manual_steps() {
        let step1 = calculate_hmac(b"root", b"one").unwrap();
        let step2 = calculate_hmac(step1.as_slice(), b"two").unwrap();
        let step3 = calculate_hmac(step2.as_slice(), b"three").unwrap();

        let chained = chain_hmac(b"root", &[b"one", b"two", b"three"]).unwrap();
        assert_eq!(chained.as_slice(), step3.as_slice());
    }

    #[test]
    fn test_chain_single_message() {
        let chained = chain_hmac(RFC4231_KEY, &[RFC4231_DATA]).unwrap();
        assert_eq!(chained.as_slice(), &RFC4231_SHA256);
    }

    #[test]
    fn test_chain_order_matters() {
        let forward = chain_hmac(b"root", &[b"a", b"b"]).unwrap();
        let reversed = chain_hmac(b"root", &[b"b", b"a"]).unwrap();
        assert_ne!(forward.as_slice(), reversed.as_slice());
    }

    #[test]
    fn test_chain_rejects_empty_message_list() {
        assert!(matches!(chain_hmac(b"root", &[]), Err(HmacError::InitFailed)));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"sane"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
