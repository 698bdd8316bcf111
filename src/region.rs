//! Region allow-list
//!
//! The derivation scheme is only defined for regions where the SMTP endpoint
//! is deployed. Membership is an exact, case-sensitive match against a
//! compiled-in table.

use crate::error::DerivationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regions with an SES SMTP endpoint
pub const SUPPORTED_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-north-1",
    "eu-south-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-south-1",
    "sa-east-1",
    "us-gov-west-1",
];

/// Ports the SMTP endpoint listens on
///
/// 25, 587 and 2587 expect STARTTLS; 465 and 2465 use implicit TLS.
pub const SMTP_PORTS: &[u16] = &[25, 587, 2587, 465, 2465];

/// A region from [`SUPPORTED_REGIONS`]
///
/// Only obtainable through validation, so holding a `Region` means the
/// identifier is in the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(&'static str);

impl Region {
    /// Validate a region identifier against the allow-list
    pub fn new(region: &str) -> Result<Self, DerivationError> {
        match SUPPORTED_REGIONS.iter().copied().find(|&known| known == region) {
            Some(known) => Ok(Region(known)),
            None => {
                tracing::debug!(region, "rejected region outside the allow-list");
                Err(DerivationError::UnsupportedRegion(region.to_string()))
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Hostname of the SMTP endpoint for this region
    pub fn smtp_endpoint(&self) -> String {
        format!("email-smtp.{}.amazonaws.com", self.0)
    }
}

/// Validate a region identifier, returning the allow-listed [`Region`]
pub fn validate_region(region: &str) -> Result<Region, DerivationError> {
    Region::new(region)
}

pub fn is_supported_region(region: &str) -> bool {
    SUPPORTED_REGIONS.contains(&region)
}

/// Iterate over every supported region
pub fn supported_regions() -> impl Iterator<Item = Region> {
    SUPPORTED_REGIONS.iter().map(|&r| Region(r))
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl FromStr for Region {
    type Err = DerivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::new(s)
    }
}

impl TryFrom<&str> for Region {
    type Error = DerivationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Region::new(value)
    }
}

impl TryFrom<String> for Region {
    type Error = DerivationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Region::new(&value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0.to_string()
    }
}
