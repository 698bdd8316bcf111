//! SMTP credential bundle
//!
//! Pairs the derived password with the access key id (the SMTP username) and
//! the regional endpoint a mail client should connect to.

use crate::derivation::derive_checked;
use crate::encoding::DerivedCredential;
use crate::error::DerivationError;
use crate::region::{validate_region, Region, SMTP_PORTS};
use serde::Serialize;

/// Everything a mail client needs for AUTH LOGIN against the SMTP endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: DerivedCredential,
    pub region: Region,
    pub endpoint: String,
    pub ports: &'static [u16],
}

impl SmtpCredentials {
    /// Derive credentials for `access_key_id`/`secret` in `region`
    ///
    /// Rejects an empty access key id or secret, and any region outside the
    /// allow-list.
    pub fn derive(
        access_key_id: &str,
        secret: &[u8],
        region: &str,
    ) -> Result<Self, DerivationError> {
        if access_key_id.is_empty() {
            return Err(DerivationError::EmptyAccessKeyId);
        }
        let region = validate_region(region)?;
        let password = derive_checked(secret, region.as_str())?;

        Ok(Self {
            username: access_key_id.to_string(),
            password,
            endpoint: region.smtp_endpoint(),
            region,
            ports: SMTP_PORTS,
        })
    }

    /// Render as `KEY=value` lines for an env file
    pub fn to_env_lines(&self) -> String {
        format!(
            "SMTP_HOST={}\nSMTP_PORT=587\nSMTP_USERNAME={}\nSMTP_PASSWORD={}\n",
            self.endpoint,
            self.username,
            self.password.as_str()
        )
    }
}
