use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::errors::RelayError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HMAC computation failed: {0}")]
    HmacError(String),
}

impl From<AuthError> for RelayError {
    fn from(e: AuthError) -> Self {
        RelayError::Signing(e.to_string())
    }
}

/// Bitget API credentials as loaded at startup. Any of the mandatory parts
/// may be absent; [`Credentials::signer`] refuses to hand out a signer then.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub passphrase: Option<String>,
    pub sub_account_id: Option<String>,
}

impl Credentials {
    /// Environment variable names of mandatory credentials that are unset.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("BITGET_API_KEY");
        }
        if self.api_secret.is_none() {
            missing.push("BITGET_API_SECRET");
        }
        if self.passphrase.is_none() {
            missing.push("BITGET_API_PASSPHRASE");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn signer(&self) -> Result<BitgetAuth, RelayError> {
        match (&self.api_key, &self.api_secret, &self.passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Ok(BitgetAuth::new(
                key.clone(),
                secret.clone(),
                passphrase.clone(),
            )),
            _ => Err(RelayError::Configuration(format!(
                "Bitget credentials missing: {}",
                self.missing().join(", ")
            ))),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("passphrase", &redact(&self.passphrase))
            .field("sub_account_id", &self.sub_account_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct BitgetAuth {
    pub api_key: String,
    api_secret: String,
    pub passphrase: String,
}

impl BitgetAuth {
    pub fn new(api_key: String, api_secret: String, passphrase: String) -> Self {
        Self {
            api_key,
            api_secret,
            passphrase,
        }
    }

    /// Build the HMAC-SHA256 signature for the Bitget REST API.
    ///
    /// message = `{timestamp}{method}{path}{body}`, keyed with the raw secret,
    /// digest encoded as standard base64.
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        path: &str,
        body: &str,
    ) -> Result<String, AuthError> {
        let message = format!("{timestamp}{method}{path}{body}");

        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| AuthError::HmacError(e.to_string()))?;

        mac.update(message.as_bytes());
        let result = mac.finalize();

        Ok(BASE64.encode(result.into_bytes()))
    }
}

impl fmt::Debug for BitgetAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitgetAuth")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}
