//! Key configuration passed explicitly into signing and verification.

use crate::errors::{Result, SigningError};
use crate::scheme::SignatureScheme;
use serde::Deserialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret text that is wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the secret text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for SecretString {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Key material for both schemes.
///
/// Empty values count as not configured.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct KeyConfig {
    /// Shared HMAC secret (text, used as UTF-8 bytes).
    #[serde(default)]
    pub hmac_secret: Option<SecretString>,

    /// Ed25519 private key, base64 of seed followed by public key.
    #[serde(default)]
    pub ed25519_private_key: Option<SecretString>,

    /// Ed25519 public key, base64.
    #[serde(default)]
    pub ed25519_public_key: Option<String>,
}

impl KeyConfig {
    /// Set the HMAC secret.
    pub fn with_hmac_secret(mut self, secret: impl Into<SecretString>) -> Self {
        self.hmac_secret = Some(secret.into());
        self
    }

    /// Set the Ed25519 private key.
    pub fn with_ed25519_private_key(mut self, key: impl Into<SecretString>) -> Self {
        self.ed25519_private_key = Some(key.into());
        self
    }

    /// Set the Ed25519 public key.
    pub fn with_ed25519_public_key(mut self, key: impl Into<String>) -> Self {
        self.ed25519_public_key = Some(key.into());
        self
    }

    /// Key used to produce signatures under `scheme`.
    pub fn signing_key(&self, scheme: SignatureScheme) -> Result<&str> {
        let key = match scheme {
            SignatureScheme::Hmac => self.hmac_secret.as_ref(),
            SignatureScheme::Ed25519 => self.ed25519_private_key.as_ref(),
        };
        key.map(SecretString::expose)
            .filter(|k| !k.is_empty())
            .ok_or(SigningError::MissingKey { scheme })
    }

    /// Key used to check signatures under `scheme`.
    pub fn verifying_key(&self, scheme: SignatureScheme) -> Result<&str> {
        let key = match scheme {
            SignatureScheme::Hmac => self.hmac_secret.as_ref().map(SecretString::expose),
            SignatureScheme::Ed25519 => self.ed25519_public_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
            .ok_or(SigningError::MissingKey { scheme })
    }

    /// Schemes for which a signing key is configured.
    pub fn signing_schemes(&self) -> Vec<SignatureScheme> {
        SignatureScheme::ALL
            .into_iter()
            .filter(|scheme| self.signing_key(*scheme).is_ok())
            .collect()
    }
}
