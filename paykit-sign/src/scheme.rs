//! Scheme selection and dispatch.

use crate::canonical::{Canonical, Message};
use crate::config::KeyConfig;
use crate::ed25519::{sign_ed25519, verify_ed25519};
use crate::errors::{Result, SigningError};
use crate::hmac_sha256::{sign_hmac, verify_hmac};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported signature schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// HMAC-SHA256 with a shared secret, hex-encoded tag.
    Hmac,
    /// Ed25519 with a private/public key pair, base64-encoded signature.
    Ed25519,
}

impl SignatureScheme {
    /// Every supported scheme.
    pub const ALL: [SignatureScheme; 2] = [Self::Hmac, Self::Ed25519];

    /// Get the scheme name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hmac => "hmac",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureScheme {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SigningError::UnknownScheme(s.to_string()))
    }
}

/// Sign `payload` under `scheme`.
///
/// `key` is the HMAC secret text or the base64 Ed25519 private key.
pub fn sign<P>(payload: &P, scheme: SignatureScheme, key: &str) -> Result<String>
where
    P: Canonical + ?Sized,
{
    match scheme {
        SignatureScheme::Hmac => sign_hmac(payload, key),
        SignatureScheme::Ed25519 => sign_ed25519(payload, key),
    }
}

/// Verify `signature` over `message` under `scheme`.
///
/// `key` is the HMAC secret text or the base64 Ed25519 public key.
pub fn verify<'a>(
    message: impl Into<Message<'a>>,
    signature: &str,
    scheme: SignatureScheme,
    key: &str,
) -> Result<bool> {
    match scheme {
        SignatureScheme::Hmac => verify_hmac(message, signature, key),
        SignatureScheme::Ed25519 => verify_ed25519(message, signature, key),
    }
}

/// A scheme bound to its key configuration.
///
/// # Examples
///
/// ```rust
/// use paykit_sign::{KeyConfig, PaymentPayload, PayloadSigner, SignatureScheme};
///
/// let keys = KeyConfig::default().with_hmac_secret("shared-secret");
/// let signer = PayloadSigner::new(SignatureScheme::Hmac, keys);
///
/// let payload = PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB");
/// let signature = signer.sign(&payload)?;
/// assert!(signer.verify(&payload, &signature)?);
/// # Ok::<(), paykit_sign::SigningError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PayloadSigner {
    scheme: SignatureScheme,
    keys: KeyConfig,
}

impl PayloadSigner {
    pub fn new(scheme: SignatureScheme, keys: KeyConfig) -> Self {
        Self { scheme, keys }
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Sign with the configured signing key.
    ///
    /// # Errors
    ///
    /// [`SigningError::MissingKey`] if no signing key is configured for the
    /// scheme, plus any error of the underlying engine.
    pub fn sign<P>(&self, payload: &P) -> Result<String>
    where
        P: Canonical + ?Sized,
    {
        let key = self.keys.signing_key(self.scheme)?;
        sign(payload, self.scheme, key)
    }

    /// Verify with the configured verification key.
    pub fn verify<'a>(&self, message: impl Into<Message<'a>>, signature: &str) -> Result<bool> {
        let key = self.keys.verifying_key(self.scheme)?;
        verify(message, signature, self.scheme, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::payload::PaymentPayload;

    const PRIVATE_KEY: &str =
        "bv2DsjDN/xvx1Jrpmx1SWNPcVW44lkvWnLgRNlWhKMTYXbpwY3e6OKA2f3e9DhwjdDJ5Pok2x0RTi3+Hx8IhjA==";
    const PUBLIC_KEY: &str = "2F26cGN3ujigNn93vQ4cI3QyeT6JNsdEU4t/h8fCIYw=";

    fn sample() -> PaymentPayload {
        PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB")
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!(
            "hmac".parse::<SignatureScheme>().unwrap(),
            SignatureScheme::Hmac
        );
        assert_eq!(
            "Ed25519".parse::<SignatureScheme>().unwrap(),
            SignatureScheme::Ed25519
        );

        let err = "sign".parse::<SignatureScheme>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownScheme);
    }

    #[test]
    fn test_scheme_serde_names() {
        assert_eq!(
            serde_json::to_string(&SignatureScheme::Ed25519).unwrap(),
            "\"ed25519\""
        );
        let scheme: SignatureScheme = serde_json::from_str("\"hmac\"").unwrap();
        assert_eq!(scheme, SignatureScheme::Hmac);
    }

    #[test]
    fn test_dispatch_matches_engines() {
        let payload = sample();
        assert_eq!(
            sign(&payload, SignatureScheme::Hmac, "secret").unwrap(),
            sign_hmac(&payload, "secret").unwrap()
        );
        assert_eq!(
            sign(&payload, SignatureScheme::Ed25519, PRIVATE_KEY).unwrap(),
            sign_ed25519(&payload, PRIVATE_KEY).unwrap()
        );
    }

    #[test]
    fn test_dispatch_round_trip() {
        let payload = sample();

        let tag = sign(&payload, SignatureScheme::Hmac, "secret").unwrap();
        assert!(verify(&payload, &tag, SignatureScheme::Hmac, "secret").unwrap());

        let sig = sign(&payload, SignatureScheme::Ed25519, PRIVATE_KEY).unwrap();
        assert!(verify(&payload, &sig, SignatureScheme::Ed25519, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_hmac_signature_is_not_an_ed25519_signature() {
        let payload = sample();
        let tag = sign(&payload, SignatureScheme::Hmac, "secret").unwrap();
        let err = verify(&payload, &tag, SignatureScheme::Ed25519, PUBLIC_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureFormat);
    }

    #[test]
    fn test_payload_signer_both_schemes() {
        let keys = KeyConfig::default()
            .with_hmac_secret("secret")
            .with_ed25519_private_key(PRIVATE_KEY)
            .with_ed25519_public_key(PUBLIC_KEY);

        for scheme in SignatureScheme::ALL {
            let signer = PayloadSigner::new(scheme, keys.clone());
            let signature = signer.sign(&sample()).unwrap();
            assert!(signer.verify(&sample(), &signature).unwrap(), "{scheme}");
        }
    }

    #[test]
    fn test_payload_signer_missing_key() {
        let signer = PayloadSigner::new(SignatureScheme::Ed25519, KeyConfig::default());
        let err = signer.sign(&sample()).unwrap_err();
        assert_eq!(
            err,
            SigningError::MissingKey {
                scheme: SignatureScheme::Ed25519
            }
        );
    }
}
