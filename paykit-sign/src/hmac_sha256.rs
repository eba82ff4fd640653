//! HMAC-SHA256 signing over canonical payload bytes.
//!
//! Signatures are the raw 32-byte tag as lowercase hex. The secret is used
//! as given (callers holding text pass its UTF-8 bytes); an empty secret is
//! rejected on both sides rather than treated as a weak key.

use crate::canonical::{Canonical, Message};
use crate::errors::{Result, SigningError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const HMAC_TAG_LENGTH: usize = 32;

/// Compute the raw tag over already canonical bytes.
///
/// # Errors
///
/// [`SigningError::KeyFormat`] if `secret` is empty.
pub fn hmac_tag(message: &[u8], secret: impl AsRef<[u8]>) -> Result<[u8; HMAC_TAG_LENGTH]> {
    let secret = secret.as_ref();
    if secret.is_empty() {
        return Err(SigningError::key_format("HMAC secret must not be empty"));
    }

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SigningError::key_format(format!("HMAC key rejected: {}", e)))?;
    mac.update(message);

    let mut tag = [0u8; HMAC_TAG_LENGTH];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Sign a payload with HMAC-SHA256.
///
/// # Examples
///
/// ```rust
/// use paykit_sign::{sign_hmac, verify_hmac, PaymentPayload};
///
/// let payload = PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB");
/// let signature = sign_hmac(&payload, "shared-secret")?;
/// assert_eq!(signature.len(), 64);
/// assert!(verify_hmac(&payload, &signature, "shared-secret")?);
/// # Ok::<(), paykit_sign::SigningError>(())
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(scheme = "hmac"))
)]
pub fn sign_hmac<P>(payload: &P, secret: impl AsRef<[u8]>) -> Result<String>
where
    P: Canonical + ?Sized,
{
    let canonical = payload.canonical_bytes()?;
    sign_hmac_bytes(&canonical, secret)
}

/// Sign bytes that are already in canonical form.
pub fn sign_hmac_bytes(canonical: &[u8], secret: impl AsRef<[u8]>) -> Result<String> {
    Ok(hex::encode(hmac_tag(canonical, secret)?))
}

/// Verify an HMAC-SHA256 signature.
///
/// The tag is recomputed and compared in constant time.
///
/// # Returns
///
/// `Ok(true)` if the tag matches
/// `Ok(false)` if it does not
/// `Err(_)` if the signature is not 32 bytes of hex, or the secret is empty
///
/// Hex digits are accepted in either case, so an uppercased tag verifies
/// the same as the lowercase form [`sign_hmac`] emits.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(scheme = "hmac"))
)]
pub fn verify_hmac<'a>(
    message: impl Into<Message<'a>>,
    signature_hex: &str,
    secret: impl AsRef<[u8]>,
) -> Result<bool> {
    let expected = decode_tag(signature_hex)?;
    let canonical = message.into().to_bytes()?;
    let computed = hmac_tag(&canonical, secret)?;

    Ok(computed[..].ct_eq(&expected[..]).into())
}

fn decode_tag(signature_hex: &str) -> Result<[u8; HMAC_TAG_LENGTH]> {
    let raw = hex::decode(signature_hex).map_err(|e| {
        SigningError::signature_format(format!("signature is not valid hex: {}", e))
    })?;

    raw.as_slice().try_into().map_err(|_| {
        SigningError::signature_format(format!(
            "expected {} signature bytes, got {}",
            HMAC_TAG_LENGTH,
            raw.len()
        ))
    })
}
