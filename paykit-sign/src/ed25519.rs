//! # Ed25519 Signatures
//!
//! ## Key and signature formats
//!
//! All key material and signatures travel as standard base64 with padding:
//!
//! - private key: 64 bytes, the 32-byte seed followed by the 32-byte public
//!   key (NaCl layout). A bare 32-byte seed is rejected, and the public half
//!   must match the key derived from the seed.
//! - public key: 32 bytes, must decode to a curve point
//! - signature: 64 bytes
//!
//! Lengths are checked exactly before any cryptographic operation. Nothing
//! is ever truncated or padded to fit.
//!
//! Ed25519 signing is deterministic, so the same payload and key always
//! produce the same signature.

use crate::canonical::{Canonical, Message};
use crate::errors::{Result, SigningError};
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

/// Decoded private key length (seed followed by public key).
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::KEYPAIR_LENGTH;

/// Decoded public key length.
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Decoded signature length.
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Decode and validate a base64 private key.
///
/// # Errors
///
/// [`SigningError::KeyFormat`] if the text is not base64, does not decode to
/// exactly 64 bytes, or its public half does not belong to its seed.
pub fn parse_signing_key(private_key_base64: &str) -> Result<SigningKey> {
    let raw = STANDARD
        .decode(private_key_base64)
        .map_err(|e| SigningError::key_format(format!("private key is not valid base64: {}", e)))?;
    let raw = Zeroizing::new(raw);

    let keypair = <&[u8; PRIVATE_KEY_LENGTH]>::try_from(raw.as_slice()).map_err(|_| {
        SigningError::key_format(format!(
            "expected {} private key bytes, got {}",
            PRIVATE_KEY_LENGTH,
            raw.len()
        ))
    })?;

    SigningKey::from_keypair_bytes(keypair)
        .map_err(|_| SigningError::key_format("public half of private key does not match its seed"))
}

/// Decode and validate a base64 public key.
///
/// # Errors
///
/// [`SigningError::KeyFormat`] if the text is not base64, does not decode to
/// exactly 32 bytes, or is not a valid curve point.
pub fn parse_verifying_key(public_key_base64: &str) -> Result<VerifyingKey> {
    let raw = STANDARD
        .decode(public_key_base64)
        .map_err(|e| SigningError::key_format(format!("public key is not valid base64: {}", e)))?;

    let bytes = <[u8; PUBLIC_KEY_LENGTH]>::try_from(raw.as_slice()).map_err(|_| {
        SigningError::key_format(format!(
            "expected {} public key bytes, got {}",
            PUBLIC_KEY_LENGTH,
            raw.len()
        ))
    })?;

    VerifyingKey::from_bytes(&bytes).map_err(|e| {
        SigningError::key_format(format!("public key is not a valid Ed25519 point: {}", e))
    })
}

fn parse_signature(signature_base64: &str) -> Result<Signature> {
    let raw = STANDARD.decode(signature_base64).map_err(|e| {
        SigningError::signature_format(format!("signature is not valid base64: {}", e))
    })?;

    let bytes = <[u8; SIGNATURE_LENGTH]>::try_from(raw.as_slice()).map_err(|_| {
        SigningError::signature_format(format!(
            "expected {} signature bytes, got {}",
            SIGNATURE_LENGTH,
            raw.len()
        ))
    })?;

    Ok(Signature::from_bytes(&bytes))
}

/// Sign a payload with an Ed25519 private key.
///
/// # Examples
///
/// ```rust
/// use paykit_sign::{sign_ed25519, verify_ed25519, PaymentPayload};
///
/// let private_key = "bv2DsjDN/xvx1Jrpmx1SWNPcVW44lkvWnLgRNlWhKMTYXbpwY3e6OKA2f3e9DhwjdDJ5Pok2x0RTi3+Hx8IhjA==";
/// let public_key = "2F26cGN3ujigNn93vQ4cI3QyeT6JNsdEU4t/h8fCIYw=";
///
/// let payload = PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB");
/// let signature = sign_ed25519(&payload, private_key)?;
/// assert!(verify_ed25519(&payload, &signature, public_key)?);
/// # Ok::<(), paykit_sign::SigningError>(())
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(scheme = "ed25519"))
)]
pub fn sign_ed25519<P>(payload: &P, private_key_base64: &str) -> Result<String>
where
    P: Canonical + ?Sized,
{
    let canonical = payload.canonical_bytes()?;
    sign_ed25519_bytes(&canonical, private_key_base64)
}

/// Sign bytes that are already in canonical form.
pub fn sign_ed25519_bytes(canonical: &[u8], private_key_base64: &str) -> Result<String> {
    let signing_key = parse_signing_key(private_key_base64)?;
    let signature = signing_key.sign(canonical);
    Ok(STANDARD.encode(signature.to_bytes()))
}

/// Verify an Ed25519 signature.
///
/// # Returns
///
/// `Ok(true)` if the signature is valid for the message and key
/// `Ok(false)` if it is well-formed but does not verify
/// `Err(_)` if the public key or signature is malformed
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(scheme = "ed25519"))
)]
pub fn verify_ed25519<'a>(
    message: impl Into<Message<'a>>,
    signature_base64: &str,
    public_key_base64: &str,
) -> Result<bool> {
    let verifying_key = parse_verifying_key(public_key_base64)?;
    let signature = parse_signature(signature_base64)?;
    let canonical = message.into().to_bytes()?;

    Ok(verifying_key.verify(&canonical, &signature).is_ok())
}

/// Public key (base64) embedded in a private key.
pub fn public_key_from_private(private_key_base64: &str) -> Result<String> {
    let signing_key = parse_signing_key(private_key_base64)?;
    Ok(STANDARD.encode(signing_key.verifying_key().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::payload::{Payload, PaymentPayload};

    const PRIVATE_KEY: &str =
        "bv2DsjDN/xvx1Jrpmx1SWNPcVW44lkvWnLgRNlWhKMTYXbpwY3e6OKA2f3e9DhwjdDJ5Pok2x0RTi3+Hx8IhjA==";
    const PUBLIC_KEY: &str = "2F26cGN3ujigNn93vQ4cI3QyeT6JNsdEU4t/h8fCIYw=";

    // RFC 8032 section 7.1, test 1
    const RFC_KEYPAIR: &str =
        "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2DXWpgBgrEKt9VL/tPJZAc6DuFy89qmIyWvAhpo9wdRGg==";
    const RFC_PUBLIC_KEY: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";

    fn sample() -> PaymentPayload {
        PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB")
    }

    fn b64_of_len(len: usize) -> String {
        STANDARD.encode(vec![7u8; len])
    }

    #[test]
    fn test_known_signature() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        assert_eq!(
            signature,
            "RWF7OTb8wKQjjZioYsqVwQZKFc5i4g+m2inA59IDPuebceyWEQrXZZ/cJDGp6ex8FFx8+lBZCF88qJRV55OEBQ=="
        );
        assert!(verify_ed25519(&sample(), &signature, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_known_signature_with_title() {
        let payload = sample().with_title("Forget the church");
        let signature = sign_ed25519(&payload, PRIVATE_KEY).unwrap();
        assert_eq!(
            signature,
            "MeLUtlmh6VrB/1NERjnVhh4IYnJNqfPOMkzIF/bSM3nn/d0/djAUzfpNftDFsYIsqt3nf9wnfHg23kCxbViYBg=="
        );
    }

    #[test]
    fn test_rfc8032_vector1_empty_message() {
        let expected = hex::decode(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        )
        .unwrap();

        let signature = sign_ed25519_bytes(b"", RFC_KEYPAIR).unwrap();
        assert_eq!(signature, STANDARD.encode(&expected));
        assert!(verify_ed25519(&b""[..], &signature, RFC_PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        let b = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_other_public_key_fails() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        assert!(!verify_ed25519(&sample(), &signature, RFC_PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_modified_payload_fails_verification() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        let mut modified = sample();
        modified.merchant_reference = "txn-2346".to_string();
        assert!(!verify_ed25519(&modified, &signature, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_flipped_bit_in_canonical_bytes_fails() {
        let mut canonical = sample().canonical_bytes().unwrap();
        let signature = sign_ed25519_bytes(&canonical, PRIVATE_KEY).unwrap();
        canonical[10] ^= 0x01;
        assert!(!verify_ed25519(&canonical, &signature, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_corrupted_signature_fails() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        let mut raw = STANDARD.decode(signature).unwrap();
        raw[0] ^= 1;
        let corrupted = STANDARD.encode(raw);
        assert!(!verify_ed25519(&sample(), &corrupted, PUBLIC_KEY).unwrap());
    }

    #[test]
    fn test_public_key_length_rejected() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        for len in [31usize, 33] {
            let err = verify_ed25519(&sample(), &signature, &b64_of_len(len)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::KeyFormat, "length {len}");
        }
    }

    #[test]
    fn test_invalid_point_rejected() {
        let mut not_a_point = [0u8; 32];
        not_a_point[0] = 2;
        let err = parse_verifying_key(&STANDARD.encode(not_a_point)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormat);
    }

    #[test]
    fn test_signature_length_rejected() {
        for len in [63usize, 65] {
            let err = verify_ed25519(&sample(), &b64_of_len(len), PUBLIC_KEY).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SignatureFormat, "length {len}");
        }
    }

    #[test]
    fn test_bad_base64_rejected() {
        let signature = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();

        let err = verify_ed25519(&sample(), &signature, "not base64!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormat);

        let err = verify_ed25519(&sample(), "***", PUBLIC_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureFormat);

        let err = sign_ed25519(&sample(), "%%%").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormat);
    }

    #[test]
    fn test_seed_only_private_key_rejected() {
        let raw = STANDARD.decode(PRIVATE_KEY).unwrap();
        let seed = STANDARD.encode(&raw[..32]);
        let err = sign_ed25519(&sample(), &seed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormat);
    }

    #[test]
    fn test_mismatched_public_half_rejected() {
        let mut raw = STANDARD.decode(PRIVATE_KEY).unwrap();
        let other = STANDARD.decode(RFC_PUBLIC_KEY).unwrap();
        raw[32..].copy_from_slice(&other);
        let err = sign_ed25519(&sample(), &STANDARD.encode(raw)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormat);
    }

    #[test]
    fn test_public_key_from_private() {
        assert_eq!(public_key_from_private(PRIVATE_KEY).unwrap(), PUBLIC_KEY);
        assert_eq!(
            public_key_from_private(RFC_KEYPAIR).unwrap(),
            RFC_PUBLIC_KEY
        );
    }

    #[test]
    fn test_loose_and_typed_payloads_share_signature() {
        let typed = sign_ed25519(&sample(), PRIVATE_KEY).unwrap();
        let loose = sign_ed25519(&Payload::from(sample()), PRIVATE_KEY).unwrap();
        assert_eq!(typed, loose);
    }
}
