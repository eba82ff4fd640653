//! # Canonical Payload Encoding
//!
//! Signer and verifier must feed byte-identical input to the primitives, so
//! every payload goes through exactly one encoding routine:
//!
//! - a single JSON object with no whitespace
//! - keys in byte order of the UTF-8 field name
//! - integers in minimal decimal form
//! - strings escaped as JSON: `"` and `\`, short escapes for
//!   `\b \f \n \r \t`, `\u00xx` for other control characters, everything
//!   else emitted as raw UTF-8
//!
//! Both the HMAC and the Ed25519 engines call into this module.

use crate::errors::{Result, SigningError};
use crate::payload::{Payload, PaymentPayload, ValueRef};
use std::borrow::Cow;

/// Types with a canonical byte form.
pub trait Canonical {
    /// Deterministic encoding of `self`.
    fn canonical_bytes(&self) -> Result<Vec<u8>>;
}

impl Canonical for Payload {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        encode_object(self.iter().map(|(name, value)| (name, value.borrowed())))
    }
}

impl Canonical for PaymentPayload {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        encode_object(self.canonical_fields())
    }
}

/// Canonicalize a loosely typed payload.
pub fn canonicalize(payload: &Payload) -> Result<Vec<u8>> {
    payload.canonical_bytes()
}

/// Canonicalize a payment message.
pub fn canonicalize_payment(payload: &PaymentPayload) -> Result<Vec<u8>> {
    payload.canonical_bytes()
}

/// Canonicalize raw JSON.
///
/// # Errors
///
/// Returns [`SigningError::Encoding`] when `value` is not an object of
/// string and integer members.
pub fn canonicalize_json(value: &serde_json::Value) -> Result<Vec<u8>> {
    Payload::from_json(value)?.canonical_bytes()
}

/// Input to a verification: either a payload to canonicalize, or canonical
/// bytes exactly as they were transmitted.
///
/// `Message` is `Send + Sync`, so a borrowed payload can be verified from
/// any thread.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    Payload(&'a (dyn Canonical + Sync)),
    Canonical(&'a [u8]),
}

impl<'a> Message<'a> {
    /// Bytes handed to the primitive. Transmitted blobs are used verbatim.
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>> {
        match *self {
            Self::Payload(payload) => payload.canonical_bytes().map(Cow::Owned),
            Self::Canonical(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl std::fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload(_) => f.write_str("Message::Payload(..)"),
            Self::Canonical(bytes) => write!(f, "Message::Canonical({} bytes)", bytes.len()),
        }
    }
}

impl<'a> From<&'a Payload> for Message<'a> {
    fn from(payload: &'a Payload) -> Self {
        Self::Payload(payload)
    }
}

impl<'a> From<&'a PaymentPayload> for Message<'a> {
    fn from(payload: &'a PaymentPayload) -> Self {
        Self::Payload(payload)
    }
}

impl<'a> From<&'a [u8]> for Message<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Canonical(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Message<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Canonical(bytes)
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Self::Canonical(text.as_bytes())
    }
}

fn encode_object<'a, I>(fields: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, ValueRef<'a>)>,
{
    let mut out = Vec::with_capacity(256);
    out.push(b'{');
    for (i, (name, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        write_json(&mut out, name, name)?;
        out.push(b':');
        match value {
            ValueRef::Str(s) => write_json(&mut out, name, s)?,
            ValueRef::Int(n) => write_json(&mut out, name, &n)?,
        }
    }
    out.push(b'}');
    Ok(out)
}

// serde_json's compact writer emits the escaping rules documented above
fn write_json<T>(out: &mut Vec<u8>, field: &str, value: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer(&mut *out, value)
        .map_err(|e| SigningError::encoding(field, e.to_string()))
}
