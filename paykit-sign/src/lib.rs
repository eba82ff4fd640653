//! # Paykit Payload Signing
//!
//! Authenticates payment transaction messages exchanged between a payment
//! initiator and a payment processor.
//!
//! Every payload is first turned into canonical bytes (sorted-key compact
//! JSON, see [`canonical`]), then signed under one of two schemes:
//!
//! - **HMAC-SHA256** with a shared secret, lowercase hex tag
//! - **Ed25519** with a key pair, base64 signature
//!
//! ## Verification results
//!
//! Verification distinguishes "the signature is wrong" from "the signature
//! cannot be checked":
//!
//! - `Ok(true)`: valid
//! - `Ok(false)`: well-formed but does not match (tampering or stale key)
//! - `Err(_)`: malformed signature, key or payload (configuration bug)
//!
//! All operations are pure and synchronous; nothing here reads the
//! environment, logs errors or retries.
//!
//! # Example
//!
//! ```rust
//! use paykit_sign::{sign, verify, PaymentPayload, SignatureScheme};
//!
//! let payload = PaymentPayload::new("015489", "MINIMRC-7914388979", "txn-2345", 5, "ETB")
//!     .with_title("Order 2345");
//!
//! let signature = sign(&payload, SignatureScheme::Hmac, "shared-secret")?;
//! assert!(verify(&payload, &signature, SignatureScheme::Hmac, "shared-secret")?);
//! # Ok::<(), paykit_sign::SigningError>(())
//! ```

pub mod canonical;
pub mod config;
pub mod ed25519;
pub mod errors;
pub mod hmac_sha256;
pub mod payload;
pub mod scheme;

pub use canonical::{canonicalize, canonicalize_json, canonicalize_payment, Canonical, Message};
pub use config::{KeyConfig, SecretString};
pub use ed25519::{public_key_from_private, sign_ed25519, sign_ed25519_bytes, verify_ed25519};
pub use errors::{ErrorKind, Result, SigningError};
pub use hmac_sha256::{hmac_tag, sign_hmac, sign_hmac_bytes, verify_hmac};
pub use payload::{FieldValue, Payload, PaymentPayload};
pub use scheme::{sign, verify, PayloadSigner, SignatureScheme};
