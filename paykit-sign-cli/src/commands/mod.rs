//! CLI command implementations

use anyhow::{Context, Result};
use paykit_sign::{Payload, PaymentPayload};
use std::path::Path;

pub mod canonicalize;
pub mod sign;
pub mod verify;

/// Exit status when a well-formed signature does not match.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit status for malformed input or missing configuration.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Read a file as UTF-8 text, byte for byte.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Build the message to sign: a JSON object from `from_json` when given,
/// otherwise the payment fields.
pub fn load_message(
    from_json: Option<&Path>,
    payment: impl FnOnce() -> PaymentPayload,
) -> Result<Payload> {
    match from_json {
        Some(path) => {
            let text = read_file(path)?;
            let payload = Payload::from_json_str(&text)
                .with_context(|| format!("cannot sign {}", path.display()))?;
            tracing::debug!(fields = payload.len(), path = %path.display(), "loaded JSON payload");
            Ok(payload)
        }
        None => Ok(Payload::from(payment())),
    }
}
