//! Verify command - check a signature over a transmitted payload

use anyhow::Result;
use paykit_sign::{KeyConfig, PayloadSigner, SignatureScheme};
use std::process::ExitCode;

use super::{sign::label, EXIT_MISMATCH};
use crate::ui;

pub fn run(
    transmitted: &str,
    signature: &str,
    scheme: SignatureScheme,
    keys: &KeyConfig,
    verbose: bool,
) -> Result<ExitCode> {
    ui::info(&format!("Verifying {} signature...", scheme));
    if verbose {
        ui::info(&format!("Signature: {}", signature));
        ui::info(&format!("Payload: {}", transmitted));
    }

    let signer = PayloadSigner::new(scheme, keys.clone());
    if signer.verify(transmitted, signature)? {
        ui::success(&format!("{} signature verified successfully", label(scheme)));
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::debug!(%scheme, payload_len = transmitted.len(), "signature mismatch");
        ui::error(&format!("{} signature verification failed", label(scheme)));
        Ok(ExitCode::from(EXIT_MISMATCH))
    }
}
