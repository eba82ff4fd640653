//! Sign command - sign a payload under one or all configured schemes

use anyhow::{bail, Result};
use paykit_sign::{canonicalize, KeyConfig, Payload, PayloadSigner, SignatureScheme};
use std::process::ExitCode;

use crate::ui;

pub fn run(
    payload: &Payload,
    scheme: Option<SignatureScheme>,
    keys: &KeyConfig,
    verbose: bool,
) -> Result<ExitCode> {
    let canonical = String::from_utf8(canonicalize(payload)?)?;
    if verbose {
        ui::info(&format!("Payload: {}", canonical));
    }

    match scheme {
        Some(scheme) => {
            let signature = PayloadSigner::new(scheme, keys.clone()).sign(payload)?;
            ui::success(&format!("{} signature: {}", label(scheme), signature));
            ui::export("SIGNATURE", &signature);
            ui::export("PAYLOAD", &canonical);
        }
        None => {
            let schemes = keys.signing_schemes();
            if schemes.is_empty() {
                bail!("no signing key configured (set HMAC_SECRET or ED25519_PRIVATE_KEY)");
            }
            for scheme in schemes {
                let signature = PayloadSigner::new(scheme, keys.clone()).sign(payload)?;
                ui::success(&format!("{} signature: {}", label(scheme), signature));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn label(scheme: SignatureScheme) -> &'static str {
    match scheme {
        SignatureScheme::Hmac => "HMAC",
        SignatureScheme::Ed25519 => "Ed25519",
    }
}
