//! Canonicalize command - print the exact bytes that get signed

use anyhow::Result;
use paykit_sign::{canonicalize, Payload};
use std::process::ExitCode;

pub fn run(payload: &Payload) -> Result<ExitCode> {
    let canonical = canonicalize(payload)?;
    println!("{}", String::from_utf8_lossy(&canonical));
    Ok(ExitCode::SUCCESS)
}
