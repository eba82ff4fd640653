//! Paykit Sign CLI
//!
//! Signs payment payloads and verifies transmitted signatures. Key material
//! and payload fields come from flags, falling back to environment variables.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use paykit_sign::{KeyConfig, PaymentPayload, SignatureScheme, SigningError};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "paykit-sign")]
#[command(about = "Sign and verify Paykit payment payloads (HMAC-SHA256, Ed25519)")]
#[command(long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a payload (all configured schemes when none is given)
    Sign {
        /// Signature scheme: hmac or ed25519
        scheme: Option<SignatureScheme>,

        #[command(flatten)]
        payload: PayloadArgs,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Verify a signature over a transmitted payload
    Verify {
        /// Signature to check (hex for hmac, base64 for ed25519)
        #[arg(long, env = "SIGNATURE")]
        signature: String,

        /// Canonical payload exactly as transmitted
        #[arg(long, env = "PAYLOAD")]
        payload: Option<String>,

        /// Read the transmitted payload from a file (takes precedence over --payload)
        #[arg(long, value_name = "FILE")]
        payload_file: Option<PathBuf>,

        /// Signature scheme: hmac or ed25519
        #[arg(long, env = "SIGNATURE_TYPE", default_value = "ed25519")]
        scheme: SignatureScheme,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Print the canonical form of a payload
    Canonicalize {
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

/// Payment payload fields.
#[derive(Args)]
struct PayloadArgs {
    /// Sign an arbitrary JSON object read from a file instead of the payment fields
    #[arg(long, value_name = "FILE")]
    from_json: Option<PathBuf>,

    #[arg(long, env = "APP_CODE", default_value = "")]
    app_code: String,

    #[arg(long, env = "MERCHANT_CODE", default_value = "")]
    merchant_code: String,

    #[arg(long, env = "MERCHANT_REFERENCE", default_value = "")]
    merchant_reference: String,

    #[arg(long, env = "TITLE", default_value = "")]
    title: String,

    /// Amount in minor currency units
    #[arg(long, env = "TOTAL_AMOUNT", default_value_t = 0, allow_negative_numbers = true)]
    total_amount: i64,

    #[arg(long, env = "CURRENCY", default_value = "")]
    currency: String,

    #[arg(long, env = "CREDIT_ACCOUNT_NUMBER", default_value = "")]
    credit_account_number: String,
}

impl PayloadArgs {
    fn to_payment(&self) -> PaymentPayload {
        PaymentPayload::new(
            self.app_code.as_str(),
            self.merchant_code.as_str(),
            self.merchant_reference.as_str(),
            self.total_amount,
            self.currency.as_str(),
        )
        .with_title(self.title.as_str())
        .with_credit_account_number(self.credit_account_number.as_str())
    }
}

/// Key material for both schemes.
#[derive(Args)]
struct KeyArgs {
    /// Shared HMAC secret
    #[arg(long, env = "HMAC_SECRET", hide_env_values = true)]
    hmac_secret: Option<String>,

    /// Ed25519 private key (base64, 64 bytes: seed followed by public key)
    #[arg(long, env = "ED25519_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Ed25519 public key (base64, 32 bytes)
    #[arg(long, env = "ED25519_PUBLIC_KEY")]
    public_key: Option<String>,
}

impl From<KeyArgs> for KeyConfig {
    fn from(args: KeyArgs) -> Self {
        let mut config = KeyConfig::default();
        if let Some(secret) = args.hmac_secret {
            config = config.with_hmac_secret(secret);
        }
        if let Some(key) = args.private_key {
            config = config.with_ed25519_private_key(key);
        }
        if let Some(key) = args.public_key {
            config = config.with_ed25519_public_key(key);
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "paykit_sign_cli=debug,paykit_sign=debug"
    } else {
        "paykit_sign_cli=warn,paykit_sign=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Sign {
            scheme,
            payload,
            keys,
        } => {
            let from_json = payload.from_json.as_deref();
            let message = commands::load_message(from_json, || payload.to_payment())?;
            commands::sign::run(&message, scheme, &keys.into(), cli.verbose)
        }
        Commands::Verify {
            signature,
            payload,
            payload_file,
            scheme,
            keys,
        } => {
            let transmitted = match (payload_file, payload) {
                (Some(path), _) => commands::read_file(&path)?,
                (None, Some(text)) => text,
                (None, None) => {
                    anyhow::bail!("no payload given (use --payload, PAYLOAD or --payload-file)")
                }
            };
            commands::verify::run(&transmitted, &signature, scheme, &keys.into(), cli.verbose)
        }
        Commands::Canonicalize { payload } => {
            let from_json = payload.from_json.as_deref();
            let message = commands::load_message(from_json, || payload.to_payment())?;
            commands::canonicalize::run(&message)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error(&format!("{:#}", err));
            if let Some(signing) = err.downcast_ref::<SigningError>() {
                let kind = signing.kind();
                ui::key_value("kind", kind.as_str());
                ui::key_value("code", &kind.code().to_string());
            }
            ExitCode::from(commands::EXIT_INVALID_INPUT)
        }
    }
}
