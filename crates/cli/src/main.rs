//! SES SMTP password CLI
//!
//! Prints the SMTP password derived from a secret access key.
//!
//! # Usage
//!
//! ```bash
//! # Secret from the environment
//! AWS_SECRET_ACCESS_KEY=... ses-smtp-password --region eu-west-1
//!
//! # Secret from standard input
//! printf '%s' "$SECRET" | ses-smtp-password --region eu-west-1 --stdin
//!
//! # Full mail-client settings
//! ses-smtp-password --region eu-west-1 --access-key-id AKIA... --format json
//!
//! # Supported regions
//! ses-smtp-password list-regions
//! ```
//!
//! # Environment Variables
//!
//! - `AWS_SECRET_ACCESS_KEY` - Secret access key (never accepted as an argument)
//! - `AWS_REGION` - Region, when `--region` is not given
//! - `AWS_ACCESS_KEY_ID` - Access key id, when `--access-key-id` is not given
//! - `RUST_LOG` - Diagnostic verbosity (written to stderr)
//!
//! Only the result is written to stdout. A non-zero exit code signals failure.

use clap::{Parser, Subcommand, ValueEnum};
use ses_smtp_credential::{derive_checked, supported_regions, DerivationError, SmtpCredentials};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zeroize::Zeroizing;

const SECRET_ENV: &str = "AWS_SECRET_ACCESS_KEY";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ses-smtp-password")]
#[command(about = "Derive the SES SMTP password for a secret access key")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Region of the SMTP endpoint
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Read the secret access key from stdin instead of AWS_SECRET_ACCESS_KEY
    #[arg(long)]
    stdin: bool,

    /// Access key id used as the SMTP username
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    access_key_id: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Password)]
    format: OutputFormat,

    /// Log diagnostics at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List the regions an SMTP password can be derived for
    ListRegions,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    /// The password alone
    Password,
    /// Username, password, endpoint and ports as JSON
    Json,
    /// SMTP_* lines for an env file
    Env,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
enum CliError {
    #[error("no region given; pass --region or set AWS_REGION")]
    MissingRegion,

    #[error("no secret access key; set AWS_SECRET_ACCESS_KEY or pass --stdin")]
    MissingSecret,

    #[error("this format needs --access-key-id or AWS_ACCESS_KEY_ID")]
    MissingAccessKeyId,

    #[error("failed to read secret: {0}")]
    Io(#[from] io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

// ============================================================================
// Secret Input
// ============================================================================

/// Read the secret from the first line of `reader`, without its line ending
fn read_secret_line<R: BufRead>(mut reader: R) -> Result<Zeroizing<String>, CliError> {
    let mut line = Zeroizing::new(String::new());
    reader.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    if line.is_empty() {
        return Err(CliError::MissingSecret);
    }
    Ok(line)
}

fn read_secret(from_stdin: bool) -> Result<Zeroizing<String>, CliError> {
    if from_stdin {
        debug!("reading secret access key from stdin");
        return read_secret_line(io::stdin().lock());
    }
    match std::env::var(SECRET_ENV) {
        Ok(value) if !value.is_empty() => Ok(Zeroizing::new(value)),
        _ => Err(CliError::MissingSecret),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn render(cli: &Cli, secret: &[u8], region: &str) -> Result<String, CliError> {
    if cli.format == OutputFormat::Password {
        let password = derive_checked(secret, region)?;
        return Ok(format!("{}\n", password.as_str()));
    }

    let access_key_id = cli
        .access_key_id
        .as_deref()
        .ok_or(CliError::MissingAccessKeyId)?;
    let creds = SmtpCredentials::derive(access_key_id, secret, region)?;
    match cli.format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&creds)?)),
        _ => Ok(creds.to_env_lines()),
    }
}

fn run(cli: &Cli) -> Result<Zeroizing<String>, CliError> {
    if cli.command == Some(Commands::ListRegions) {
        let list: String = supported_regions().map(|r| format!("{}\n", r)).collect();
        return Ok(Zeroizing::new(list));
    }

    let region = cli.region.as_deref().ok_or(CliError::MissingRegion)?;
    let secret = read_secret(cli.stdin)?;
    let output = render(cli, secret.as_bytes(), region)?;
    debug!(region, format = ?cli.format, "derivation complete");
    Ok(Zeroizing::new(output))
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    match run(&cli) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                error!("failed to write output: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if let CliError::Derivation(inner) = &e {
                if let Some(hint) = inner.suggestion() {
                    eprintln!("hint: {}", hint);
                }
            }
            ExitCode::FAILURE
        }
    }
}
