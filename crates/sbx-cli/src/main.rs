//! sbx: strongbox command-line interface
//!
//! Commands:
//!   encrypt [TEXT]             - seal TEXT (or stdin) with the configured cipher
//!   decrypt [TEXT]             - open an envelope produced by `encrypt`
//!   hash [TEXT]                - one-way hash with the configured algorithm
//!   verify TEXT HASH           - check TEXT against HASH (exit 1 on mismatch)
//!   random int|float           - bounded random numbers
//!   config show                - display the active configuration, keys redacted

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};

use sbx_core::config::{HashAlgorithm, HashConfig, SbxConfig};
use sbx_crypto::{
    cipher_from_config, hasher_from_config, verifier_from_config, RandomNumberGenerator, SbxResult,
    SystemRng,
};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "sbx",
    version,
    about = "strongbox: authenticated encryption, hashing and random numbers",
    long_about = "sbx: encrypt and decrypt values with AES-256-CBC + HMAC-SHA256, \
                  hash and verify text, and draw random numbers"
)]
struct Cli {
    /// Path to strongbox.toml configuration file
    #[arg(long, short = 'c', env = "SBX_CONFIG", default_value = "strongbox.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides [logging].level
    #[arg(long, env = "SBX_LOG")]
    log: Option<String>,

    /// Log format; overrides [logging].format
    #[arg(long, env = "SBX_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Encryption key (32 single-byte characters); overrides [cipher].crypt_key
    #[arg(long, env = "SBX_CRYPT_KEY", hide_env_values = true)]
    crypt_key: Option<String>,

    /// Authentication key (32 single-byte characters); overrides [cipher].auth_key
    #[arg(long, env = "SBX_AUTH_KEY", hide_env_values = true)]
    auth_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt text into a Base64 envelope
    Encrypt {
        /// Clear text (read from stdin if omitted)
        text: Option<String>,
    },

    /// Decrypt a Base64 envelope
    Decrypt {
        /// Envelope text (read from stdin if omitted)
        text: Option<String>,
    },

    /// Hash text with a one-way algorithm
    Hash {
        /// Clear text (read from stdin if omitted)
        text: Option<String>,
        /// Hash algorithm (md5, sha256, sha512, bcrypt); overrides [hash].algorithm
        #[arg(long, short = 'a')]
        algorithm: Option<HashAlgorithm>,
    },

    /// Verify text against a previously computed hash
    ///
    /// Exits with status 1 when the hash does not match.
    Verify {
        /// Clear text
        text: String,
        /// Hash to check against
        hash: String,
        /// Hash algorithm (md5, sha256, sha512, bcrypt); overrides [hash].algorithm
        #[arg(long, short = 'a')]
        algorithm: Option<HashAlgorithm>,
    },

    /// Draw a random number
    Random {
        #[command(subcommand)]
        kind: RandomKind,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum RandomKind {
    /// Integer in [min, max); defaults to [0, i32::MAX)
    Int {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i32>,
    },
    /// Float in [min, max); defaults to [0, 1)
    Float {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let level = cli.log.clone().unwrap_or_else(|| config.logging.level.clone());
    let format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| log_format_from_config(&config.logging.format));
    init_logging(&level, &format);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "sbx starting"
    );
    if config.config_file_mode_check {
        check_config_mode(&cli.config, &config);
    }

    let config = config.with_key_overrides(cli.crypt_key, cli.auth_key);

    match cli.command {
        Commands::Encrypt { text } => cmd_encrypt(&config, text),
        Commands::Decrypt { text } => cmd_decrypt(&config, text),
        Commands::Hash { text, algorithm } => cmd_hash(&config, text, algorithm),
        Commands::Verify {
            text,
            hash,
            algorithm,
        } => cmd_verify(&config, &text, &hash, algorithm),
        Commands::Random { kind } => cmd_random(&SystemRng::new(), kind),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn log_format_from_config(format: &str) -> LogFormat {
    if format.eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}

fn load_config(path: &Path) -> Result<SbxConfig> {
    SbxConfig::load(path).with_context(|| format!("loading config: {}", path.display()))
}

/// Warn when a config file that holds keys is readable by group or others.
#[cfg(unix)]
fn check_config_mode(path: &Path, config: &SbxConfig) {
    use std::os::unix::fs::PermissionsExt;

    if config.cipher.crypt_key.is_none() && config.cipher.auth_key.is_none() {
        return;
    }
    if let Ok(meta) = std::fs::metadata(path) {
        let mode = meta.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                "config file {} holds keys but has mode {:o}; consider chmod 600",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn check_config_mode(_path: &Path, _config: &SbxConfig) {}

/// Use the argument if given, otherwise stdin with one trailing newline removed.
fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(strip_trailing_newline(buf))
        }
    }
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn hash_config(config: &SbxConfig, algorithm: Option<HashAlgorithm>) -> HashConfig {
    let mut hash = config.hash.clone();
    if let Some(algorithm) = algorithm {
        hash.algorithm = algorithm;
    }
    hash
}

// ── `sbx encrypt` / `sbx decrypt` ─────────────────────────────────────────────

fn cmd_encrypt(config: &SbxConfig, text: Option<String>) -> Result<ExitCode> {
    let cipher = cipher_from_config(&config.cipher).context("building cipher")?;
    let clear_text = read_input(text)?;
    let cipher_text = cipher.crypt(&clear_text).context("encrypt")?;
    println!("{cipher_text}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_decrypt(config: &SbxConfig, text: Option<String>) -> Result<ExitCode> {
    let cipher = cipher_from_config(&config.cipher).context("building cipher")?;
    let cipher_text = read_input(text)?;
    let clear_text = cipher.decrypt(cipher_text.trim()).context("decrypt")?;
    println!("{clear_text}");
    Ok(ExitCode::SUCCESS)
}

// ── `sbx hash` / `sbx verify` ─────────────────────────────────────────────────

fn cmd_hash(
    config: &SbxConfig,
    text: Option<String>,
    algorithm: Option<HashAlgorithm>,
) -> Result<ExitCode> {
    let hasher = hasher_from_config(&hash_config(config, algorithm)).context("building hasher")?;
    let clear_text = read_input(text)?;
    println!("{}", hasher.hash(&clear_text).context("hash")?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(
    config: &SbxConfig,
    text: &str,
    hash: &str,
    algorithm: Option<HashAlgorithm>,
) -> Result<ExitCode> {
    let verifier = verifier_from_config(&hash_config(config, algorithm));
    if verifier.verify(text, hash).context("verify")? {
        println!("match");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("mismatch");
        Ok(ExitCode::from(1))
    }
}

// ── `sbx random` ──────────────────────────────────────────────────────────────

fn cmd_random(rng: &dyn RandomNumberGenerator, kind: RandomKind) -> Result<ExitCode> {
    match kind {
        RandomKind::Int { min, max } => println!("{}", draw_int(rng, min, max)?),
        RandomKind::Float { min, max } => println!("{}", draw_float(rng, min, max)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn draw_int(
    rng: &dyn RandomNumberGenerator,
    min: Option<i32>,
    max: Option<i32>,
) -> SbxResult<i32> {
    match (min, max) {
        (None, None) => Ok(rng.next_int()),
        (None, Some(max)) => rng.next_int_below(max),
        (Some(min), max) => rng.next_int_between(min, max.unwrap_or(i32::MAX)),
    }
}

fn draw_float(
    rng: &dyn RandomNumberGenerator,
    min: Option<f64>,
    max: Option<f64>,
) -> SbxResult<f64> {
    match (min, max) {
        (None, None) => Ok(rng.next_double()),
        (None, Some(max)) => rng.next_double_below(max),
        (Some(min), max) => rng.next_double_between(min, max.unwrap_or(1.0_f64.max(min))),
    }
}

// ── `sbx config show` ─────────────────────────────────────────────────────────

fn cmd_config_show(config: &SbxConfig, config_path: &Path) -> Result<ExitCode> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!(
            "# Configuration: defaults (no file at {})",
            config_path.display()
        );
    }
    println!();
    println!("{config}");
    Ok(ExitCode::SUCCESS)
}
