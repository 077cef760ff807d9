use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{SbxError, SbxResult};

/// Top-level configuration (loaded from strongbox.toml)
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SbxConfig {
    pub cipher: CipherConfig,
    pub hash: HashConfig,
    pub logging: LoggingConfig,
    /// Warn if a config file holding keys is readable by others (default: true)
    pub config_file_mode_check: bool,
}

impl Default for SbxConfig {
    fn default() -> Self {
        Self {
            cipher: CipherConfig::default(),
            hash: HashConfig::default(),
            logging: LoggingConfig::default(),
            config_file_mode_check: true,
        }
    }
}

/// Reversible cipher selection and key material
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub algorithm: CipherAlgorithm,
    /// 32 single-byte characters; AES-256 key
    pub crypt_key: Option<SecretString>,
    /// 32 single-byte characters; HMAC-SHA256 key, independent of `crypt_key`
    pub auth_key: Option<SecretString>,
    /// Bound into the MAC but not encrypted (default: empty)
    pub associated_data: String,
}

/// One-way hash selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    pub algorithm: HashAlgorithm,
    /// bcrypt cost, 4..=31 (default: 10)
    pub bcrypt_work_factor: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            bcrypt_work_factor: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    /// Pass-through, no encryption
    #[serde(rename = "echo")]
    Echo,
    /// AES-256-CBC + HMAC-SHA256 envelope
    #[default]
    #[serde(rename = "aes256-hmac")]
    Aes256Hmac,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    #[default]
    Sha256,
    Sha512,
    Bcrypt,
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherAlgorithm::Echo => f.write_str("echo"),
            CipherAlgorithm::Aes256Hmac => f.write_str("aes256-hmac"),
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = SbxError;

    fn from_str(s: &str) -> SbxResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "echo" => Ok(CipherAlgorithm::Echo),
            "aes256-hmac" => Ok(CipherAlgorithm::Aes256Hmac),
            other => Err(SbxError::InvalidArgument(format!(
                "unknown cipher algorithm: {other}"
            ))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Bcrypt => "bcrypt",
        };
        f.write_str(name)
    }
}

impl FromStr for HashAlgorithm {
    type Err = SbxError;

    fn from_str(s: &str) -> SbxResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "bcrypt" => Ok(HashAlgorithm::Bcrypt),
            other => Err(SbxError::InvalidArgument(format!(
                "unknown hash algorithm: {other}"
            ))),
        }
    }
}

impl SbxConfig {
    /// Load from a TOML file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> SbxResult<Self> {
        if !path.exists() {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| SbxError::Config(format!("parsing config {}: {e}", path.display())))
    }

    pub fn from_toml(content: &str) -> SbxResult<Self> {
        toml::from_str(content).map_err(|e| SbxError::Config(e.to_string()))
    }

    /// Replace configured keys with externally supplied ones (e.g. env vars).
    pub fn with_key_overrides(
        mut self,
        crypt_key: Option<String>,
        auth_key: Option<String>,
    ) -> Self {
        if let Some(key) = crypt_key {
            self.cipher.crypt_key = Some(SecretString::from(key));
        }
        if let Some(key) = auth_key {
            self.cipher.auth_key = Some(SecretString::from(key));
        }
        self
    }
}

/// TOML-shaped rendering with key material redacted.
impl fmt::Display for SbxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &Option<SecretString>) -> &'static str {
            if key.is_some() {
                "\"[REDACTED]\""
            } else {
                "\"[unset]\""
            }
        }

        writeln!(f, "config_file_mode_check = {}", self.config_file_mode_check)?;
        writeln!(f)?;
        writeln!(f, "[cipher]")?;
        writeln!(f, "algorithm = \"{}\"", self.cipher.algorithm)?;
        writeln!(f, "crypt_key = {}", redact(&self.cipher.crypt_key))?;
        writeln!(f, "auth_key = {}", redact(&self.cipher.auth_key))?;
        writeln!(f, "associated_data = {:?}", self.cipher.associated_data)?;
        writeln!(f)?;
        writeln!(f, "[hash]")?;
        writeln!(f, "algorithm = \"{}\"", self.hash.algorithm)?;
        writeln!(f, "bcrypt_work_factor = {}", self.hash.bcrypt_work_factor)?;
        writeln!(f)?;
        writeln!(f, "[logging]")?;
        writeln!(f, "level = {:?}", self.logging.level)?;
        write!(f, "format = {:?}", self.logging.format)
    }
}
