use thiserror::Error;

pub type SbxResult<T> = Result<T, SbxError>;

#[derive(Debug, Error)]
pub enum SbxError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{name} must be {expected} single-byte characters (got {actual} bytes)")]
    InvalidKeyLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Tag mismatch, truncated envelope, or bad padding under a valid tag.
    /// Carries no detail on purpose.
    #[error("authentication failed: ciphertext cannot be trusted")]
    AuthenticationFailed,

    #[error("hash error: {0}")]
    Hash(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SbxError {
    /// True for failures that mean "do not trust this ciphertext".
    ///
    /// Callers should handle malformed transport text and authentication
    /// failures the same way, so both report true here.
    pub fn is_untrusted(&self) -> bool {
        matches!(
            self,
            SbxError::AuthenticationFailed | SbxError::MalformedInput(_)
        )
    }
}
