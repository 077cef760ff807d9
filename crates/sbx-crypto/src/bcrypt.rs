//! bcrypt password hashing and verification
//!
//! Hashes are emitted with the `$2a$` prefix so they interoperate with
//! existing stored hashes; verification accepts `$2a$`, `$2b$` and `$2y$`.

use ::bcrypt::Version;
use sbx_core::{SbxError, SbxResult};

use crate::provider::{HashProvider, HashVerifyProvider};

pub const MIN_WORK_FACTOR: u32 = 4;
pub const MAX_WORK_FACTOR: u32 = 31;

/// bcrypt with a fixed work factor (log2 of the round count).
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    work_factor: u32,
}

impl BcryptHasher {
    pub fn new(work_factor: u32) -> SbxResult<Self> {
        if !(MIN_WORK_FACTOR..=MAX_WORK_FACTOR).contains(&work_factor) {
            return Err(SbxError::InvalidArgument(format!(
                "bcrypt work factor must be within {MIN_WORK_FACTOR}..={MAX_WORK_FACTOR} (got {work_factor})"
            )));
        }
        Ok(Self { work_factor })
    }

    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }
}

impl HashProvider for BcryptHasher {
    fn hash(&self, clear_text: &str) -> SbxResult<String> {
        let parts = ::bcrypt::hash_with_result(clear_text, self.work_factor)
            .map_err(|e| SbxError::Hash(e.to_string()))?;
        Ok(parts.format_for_version(Version::TwoA))
    }
}

impl HashVerifyProvider for BcryptHasher {
    fn verify(&self, clear_text: &str, hash_text: &str) -> SbxResult<bool> {
        BcryptVerifier.verify(clear_text, hash_text)
    }
}

/// Verifies against any bcrypt hash; the cost is read from the hash itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptVerifier;

impl HashVerifyProvider for BcryptVerifier {
    /// A hash string that is not bcrypt at all is malformed input, not a mismatch.
    fn verify(&self, clear_text: &str, hash_text: &str) -> SbxResult<bool> {
        ::bcrypt::verify(clear_text, hash_text)
            .map_err(|e| SbxError::MalformedInput(format!("bcrypt hash: {e}")))
    }
}
