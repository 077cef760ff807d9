//! Pass-through cipher for deployments that run with encryption switched off

use sbx_core::SbxResult;

use crate::provider::{CryptProvider, DecryptProvider};

/// Returns its input unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCipher;

impl CryptProvider for EchoCipher {
    fn crypt(&self, clear_text: &str) -> SbxResult<String> {
        Ok(clear_text.to_owned())
    }
}

impl DecryptProvider for EchoCipher {
    fn decrypt(&self, cipher_text: &str) -> SbxResult<String> {
        Ok(cipher_text.to_owned())
    }
}
