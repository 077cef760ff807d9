//! Capability traits shared by every provider

use sbx_core::SbxResult;

/// Reversible encryption: clear text → cipher text.
pub trait CryptProvider: Send + Sync {
    fn crypt(&self, clear_text: &str) -> SbxResult<String>;
}

/// Reversible decryption: cipher text → clear text.
pub trait DecryptProvider: Send + Sync {
    fn decrypt(&self, cipher_text: &str) -> SbxResult<String>;
}

/// A cipher usable in both directions.
pub trait CryptDecryptProvider: CryptProvider + DecryptProvider {}

impl<T: CryptProvider + DecryptProvider + ?Sized> CryptDecryptProvider for T {}

/// One-way hash: clear text → hash text.
pub trait HashProvider: Send + Sync {
    fn hash(&self, clear_text: &str) -> SbxResult<String>;
}

/// Check clear text against a previously produced hash text.
pub trait HashVerifyProvider: Send + Sync {
    fn verify(&self, clear_text: &str, hash_text: &str) -> SbxResult<bool>;
}

/// Bounded pseudo-random numbers. Upper bounds are exclusive.
pub trait RandomNumberGenerator: Send + Sync {
    /// `0 <= x < i32::MAX`
    fn next_int(&self) -> i32;

    /// `0 <= x < max`; zero when `max == 0`
    fn next_int_below(&self, max: i32) -> SbxResult<i32>;

    /// `min <= x < max`; `min` when both are equal
    fn next_int_between(&self, min: i32, max: i32) -> SbxResult<i32>;

    /// `0.0 <= x < 1.0`
    fn next_double(&self) -> f64;

    /// `0.0 <= x < max`
    fn next_double_below(&self, max: f64) -> SbxResult<f64>;

    /// `min <= x < max`
    fn next_double_between(&self, min: f64, max: f64) -> SbxResult<f64>;
}
