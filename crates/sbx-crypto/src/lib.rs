//! sbx-crypto: interchangeable string-oriented cryptographic providers
//!
//! Every provider sits behind a small capability trait so call sites can swap
//! algorithms without changing:
//!
//! ```text
//! CryptProvider / DecryptProvider   EchoCipher, AesHmacEnvelope
//! HashProvider                      Md5Hasher, Sha256Hasher, Sha512Hasher, BcryptHasher
//! HashVerifyProvider                digest hashers (re-hash + compare), BcryptVerifier
//! RandomNumberGenerator             SystemRng
//! ```
//!
//! The AES-256-CBC + HMAC-SHA256 envelope (encrypt-then-MAC):
//! ```text
//! [associated data][16 bytes: IV][N bytes: ciphertext, PKCS#7][32 bytes: HMAC tag]
//! tag = HMAC-SHA256(auth_key, associated data || IV || ciphertext)
//! ```
//! The tag is checked in constant time before any decryption is attempted.

pub mod bcrypt;
pub mod digest;
pub mod echo;
pub mod envelope;
pub mod factory;
pub mod keys;
pub mod layout;
pub mod provider;
pub mod rng;

pub use self::bcrypt::{BcryptHasher, BcryptVerifier};
pub use self::digest::{DigestHasher, Md5Hasher, Sha256Hasher, Sha512Hasher};
pub use echo::EchoCipher;
pub use envelope::AesHmacEnvelope;
pub use factory::{cipher_from_config, hasher_from_config, verifier_from_config};
pub use keys::{KeyMaterial, KeyPair};
pub use provider::{
    CryptDecryptProvider, CryptProvider, DecryptProvider, HashProvider, HashVerifyProvider,
    RandomNumberGenerator,
};
pub use rng::SystemRng;
pub use sbx_core::{SbxError, SbxResult};

/// Size of the cipher key and of the MAC key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-CBC initialization vector (one 128-bit block)
pub const IV_SIZE: usize = 16;

/// Size of an HMAC-SHA256 authentication tag
pub const TAG_SIZE: usize = 32;
