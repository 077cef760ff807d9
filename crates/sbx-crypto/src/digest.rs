//! Unsalted one-way digests rendered as lowercase hex
//!
//! Suitable for fingerprints and cache keys, not for passwords; use
//! [`crate::BcryptHasher`] for those.

use std::marker::PhantomData;

use md5::Md5;
use sbx_core::{ByteCodec, SbxResult, Utf8Codec};
use sha2::{Digest, Sha256, Sha512};

use crate::layout::tags_match;
use crate::provider::{HashProvider, HashVerifyProvider};

pub type Md5Hasher = DigestHasher<Md5>;
pub type Sha256Hasher = DigestHasher<Sha256>;
pub type Sha512Hasher = DigestHasher<Sha512>;

/// Hashes the codec bytes of the input with `D`.
pub struct DigestHasher<D, B = Utf8Codec> {
    codec: B,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHasher<D> {
    pub fn new() -> Self {
        Self::with_codec(Utf8Codec)
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, B> DigestHasher<D, B> {
    pub fn with_codec(codec: B) -> Self {
        Self {
            codec,
            _digest: PhantomData,
        }
    }
}

impl<D, B: std::fmt::Debug> std::fmt::Debug for DigestHasher<D, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestHasher")
            .field("digest", &std::any::type_name::<D>())
            .field("codec", &self.codec)
            .finish()
    }
}

impl<D: Digest, B: ByteCodec> HashProvider for DigestHasher<D, B> {
    fn hash(&self, clear_text: &str) -> SbxResult<String> {
        let bytes = self.codec.to_bytes(clear_text);
        Ok(hex::encode(D::digest(&bytes)))
    }
}

impl<D: Digest, B: ByteCodec> HashVerifyProvider for DigestHasher<D, B> {
    /// Re-hash and compare; hex case and surrounding whitespace are ignored.
    fn verify(&self, clear_text: &str, hash_text: &str) -> SbxResult<bool> {
        let computed = self.hash(clear_text)?;
        let candidate = hash_text.trim().to_ascii_lowercase();
        Ok(tags_match(computed.as_bytes(), candidate.as_bytes()))
    }
}
