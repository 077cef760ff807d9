//! AES-256-CBC + HMAC-SHA256 authenticated envelope (encrypt-then-MAC)
//!
//! Envelope format (binary, then transport-encoded):
//! ```text
//! [associated data][16 bytes: random IV][N bytes: AES-256-CBC ciphertext, PKCS#7][32 bytes: tag]
//! tag = HMAC-SHA256(auth_key, associated data || IV || ciphertext)
//! ```
//!
//! Decryption recomputes the tag and compares it in constant time before the
//! ciphertext is touched. Any mismatch is reported as
//! [`SbxError::AuthenticationFailed`], never as an empty plaintext.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sbx_core::{Base64Codec, ByteCodec, SbxError, SbxResult, TransportCodec, Utf8Codec};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::keys::{KeyMaterial, KeyPair};
use crate::layout;
use crate::provider::{CryptProvider, DecryptProvider};
use crate::{IV_SIZE, TAG_SIZE};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Authenticated cipher over two independent 256-bit keys.
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug)]
pub struct AesHmacEnvelope<B = Utf8Codec, T = Base64Codec> {
    keys: KeyPair,
    associated_data: Vec<u8>,
    byte_codec: B,
    transport_codec: T,
}

impl AesHmacEnvelope {
    /// Build with UTF-8 text and Base64 transport encoding.
    ///
    /// Both keys must be exactly 32 single-byte characters.
    pub fn new(crypt_key: &str, auth_key: &str) -> SbxResult<Self> {
        Self::with_codecs(Utf8Codec, Base64Codec, Some(crypt_key), Some(auth_key))
    }
}

impl<B: ByteCodec, T: TransportCodec> AesHmacEnvelope<B, T> {
    /// Build with explicit codecs. Absent keys are an invalid argument.
    pub fn with_codecs(
        byte_codec: B,
        transport_codec: T,
        crypt_key: Option<&str>,
        auth_key: Option<&str>,
    ) -> SbxResult<Self> {
        let keys = KeyPair::from_text(&byte_codec, crypt_key, auth_key)?;
        tracing::debug!("AES-256-CBC + HMAC-SHA256 envelope ready");

        Ok(Self::from_keys(keys, byte_codec, transport_codec))
    }

    /// Build from already-validated key material.
    pub fn from_keys(keys: KeyPair, byte_codec: B, transport_codec: T) -> Self {
        Self {
            keys,
            associated_data: Vec::new(),
            byte_codec,
            transport_codec,
        }
    }

    /// Bind a fixed, non-secret prefix (e.g. a key identifier) into every tag.
    ///
    /// Both ends must use the same prefix.
    pub fn with_associated_data(mut self, associated_data: impl Into<Vec<u8>>) -> Self {
        self.associated_data = associated_data.into();
        self
    }

    pub fn associated_data(&self) -> &[u8] {
        &self.associated_data
    }

    /// Encrypt raw bytes into a binary envelope.
    ///
    /// A fresh random IV is drawn for every call, so equal inputs produce
    /// different envelopes.
    pub fn seal(&self, plaintext: &[u8]) -> SbxResult<Vec<u8>> {
        let mut iv = [0u8; IV_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(self.keys.crypt().as_bytes().into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut envelope = layout::unsigned(&self.associated_data, &iv, &ciphertext);
        let tag = compute_tag(self.keys.auth(), &envelope)?;
        envelope.extend_from_slice(&tag);

        tracing::debug!(
            plaintext_len = plaintext.len(),
            envelope_len = envelope.len(),
            "envelope sealed"
        );
        Ok(envelope)
    }

    /// Verify and decrypt a binary envelope.
    ///
    /// Too-short input, a tag mismatch, a foreign associated-data prefix, and
    /// bad padding all yield [`SbxError::AuthenticationFailed`].
    pub fn open(&self, envelope: &[u8]) -> SbxResult<Vec<u8>> {
        let Some(parts) = layout::split(envelope, self.associated_data.len()) else {
            tracing::debug!(envelope_len = envelope.len(), "envelope too short");
            return Err(SbxError::AuthenticationFailed);
        };

        let expected = compute_tag(self.keys.auth(), parts.authenticated)?;
        let tag_ok = layout::tags_match(&expected, parts.tag);
        // associated data is public; plain comparison leaks nothing
        let prefix_ok = parts.associated_data == self.associated_data.as_slice();
        if !(tag_ok & prefix_ok) {
            tracing::debug!("envelope authentication failed");
            return Err(SbxError::AuthenticationFailed);
        }

        Aes256CbcDec::new(self.keys.crypt().as_bytes().into(), parts.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(parts.ciphertext)
            .map_err(|_| SbxError::AuthenticationFailed)
    }
}

/// HMAC-SHA256 over `data` with the MAC key.
fn compute_tag(auth_key: &KeyMaterial, data: &[u8]) -> SbxResult<[u8; TAG_SIZE]> {
    let mut mac = HmacSha256::new_from_slice(auth_key.as_bytes())
        .map_err(|e| SbxError::InvalidArgument(format!("HMAC key: {e}")))?;
    mac.update(data);

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

impl<B: ByteCodec, T: TransportCodec> CryptProvider for AesHmacEnvelope<B, T> {
    /// Empty or whitespace-only input is refused.
    fn crypt(&self, clear_text: &str) -> SbxResult<String> {
        if clear_text.trim().is_empty() {
            return Err(SbxError::EmptyInput("clear_text"));
        }

        let mut clear_bytes = self.byte_codec.to_bytes(clear_text);
        let sealed = self.seal(&clear_bytes);
        clear_bytes.zeroize();

        Ok(self.transport_codec.to_transport_text(&sealed?))
    }
}

impl<B: ByteCodec, T: TransportCodec> DecryptProvider for AesHmacEnvelope<B, T> {
    fn decrypt(&self, cipher_text: &str) -> SbxResult<String> {
        let envelope = self.transport_codec.from_transport_text(cipher_text)?;

        let mut clear_bytes = self.open(&envelope)?;
        let clear_text = self.byte_codec.to_text(&clear_bytes);
        clear_bytes.zeroize();

        clear_text
    }
}
