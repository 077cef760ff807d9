//! Byte/text boundary codecs
//!
//! Two narrow contracts sit between the crypto providers and the outside
//! world:
//! - [`ByteCodec`] turns text into raw bytes and back (plaintext, key material)
//! - [`TransportCodec`] turns raw bytes into printable text and back (envelopes)
//!
//! Providers are generic over both, so an alternative encoding can be swapped
//! in without touching the envelope layout.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{SbxError, SbxResult};

/// Text ⇄ raw bytes.
pub trait ByteCodec: Send + Sync {
    fn to_bytes(&self, text: &str) -> Vec<u8>;

    fn to_text(&self, bytes: &[u8]) -> SbxResult<String>;
}

/// Raw bytes ⇄ transport-safe text.
pub trait TransportCodec: Send + Sync {
    fn to_transport_text(&self, bytes: &[u8]) -> String;

    fn from_transport_text(&self, text: &str) -> SbxResult<Vec<u8>>;
}

/// UTF-8 byte codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl ByteCodec for Utf8Codec {
    fn to_bytes(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn to_text(&self, bytes: &[u8]) -> SbxResult<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| SbxError::MalformedInput(format!("not UTF-8: {e}")))
    }
}

/// Standard-alphabet, padded Base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl TransportCodec for Base64Codec {
    fn to_transport_text(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn from_transport_text(&self, text: &str) -> SbxResult<Vec<u8>> {
        STANDARD
            .decode(text)
            .map_err(|e| SbxError::MalformedInput(format!("base64 decode: {e}")))
    }
}
