//! Key material validation: two 32-character secrets → two 256-bit keys

use sbx_core::{ByteCodec, SbxError, SbxResult};
use zeroize::Zeroize;

use crate::KEY_SIZE;

/// A validated 256-bit key. Zeroized on drop.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: [u8; KEY_SIZE],
}

impl KeyMaterial {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Validate a textual key and convert it with `codec`.
    ///
    /// The value must be present, convert to exactly [`KEY_SIZE`] bytes, and
    /// every character must map to a single byte. A 32-character key with a
    /// multi-byte character would silently become a longer key otherwise.
    pub fn from_text<B: ByteCodec + ?Sized>(
        codec: &B,
        name: &'static str,
        value: Option<&str>,
    ) -> SbxResult<Self> {
        let value =
            value.ok_or_else(|| SbxError::InvalidArgument(format!("{name} is required")))?;

        let mut bytes = codec.to_bytes(value);
        let actual = bytes.len();
        if actual != KEY_SIZE || value.chars().count() != actual {
            bytes.zeroize();
            return Err(SbxError::InvalidKeyLength {
                name,
                expected: KEY_SIZE,
                actual,
            });
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self::from_bytes(key))
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Cipher key plus independent MAC key, validated together.
#[derive(Clone, Debug)]
pub struct KeyPair {
    crypt: KeyMaterial,
    auth: KeyMaterial,
}

impl KeyPair {
    pub fn new(crypt: KeyMaterial, auth: KeyMaterial) -> Self {
        Self { crypt, auth }
    }

    pub fn from_text<B: ByteCodec + ?Sized>(
        codec: &B,
        crypt_key: Option<&str>,
        auth_key: Option<&str>,
    ) -> SbxResult<Self> {
        let crypt = KeyMaterial::from_text(codec, "crypt_key", crypt_key)?;
        let auth = KeyMaterial::from_text(codec, "auth_key", auth_key)?;
        Ok(Self::new(crypt, auth))
    }

    /// AES-256 key
    pub fn crypt(&self) -> &KeyMaterial {
        &self.crypt
    }

    /// HMAC-SHA256 key
    pub fn auth(&self) -> &KeyMaterial {
        &self.auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_core::Utf8Codec;

    const CRYPT_KEY: &str = "3cF*h:8%|kUQDz,{8d!{^WZ5WiqS>E1g";
    const AUTH_KEY: &str = "nOk(o$QIL!Y_SNHLb<i~4vL<rsa0YB1w";

    #[test]
    fn test_valid_key_pair() {
        let pair = KeyPair::from_text(&Utf8Codec, Some(CRYPT_KEY), Some(AUTH_KEY)).unwrap();
        assert_eq!(pair.crypt().as_bytes(), CRYPT_KEY.as_bytes());
        assert_eq!(pair.auth().as_bytes(), AUTH_KEY.as_bytes());
    }

    #[test]
    fn test_missing_key_is_invalid_argument() {
        let err = KeyPair::from_text(&Utf8Codec, None, Some(AUTH_KEY)).unwrap_err();
        assert!(matches!(err, SbxError::InvalidArgument(_)));

        let err = KeyPair::from_text(&Utf8Codec, Some(CRYPT_KEY), None).unwrap_err();
        assert!(matches!(err, SbxError::InvalidArgument(_)));
    }

    #[test]
    fn test_short_key_rejected() {
        let err = KeyMaterial::from_text(&Utf8Codec, "crypt_key", Some(&CRYPT_KEY[..31]))
            .unwrap_err();
        assert!(matches!(
            err,
            SbxError::InvalidKeyLength {
                name: "crypt_key",
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn test_long_salt_rejected() {
        let long = format!("{AUTH_KEY}x");
        let err = KeyPair::from_text(&Utf8Codec, Some(CRYPT_KEY), Some(&long)).unwrap_err();
        assert!(matches!(
            err,
            SbxError::InvalidKeyLength {
                name: "auth_key",
                actual: 33,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = KeyMaterial::from_text(&Utf8Codec, "crypt_key", Some("")).unwrap_err();
        assert!(matches!(err, SbxError::InvalidKeyLength { actual: 0, .. }));
    }

    #[test]
    fn test_multibyte_characters_rejected() {
        // 32 characters, but 'ó' is two bytes in UTF-8
        let key = format!("{}ó", "a".repeat(31));
        assert_eq!(key.chars().count(), 32);

        let err = KeyMaterial::from_text(&Utf8Codec, "crypt_key", Some(&key)).unwrap_err();
        assert!(matches!(err, SbxError::InvalidKeyLength { actual: 33, .. }));
    }

    #[test]
    fn test_multibyte_with_32_bytes_rejected() {
        // 30 chars but 32 bytes: byte length alone would accept this
        let key = format!("{}óó", "a".repeat(28));
        assert_eq!(key.len(), 32);

        let err = KeyMaterial::from_text(&Utf8Codec, "crypt_key", Some(&key)).unwrap_err();
        assert!(matches!(err, SbxError::InvalidKeyLength { actual: 32, .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = KeyMaterial::from_bytes([7u8; KEY_SIZE]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains('7'));
    }
}
