//! Build boxed providers from configuration
//!
//! Call sites hold `Box<dyn ...>` and never name a concrete algorithm, so
//! switching e.g. SHA-256 to bcrypt is a config change.

use sbx_core::config::{CipherAlgorithm, CipherConfig, HashAlgorithm, HashConfig};
use sbx_core::{Base64Codec, SbxResult, Utf8Codec};
use secrecy::ExposeSecret;

use crate::bcrypt::{BcryptHasher, BcryptVerifier};
use crate::digest::{Md5Hasher, Sha256Hasher, Sha512Hasher};
use crate::echo::EchoCipher;
use crate::envelope::AesHmacEnvelope;
use crate::provider::{CryptDecryptProvider, HashProvider, HashVerifyProvider};

/// Reversible cipher selected by `config.algorithm`.
///
/// The envelope cipher requires both keys; the echo cipher ignores them.
pub fn cipher_from_config(config: &CipherConfig) -> SbxResult<Box<dyn CryptDecryptProvider>> {
    tracing::debug!(algorithm = %config.algorithm, "building cipher");

    match config.algorithm {
        CipherAlgorithm::Echo => {
            tracing::warn!("echo cipher selected: values are stored in clear text");
            Ok(Box::new(EchoCipher))
        }
        CipherAlgorithm::Aes256Hmac => {
            let envelope = AesHmacEnvelope::with_codecs(
                Utf8Codec,
                Base64Codec,
                config.crypt_key.as_ref().map(|k| k.expose_secret()),
                config.auth_key.as_ref().map(|k| k.expose_secret()),
            )?
            .with_associated_data(config.associated_data.as_bytes());
            Ok(Box::new(envelope))
        }
    }
}

/// One-way hash selected by `config.algorithm`.
pub fn hasher_from_config(config: &HashConfig) -> SbxResult<Box<dyn HashProvider>> {
    tracing::debug!(algorithm = %config.algorithm, "building hasher");

    Ok(match config.algorithm {
        HashAlgorithm::Md5 => Box::new(Md5Hasher::new()),
        HashAlgorithm::Sha256 => Box::new(Sha256Hasher::new()),
        HashAlgorithm::Sha512 => Box::new(Sha512Hasher::new()),
        HashAlgorithm::Bcrypt => Box::new(BcryptHasher::new(config.bcrypt_work_factor)?),
    })
}

/// Verifier matching the hashes produced by [`hasher_from_config`].
pub fn verifier_from_config(config: &HashConfig) -> Box<dyn HashVerifyProvider> {
    match config.algorithm {
        HashAlgorithm::Md5 => Box::new(Md5Hasher::new()),
        HashAlgorithm::Sha256 => Box::new(Sha256Hasher::new()),
        HashAlgorithm::Sha512 => Box::new(Sha512Hasher::new()),
        HashAlgorithm::Bcrypt => Box::new(BcryptVerifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_core::config::SbxConfig;
    use sbx_core::SbxError;

    fn keyed_config() -> SbxConfig {
        SbxConfig::default().with_key_overrides(
            Some("3cF*h:8%|kUQDz,{8d!{^WZ5WiqS>E1g".into()),
            Some("nOk(o$QIL!Y_SNHLb<i~4vL<rsa0YB1w".into()),
        )
    }

    #[test]
    fn test_envelope_from_config() {
        let config = keyed_config();
        let cipher = cipher_from_config(&config.cipher).unwrap();

        let cipher_text = cipher.crypt("abc").unwrap();
        assert_ne!(cipher_text, "abc");
        assert_eq!(cipher.decrypt(&cipher_text).unwrap(), "abc");
    }

    #[test]
    fn test_envelope_requires_keys() {
        let config = SbxConfig::default();
        let err = cipher_from_config(&config.cipher).err().unwrap();
        assert!(matches!(err, SbxError::InvalidArgument(_)));
    }

    #[test]
    fn test_associated_data_from_config() {
        let mut config = keyed_config();
        config.cipher.associated_data = "tenant-a".into();
        let cipher_a = cipher_from_config(&config.cipher).unwrap();

        config.cipher.associated_data = "tenant-b".into();
        let cipher_b = cipher_from_config(&config.cipher).unwrap();

        let cipher_text = cipher_a.crypt("abc").unwrap();
        assert_eq!(cipher_a.decrypt(&cipher_text).unwrap(), "abc");
        assert!(matches!(
            cipher_b.decrypt(&cipher_text),
            Err(SbxError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_echo_from_config() {
        let mut config = SbxConfig::default();
        config.cipher.algorithm = CipherAlgorithm::Echo;
        let cipher = cipher_from_config(&config.cipher).unwrap();

        assert_eq!(cipher.crypt("abc").unwrap(), "abc");
    }

    #[test]
    fn test_hashers_are_interchangeable() {
        for algorithm in [
            HashAlgorithm::Md5,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
            HashAlgorithm::Bcrypt,
        ] {
            let config = HashConfig {
                algorithm,
                bcrypt_work_factor: 4,
            };
            let hasher = hasher_from_config(&config).unwrap();
            let verifier = verifier_from_config(&config);

            let hash_text = hasher.hash("abc").unwrap();
            assert!(verifier.verify("abc", &hash_text).unwrap(), "{algorithm}");
            assert!(!verifier.verify("abd", &hash_text).unwrap(), "{algorithm}");
        }
    }

    #[test]
    fn test_bad_work_factor() {
        let config = HashConfig {
            algorithm: HashAlgorithm::Bcrypt,
            bcrypt_work_factor: 99,
        };
        assert!(hasher_from_config(&config).is_err());
    }
}
