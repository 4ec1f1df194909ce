//! Passphrase-based AES-CBC encryption of account secrets.
//!
//! The cipher key is derived once per passphrase with PBKDF2, so
//! repeated encryptions under one [`SecretCipher`] share a key. Every
//! call to [`SecretCipher::encrypt`] draws a fresh 16-byte IV from the
//! supplied [`EntropySource`]; an IV is never reused.
//!
//! Ciphertext and IV travel as standard Base64 strings, the form they
//! take inside wallet files.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::Hmac;
use paperwallet_types::config::KdfPrf;
use paperwallet_types::{PaperWalletError, Result};
use sha1::Sha1;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::entropy::EntropySource;

/// Salt used when none is configured.
pub const DEFAULT_SALT: &[u8] = b"ldsqDQvEWJyWZMCl";

/// PBKDF2 iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 65_536;

/// AES key size used when none is configured.
pub const DEFAULT_KEY_BITS: usize = 256;

/// AES block and IV length in bytes.
pub const IV_LEN: usize = 16;

// ---------------------------------------------------------------------------
// CipherParams
// ---------------------------------------------------------------------------

/// Key derivation parameters for [`SecretCipher`].
///
/// # Defaults
///
/// | Parameter    | Default              |
/// |--------------|----------------------|
/// | `salt`       | `ldsqDQvEWJyWZMCl`   |
/// | `iterations` | 65 536               |
/// | `key_bits`   | 256                  |
/// | `prf`        | HMAC-SHA1            |
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CipherParams {
    /// PBKDF2 salt.
    pub salt: Vec<u8>,
    /// PBKDF2 iteration count. Must be at least 1.
    pub iterations: u32,
    /// AES key size: 128, 192 or 256.
    pub key_bits: usize,
    /// PBKDF2 pseudo-random function.
    pub prf: KdfPrf,
}

impl Default for CipherParams {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            key_bits: DEFAULT_KEY_BITS,
            prf: KdfPrf::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedKey
// ---------------------------------------------------------------------------

/// AES key derived from a passphrase. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    /// Returns the raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// DerivedKey does not implement Clone/Debug to prevent leakage.

/// Derives an AES key from a passphrase with PBKDF2.
///
/// # Errors
///
/// - [`PaperWalletError::ConfigError`] if `key_bits` is not 128, 192 or
///   256, or `iterations` is zero.
/// - [`PaperWalletError::CryptoError`] if PBKDF2 fails.
pub fn derive_key(passphrase: &str, params: &CipherParams) -> Result<DerivedKey> {
    if !matches!(params.key_bits, 128 | 192 | 256) {
        return Err(PaperWalletError::ConfigError {
            reason: format!(
                "AES key size must be 128, 192 or 256 bits, got {}",
                params.key_bits
            ),
        });
    }
    if params.iterations == 0 {
        return Err(PaperWalletError::ConfigError {
            reason: "PBKDF2 iteration count must be at least 1".into(),
        });
    }

    let mut key = vec![0u8; params.key_bits / 8];
    let password = passphrase.as_bytes();
    let result = match params.prf {
        KdfPrf::HmacSha1 => {
            pbkdf2::pbkdf2::<Hmac<Sha1>>(password, &params.salt, params.iterations, &mut key)
        }
        KdfPrf::HmacSha256 => {
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password, &params.salt, params.iterations, &mut key)
        }
    };
    result.map_err(|e| PaperWalletError::CryptoError {
        reason: format!("PBKDF2 key derivation failed: {e}"),
    })?;

    Ok(DerivedKey(key))
}

// ---------------------------------------------------------------------------
// EncryptedSecret
// ---------------------------------------------------------------------------

/// Output of [`SecretCipher::encrypt`]: Base64 ciphertext plus the
/// Base64 IV needed to decrypt it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedSecret {
    /// Base64-encoded AES-CBC ciphertext.
    pub ciphertext: String,
    /// Base64-encoded 16-byte IV.
    pub iv: String,
}

// ---------------------------------------------------------------------------
// SecretCipher
// ---------------------------------------------------------------------------

/// AES-CBC cipher keyed by a passphrase.
pub struct SecretCipher {
    key: DerivedKey,
}

impl SecretCipher {
    /// Creates a cipher with the default parameters.
    ///
    /// # Errors
    ///
    /// Same as [`derive_key`].
    pub fn new(passphrase: &str) -> Result<Self> {
        Self::with_params(passphrase, &CipherParams::default())
    }

    /// Creates a cipher with explicit key derivation parameters.
    ///
    /// # Errors
    ///
    /// Same as [`derive_key`].
    pub fn with_params(passphrase: &str, params: &CipherParams) -> Result<Self> {
        tracing::debug!(
            key_bits = params.key_bits,
            iterations = params.iterations,
            prf = ?params.prf,
            "deriving secret cipher key"
        );
        let key = derive_key(passphrase, params)?;
        Ok(Self { key })
    }

    /// Encrypts `plaintext` under a freshly drawn IV.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] if the entropy source
    /// fails or the cipher cannot be initialized.
    pub fn encrypt<E: EntropySource + ?Sized>(
        &self,
        plaintext: &str,
        source: &mut E,
    ) -> Result<EncryptedSecret> {
        let mut iv = [0u8; IV_LEN];
        source.fill(&mut iv)?;

        let key = self.key.as_bytes();
        let ciphertext = match key.len() {
            16 => encrypt_cbc::<Aes128>(key, &iv, plaintext.as_bytes())?,
            24 => encrypt_cbc::<Aes192>(key, &iv, plaintext.as_bytes())?,
            _ => encrypt_cbc::<Aes256>(key, &iv, plaintext.as_bytes())?,
        };

        Ok(EncryptedSecret {
            ciphertext: BASE64.encode(ciphertext),
            iv: BASE64.encode(iv),
        })
    }

    /// Decrypts a Base64 ciphertext with its Base64 IV.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::DecryptionFailure`] for any failure:
    /// bad Base64, wrong IV length, bad padding (usually a wrong
    /// passphrase) or non-UTF-8 plaintext.
    pub fn decrypt(&self, ciphertext: &str, iv: &str) -> Result<String> {
        let ciphertext = BASE64
            .decode(ciphertext.trim())
            .map_err(|_| PaperWalletError::DecryptionFailure)?;
        let iv = BASE64
            .decode(iv.trim())
            .map_err(|_| PaperWalletError::DecryptionFailure)?;
        if iv.len() != IV_LEN {
            return Err(PaperWalletError::DecryptionFailure);
        }

        let key = self.key.as_bytes();
        let mut plaintext = match key.len() {
            16 => decrypt_cbc::<Aes128>(key, &iv, &ciphertext)?,
            24 => decrypt_cbc::<Aes192>(key, &iv, &ciphertext)?,
            _ => decrypt_cbc::<Aes256>(key, &iv, &ciphertext)?,
        };

        match String::from_utf8(std::mem::take(&mut plaintext)) {
            Ok(text) => Ok(text),
            Err(e) => {
                let mut bytes = e.into_bytes();
                bytes.zeroize();
                Err(PaperWalletError::DecryptionFailure)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Internal: CBC helpers
// ---------------------------------------------------------------------------

fn encrypt_cbc<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let encryptor =
        cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(|e| PaperWalletError::CryptoError {
            reason: format!("AES-CBC init failed: {e}"),
        })?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_cbc<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| PaperWalletError::DecryptionFailure)?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PaperWalletError::DecryptionFailure)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PASS_PHRASE: &str = "pass phrase";
    const TEXT_PLAIN: &str = "the quick brown fox jumps over the lazy dog";
    const TEXT_ENCRYPTED: &str = "YbbyQ563fQvzNu2zVd3zvDvJh41zxSshL/D2iFFvWJBHhYxNcIcuFZGBaL1cJAip";
    const TEXT_IV: &str = "mW1YouWJhVb2QMtOMLBsog==";

    /// Cheap parameters for tests that do not check stored vectors.
    fn fast_params() -> CipherParams {
        CipherParams {
            iterations: 1000,
            ..CipherParams::default()
        }
    }

    #[test]
    fn decrypts_stored_vector() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::new(PASS_PHRASE)?;
        assert_eq!(cipher.decrypt(TEXT_ENCRYPTED, TEXT_IV)?, TEXT_PLAIN);
        Ok(())
    }

    #[test]
    fn decrypts_stored_iota_seed() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::new("wallet pass phrase")?;
        let seed = cipher.decrypt(
            "dH8FpypngYR+6TkQN9tHudcqz8F/ozo5WaxKM923BZAnSJufzSwHnvgCYHeKF6alwpne0kLuoh9lV0VU0zjkaO/uOHqL5nLmH/q8xSEpi8RRpwftRTxIUTnaWtdFDW9D",
            "sJpV7caBKM1AXvzWGmZCDg==",
        )?;
        assert_eq!(
            seed,
            "UWCSITHWQIFMVPAGZHKMJVJG9DKQTDNJQLB9DUJNFCT9AZPZSVQNHDHHXQUFCOOFSLOMMLXZLYNSH9MLJ"
        );
        Ok(())
    }

    #[test]
    fn encrypt_then_decrypt() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::with_params(PASS_PHRASE, &fast_params())?;
        let mut rng = StdRng::seed_from_u64(1);

        let encrypted = cipher.encrypt(TEXT_PLAIN, &mut rng)?;
        assert_ne!(encrypted.ciphertext, TEXT_PLAIN);
        assert_eq!(cipher.decrypt(&encrypted.ciphertext, &encrypted.iv)?, TEXT_PLAIN);
        Ok(())
    }

    #[test]
    fn repeated_encryption_uses_fresh_iv() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::with_params(PASS_PHRASE, &fast_params())?;
        let mut rng = StdRng::seed_from_u64(2);

        let a = cipher.encrypt(TEXT_PLAIN, &mut rng)?;
        let b = cipher.encrypt(TEXT_PLAIN, &mut rng)?;
        let c = cipher.encrypt(TEXT_PLAIN, &mut rng)?;

        assert_ne!(a.iv, b.iv);
        assert_ne!(a.iv, c.iv);
        assert_ne!(b.iv, c.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
        assert_ne!(b.ciphertext, c.ciphertext);
        Ok(())
    }

    #[test]
    fn wrong_passphrase_fails() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::new("different pass phrase")?;
        // A wrong key almost always breaks PKCS#7 padding or UTF-8.
        match cipher.decrypt(TEXT_ENCRYPTED, TEXT_IV) {
            Err(PaperWalletError::DecryptionFailure) => {}
            Ok(text) => assert_ne!(text, TEXT_PLAIN),
            Err(other) => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn malformed_inputs_fail() -> std::result::Result<(), PaperWalletError> {
        let cipher = SecretCipher::with_params(PASS_PHRASE, &fast_params())?;
        assert!(matches!(
            cipher.decrypt("not base64!", TEXT_IV),
            Err(PaperWalletError::DecryptionFailure)
        ));
        assert!(matches!(
            cipher.decrypt(TEXT_ENCRYPTED, "AAAA"),
            Err(PaperWalletError::DecryptionFailure)
        ));
        // Not a whole number of blocks.
        assert!(matches!(
            cipher.decrypt("AAAA", TEXT_IV),
            Err(PaperWalletError::DecryptionFailure)
        ));
        Ok(())
    }

    #[test]
    fn key_sizes_and_parameters_change_key() -> std::result::Result<(), PaperWalletError> {
        let base = fast_params();
        let default_key = derive_key(PASS_PHRASE, &base)?;
        assert_eq!(default_key.as_bytes().len(), 32);

        let short = derive_key(PASS_PHRASE, &CipherParams { key_bits: 128, ..base.clone() })?;
        assert_eq!(short.as_bytes().len(), 16);

        let other_salt = derive_key(
            PASS_PHRASE,
            &CipherParams {
                salt: b"2iFFvWJBHhYxNcIcuFZGBaL1".to_vec(),
                ..base.clone()
            },
        )?;
        let other_prf = derive_key(
            PASS_PHRASE,
            &CipherParams {
                prf: KdfPrf::HmacSha256,
                ..base.clone()
            },
        )?;
        let other_pass = derive_key("different pass phrase", &base)?;

        assert_ne!(default_key.as_bytes(), other_salt.as_bytes());
        assert_ne!(default_key.as_bytes(), other_prf.as_bytes());
        assert_ne!(default_key.as_bytes(), other_pass.as_bytes());
        Ok(())
    }

    #[test]
    fn aes128_and_sha256_roundtrip() -> std::result::Result<(), PaperWalletError> {
        let params = CipherParams {
            key_bits: 128,
            prf: KdfPrf::HmacSha256,
            ..fast_params()
        };
        let cipher = SecretCipher::with_params(PASS_PHRASE, &params)?;
        let encrypted = cipher.encrypt(TEXT_PLAIN, &mut StdRng::seed_from_u64(3))?;
        assert_eq!(cipher.decrypt(&encrypted.ciphertext, &encrypted.iv)?, TEXT_PLAIN);
        Ok(())
    }

    #[test]
    fn rejects_invalid_parameters() {
        let bad_bits = CipherParams {
            key_bits: 64,
            ..CipherParams::default()
        };
        assert!(matches!(
            derive_key(PASS_PHRASE, &bad_bits),
            Err(PaperWalletError::ConfigError { .. })
        ));

        let zero_iterations = CipherParams {
            iterations: 0,
            ..CipherParams::default()
        };
        assert!(derive_key(PASS_PHRASE, &zero_iterations).is_err());
    }
}
