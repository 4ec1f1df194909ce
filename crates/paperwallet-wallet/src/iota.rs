//! IOTA accounts (legacy Kerl address scheme, Trinity compatible).
//!
//! The account secret is an 81-tryte seed stretched from the mnemonic;
//! it cannot be turned back into the mnemonic. The address is the first
//! security-level-2 address of that seed with its 9-tryte checksum.

use paperwallet_crypto::iota_signing::{new_address, SECURITY_LEVEL_DEFAULT, SEED_LENGTH};
use paperwallet_crypto::java_random::JavaRandom;
use paperwallet_crypto::mnemonic::{pbkdf2_sha512, sentence_to_string};
use paperwallet_crypto::ternary::TRYTE_ALPHABET;
use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};
use zeroize::Zeroizing;

use crate::derivation::ProtocolDerivation;

/// Trinity wallet.
pub const WALLET_TRINITY: &str = "Trinity";

/// Wallet applications supported for IOTA.
pub const SUPPORTED_WALLETS: &[&str] = &[WALLET_TRINITY];

/// Index of the account address.
pub const ADDRESS_INDEX: u64 = 0;

const TRINITY_INFO: &str = "1. Start with 'Use existing seed' in Trinity.\n\
2. Enter the seed from this paper wallet.\n\
3. Choose an account name and a Trinity password.\n\
4. Done.";

/// Stretches a mnemonic sentence into an 81-tryte seed.
///
/// PBKDF2-HMAC-SHA512 (BIP39 salt and rounds) yields 8 bytes per tryte.
/// Each 8-byte block, read as a big-endian `i64`, seeds a
/// [`JavaRandom`] whose `next_int(27)` picks the tryte.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if PBKDF2 fails.
pub fn seed_from_mnemonic(mnemonic: &str, pass_phrase: &str) -> Result<String> {
    let mut stretched = Zeroizing::new(vec![0u8; SEED_LENGTH * 8]);
    pbkdf2_sha512(mnemonic, pass_phrase, &mut stretched)?;

    let alphabet = TRYTE_ALPHABET.as_bytes();
    let mut seed = String::with_capacity(SEED_LENGTH);
    for block in stretched.chunks_exact(8) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(block);
        let index = JavaRandom::new(i64::from_be_bytes(bytes)).next_int(27)?;
        let tryte = usize::try_from(index)
            .ok()
            .and_then(|i| alphabet.get(i))
            .ok_or_else(|| PaperWalletError::CryptoError {
                reason: format!("tryte index {index} out of range"),
            })?;
        seed.push(char::from(*tryte));
    }
    Ok(seed)
}

/// IOTA secret and address rules.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IotaDerivation;

impl ProtocolDerivation for IotaDerivation {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Iota
    }

    fn supported_wallets(&self) -> &'static [&'static str] {
        SUPPORTED_WALLETS
    }

    fn default_wallet(&self) -> &'static str {
        WALLET_TRINITY
    }

    fn secret_label(&self) -> &'static str {
        "Seed"
    }

    fn wallet_info(&self, wallet: &str) -> &'static str {
        if wallet.eq_ignore_ascii_case(WALLET_TRINITY) {
            TRINITY_INFO
        } else {
            ""
        }
    }

    fn validate_mnemonic_words(&self, words: &[String]) -> Result<()> {
        if words.is_empty() {
            return Err(PaperWalletError::InvalidMnemonicLength { words: 0 });
        }
        Ok(())
    }

    fn derive_secret(&self, words: &[String], pass_phrase: &str) -> Result<String> {
        seed_from_mnemonic(&sentence_to_string(words), pass_phrase)
    }

    fn derive_address(&self, secret: &str, _network: Network, _wallet: &str) -> Result<String> {
        tracing::debug!("deriving iota address");
        new_address(secret, SECURITY_LEVEL_DEFAULT, ADDRESS_INDEX, true)
    }
}
