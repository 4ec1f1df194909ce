//! Ethereum accounts.
//!
//! The account secret is `"<mnemonic>#<pass phrase>"`. Addresses follow
//! BIP44 `m/44'/60'/0'/0/0`: Keccak-256 over the uncompressed public key,
//! last 20 bytes, EIP-55 checksummed.
//!
//! MetaMask ignores the BIP39 passphrase when it imports a recovery
//! phrase, so MetaMask addresses are derived from the mnemonic alone.

use paperwallet_crypto::checksum::to_checksum_address;
use paperwallet_crypto::hash::keccak256;
use paperwallet_crypto::hd_derive::{format_public_path, hardened, ExtendedPrivateKey};
use paperwallet_crypto::mnemonic::{mnemonic_to_seed, sentence_to_string};
use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};

use crate::derivation::{validate_sentence_length, ProtocolDerivation};

/// MetaMask browser wallet.
pub const WALLET_METAMASK: &str = "MetaMask";

/// MyCrypto wallet, which honours the BIP39 passphrase.
pub const WALLET_MYCRYPTO: &str = "MyCrypto";

/// Wallet applications supported for Ethereum.
pub const SUPPORTED_WALLETS: &[&str] = &[WALLET_METAMASK, WALLET_MYCRYPTO];

/// Separator between mnemonic and passphrase inside the secret.
pub const SECRET_SEPARATOR: char = '#';

/// BIP44 path `m/44'/60'/0'/0/0`.
pub const DEFAULT_PATH: [u32; 5] = [hardened(44), hardened(60), hardened(0), 0, 0];

const METAMASK_INFO: &str = "1. Start with 'import using Secret Recovery Phrase' in MetaMask.\n\
2. Use the mnemonic from this paper wallet for this.\n\
3. Enter any password for MetaMask.\n\
4. Done.\n\
\n\
Additional info: MetaMask derives addresses along m/44'/60'/0'/0/0 with an empty pass phrase.";

const MYCRYPTO_INFO: &str = "1. Choose 'Mnemonic Phrase' on the MyCrypto access screen.\n\
2. Enter the mnemonic from this paper wallet.\n\
3. Enter the pass phrase from this paper wallet.\n\
4. Select the address path m/44'/60'/0'/0 and pick the first address.\n\
5. Done.";

/// Splits a secret into mnemonic and passphrase at the first `#`.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if the secret has no `#`.
pub fn split_secret(secret: &str) -> Result<(&str, &str)> {
    secret
        .split_once(SECRET_SEPARATOR)
        .ok_or_else(|| PaperWalletError::CryptoError {
            reason: "ethereum secret has no '#' separator".into(),
        })
}

/// Derives the address for `secret` along an explicit BIP32 path.
///
/// Hardened indices carry [`paperwallet_crypto::hd_derive::HARDENED_BIT`].
///
/// # Errors
///
/// - [`PaperWalletError::CryptoError`] if the secret is malformed or
///   key derivation fails.
pub fn derive_address_with_path(secret: &str, path: &[u32]) -> Result<String> {
    let (mnemonic, pass_phrase) = split_secret(secret)?;
    tracing::debug!(path = %format_public_path(path), "deriving ethereum address");

    let seed = mnemonic_to_seed(mnemonic, pass_phrase)?;
    let key = ExtendedPrivateKey::master(&seed)?.derive_path(path)?;
    let public = key.public_key_uncompressed()?;

    let hash = keccak256(&public[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(to_checksum_address(&address))
}

/// Derives the address MetaMask shows for `secret`: the passphrase is
/// dropped before derivation.
pub fn metamask_address(secret: &str) -> Result<String> {
    let (mnemonic, _) = split_secret(secret)?;
    derive_address_with_path(&format!("{mnemonic}{SECRET_SEPARATOR}"), &DEFAULT_PATH)
}

/// Ethereum secret and address rules.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EthereumDerivation;

impl ProtocolDerivation for EthereumDerivation {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Ethereum
    }

    fn supported_wallets(&self) -> &'static [&'static str] {
        SUPPORTED_WALLETS
    }

    fn default_wallet(&self) -> &'static str {
        WALLET_METAMASK
    }

    fn secret_label(&self) -> &'static str {
        "Private Key"
    }

    fn wallet_info(&self, wallet: &str) -> &'static str {
        if wallet.eq_ignore_ascii_case(WALLET_METAMASK) {
            METAMASK_INFO
        } else if wallet.eq_ignore_ascii_case(WALLET_MYCRYPTO) {
            MYCRYPTO_INFO
        } else {
            ""
        }
    }

    fn validate_mnemonic_words(&self, words: &[String]) -> Result<()> {
        validate_sentence_length(words)
    }

    fn derive_secret(&self, words: &[String], pass_phrase: &str) -> Result<String> {
        Ok(format!("{}{SECRET_SEPARATOR}{pass_phrase}", sentence_to_string(words)))
    }

    fn derive_address(&self, secret: &str, _network: Network, wallet: &str) -> Result<String> {
        if wallet.eq_ignore_ascii_case(WALLET_METAMASK) {
            metamask_address(secret)
        } else {
            derive_address_with_path(secret, &DEFAULT_PATH)
        }
    }
}
