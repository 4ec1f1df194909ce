//! Bitcoin accounts: BIP44 legacy (P2PKH) addresses as Electrum
//! produces them.
//!
//! The account secret is the space-joined mnemonic. The BIP39 seed is
//! always derived with an **empty** passphrase, otherwise the resulting
//! addresses do not match Electrum's. Addresses live under
//! `m/44'/0'/0'/chain/index`.

use paperwallet_crypto::checksum::base58check_encode;
use paperwallet_crypto::hash::hash160;
use paperwallet_crypto::hd_derive::{format_public_path, hardened, ExtendedPrivateKey};
use paperwallet_crypto::mnemonic::{
    mnemonic_to_seed, sentence_to_string, string_to_sentence, validate_mnemonic,
};
use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};
use serde::{Deserialize, Serialize};

use crate::derivation::{validate_sentence_length, ProtocolDerivation};

/// Electrum desktop wallet.
pub const WALLET_ELECTRUM: &str = "Electrum";

/// Wallet applications supported for Bitcoin.
pub const SUPPORTED_WALLETS: &[&str] = &[WALLET_ELECTRUM];

/// Account-level BIP44 path `m/44'/0'/0'`.
pub const ACCOUNT_PATH: [u32; 3] = [hardened(44), hardened(0), hardened(0)];

/// Chain index of the receive chain.
pub const RECEIVE_CHAIN: u32 = 0;

/// Chain index of the change chain.
pub const CHANGE_CHAIN: u32 = 1;

/// Number of addresses listed per chain in the preview.
pub const PREVIEW_ADDRESSES: u32 = 2;

const ELECTRUM_INFO: &str = "1. Start with 'Create New Wallet' in Electrum.\n\
2. Choose any new wallet name.\n\
3. Select 'Standard Wallet'.\n\
4. Proceed with 'I already have a seed'.\n\
5. Under Options check 'BIP39 seed'.\n\
6. Enter the mnemonic into the big field.\n\
7. Choose 'legacy (p2pkh)' for the address type and leave the path field unchanged at m/44'/0'/0'.\n\
8. Enter the pass phrase in the password fields.\n\
9. Done.";

/// P2PKH version byte for `network`.
pub fn p2pkh_version(network: Network) -> u8 {
    match network {
        Network::Production => 0x00,
        Network::Test | Network::Local => 0x6f,
    }
}

// ---------------------------------------------------------------------------
// Chain preview
// ---------------------------------------------------------------------------

/// One address of a chain preview.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainAddress {
    /// Public derivation path, e.g. `M/44H/0H/0H/0/1`.
    pub path: String,
    /// P2PKH address at that path.
    pub address: String,
}

/// The first addresses of a receive or change chain.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    /// Public derivation path of the chain, e.g. `M/44H/0H/0H/0`.
    pub path: String,
    pub addresses: Vec<ChainAddress>,
}

fn p2pkh_address(key: &ExtendedPrivateKey, network: Network) -> Result<String> {
    let public = key.public_key_compressed()?;
    Ok(base58check_encode(p2pkh_version(network), &hash160(&public)))
}

/// Derives the `m/44'/0'/0'` account key for a mnemonic sentence.
fn account_key(secret: &str) -> Result<ExtendedPrivateKey> {
    let sentence = sentence_to_string(&string_to_sentence(secret));
    let seed = mnemonic_to_seed(&sentence, "")?;
    ExtendedPrivateKey::master(&seed)?.derive_path(&ACCOUNT_PATH)
}

/// Builds the receive and change chain previews for a mnemonic sentence.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if key derivation fails.
pub fn chains(secret: &str, network: Network) -> Result<Vec<Chain>> {
    let account = account_key(secret)?;

    [RECEIVE_CHAIN, CHANGE_CHAIN]
        .into_iter()
        .map(|index| {
            let chain_key = account.derive_child(index)?;
            let addresses = (0..PREVIEW_ADDRESSES)
                .map(|i| {
                    let key = chain_key.derive_child(i)?;
                    Ok(ChainAddress {
                        path: format_public_path(key.path()),
                        address: p2pkh_address(&key, network)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Chain {
                path: format_public_path(chain_key.path()),
                addresses,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// BitcoinDerivation
// ---------------------------------------------------------------------------

/// Bitcoin secret and address rules.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BitcoinDerivation;

impl ProtocolDerivation for BitcoinDerivation {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Bitcoin
    }

    fn supported_wallets(&self) -> &'static [&'static str] {
        SUPPORTED_WALLETS
    }

    fn default_wallet(&self) -> &'static str {
        WALLET_ELECTRUM
    }

    fn secret_label(&self) -> &'static str {
        "Mnemonic Seed"
    }

    fn wallet_info(&self, wallet: &str) -> &'static str {
        if wallet.eq_ignore_ascii_case(WALLET_ELECTRUM) {
            ELECTRUM_INFO
        } else {
            ""
        }
    }

    fn validate_mnemonic_words(&self, words: &[String]) -> Result<()> {
        validate_sentence_length(words)?;
        validate_mnemonic(words).map_err(|e| PaperWalletError::InvalidMnemonicChecksum {
            reason: e.to_string(),
        })
    }

    fn derive_secret(&self, words: &[String], _pass_phrase: &str) -> Result<String> {
        Ok(sentence_to_string(words))
    }

    fn derive_address(&self, secret: &str, network: Network, _wallet: &str) -> Result<String> {
        tracing::debug!(%network, "deriving bitcoin receive address");
        let account = account_key(secret)?;
        let key = account.derive_path(&[RECEIVE_CHAIN, 0])?;
        p2pkh_address(&key, network)
    }

    fn chains(&self, secret: &str, network: Network) -> Result<Vec<Chain>> {
        chains(secret, network)
    }
}
