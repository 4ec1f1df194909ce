//! Protocol-specific secret and address derivation.
//!
//! Each supported protocol implements [`ProtocolDerivation`]. The closed
//! [`Derivation`] enum selects the implementation for a
//! [`ProtocolKind`] and is what the rest of the crate holds on to.

use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};

use crate::bitcoin::{BitcoinDerivation, Chain};
use crate::ethereum::EthereumDerivation;
use crate::iota::IotaDerivation;

/// Shortest accepted BIP39 sentence for Bitcoin and Ethereum.
pub const MIN_MNEMONIC_WORDS: usize = 12;

/// Longest accepted BIP39 sentence for Bitcoin and Ethereum.
pub const MAX_MNEMONIC_WORDS: usize = 24;

/// Secret → address rules for one protocol.
pub trait ProtocolDerivation {
    /// Protocol this derivation belongs to.
    fn kind(&self) -> ProtocolKind;

    /// Wallet applications whose addresses this derivation reproduces.
    fn supported_wallets(&self) -> &'static [&'static str];

    /// Wallet application used when the caller names none.
    fn default_wallet(&self) -> &'static str;

    /// Human-readable name of the account secret.
    fn secret_label(&self) -> &'static str;

    /// Setup instructions for importing the account into `wallet`.
    fn wallet_info(&self, wallet: &str) -> &'static str;

    /// Checks that `words` is usable as input for this protocol.
    fn validate_mnemonic_words(&self, words: &[String]) -> Result<()>;

    /// Turns a mnemonic sentence and passphrase into the account secret.
    fn derive_secret(&self, words: &[String], pass_phrase: &str) -> Result<String>;

    /// Derives the first account address for `secret`.
    fn derive_address(&self, secret: &str, network: Network, wallet: &str) -> Result<String>;

    /// Address preview chains. Only hierarchical protocols have any.
    fn chains(&self, _secret: &str, _network: Network) -> Result<Vec<Chain>> {
        Ok(Vec::new())
    }

    /// Resolves `wallet` case-insensitively to its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::UnsupportedWalletApp`] if the
    /// protocol does not support `wallet`.
    fn canonical_wallet(&self, wallet: &str) -> Result<&'static str> {
        self.supported_wallets()
            .iter()
            .copied()
            .find(|w| w.eq_ignore_ascii_case(wallet.trim()))
            .ok_or_else(|| PaperWalletError::UnsupportedWalletApp {
                wallet: wallet.to_string(),
            })
    }
}

/// Checks the BIP39 sentence length shared by Bitcoin and Ethereum.
///
/// # Errors
///
/// Returns [`PaperWalletError::InvalidMnemonicLength`] for an empty list,
/// a length outside `12..=24` or a length not divisible by 3.
pub fn validate_sentence_length(words: &[String]) -> Result<()> {
    let len = words.len();
    if !(MIN_MNEMONIC_WORDS..=MAX_MNEMONIC_WORDS).contains(&len) || len % 3 != 0 {
        return Err(PaperWalletError::InvalidMnemonicLength { words: len });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// The derivation for each supported protocol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Derivation {
    Bitcoin(BitcoinDerivation),
    Ethereum(EthereumDerivation),
    Iota(IotaDerivation),
}

impl Derivation {
    /// Selects the derivation for `kind`.
    pub fn for_kind(kind: ProtocolKind) -> Self {
        match kind {
            ProtocolKind::Bitcoin => Derivation::Bitcoin(BitcoinDerivation),
            ProtocolKind::Ethereum => Derivation::Ethereum(EthereumDerivation),
            ProtocolKind::Iota => Derivation::Iota(IotaDerivation),
        }
    }

    fn inner(&self) -> &dyn ProtocolDerivation {
        match self {
            Derivation::Bitcoin(d) => d,
            Derivation::Ethereum(d) => d,
            Derivation::Iota(d) => d,
        }
    }
}

impl ProtocolDerivation for Derivation {
    fn kind(&self) -> ProtocolKind {
        self.inner().kind()
    }

    fn supported_wallets(&self) -> &'static [&'static str] {
        self.inner().supported_wallets()
    }

    fn default_wallet(&self) -> &'static str {
        self.inner().default_wallet()
    }

    fn secret_label(&self) -> &'static str {
        self.inner().secret_label()
    }

    fn wallet_info(&self, wallet: &str) -> &'static str {
        self.inner().wallet_info(wallet)
    }

    fn validate_mnemonic_words(&self, words: &[String]) -> Result<()> {
        self.inner().validate_mnemonic_words(words)
    }

    fn derive_secret(&self, words: &[String], pass_phrase: &str) -> Result<String> {
        self.inner().derive_secret(words, pass_phrase)
    }

    fn derive_address(&self, secret: &str, network: Network, wallet: &str) -> Result<String> {
        self.inner().derive_address(secret, network, wallet)
    }

    fn chains(&self, secret: &str, network: Network) -> Result<Vec<Chain>> {
        self.inner().chains(secret, network)
    }
}
