//! A protocol bound to a network, and the create / restore entry points
//! built on it.

use std::fmt;

use paperwallet_crypto::entropy::EntropySource;
use paperwallet_crypto::mnemonic::generate_mnemonic;
use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};
use serde_json::{Map, Value};

use crate::account::{Account, JSON_WALLET};
use crate::derivation::{Derivation, ProtocolDerivation};
use crate::json_config::JsonConfig;
use crate::wallet::{validate_envelope, Wallet};

/// A protocol on a specific network. Two protocols are equal when both
/// kind and network match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Protocol {
    kind: ProtocolKind,
    network: Network,
}

impl Protocol {
    pub fn new(kind: ProtocolKind, network: Network) -> Self {
        Self { kind, network }
    }

    pub fn kind(&self) -> ProtocolKind {
        self.kind
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Secret and address rules for this protocol.
    pub fn derivation(&self) -> Derivation {
        Derivation::for_kind(self.kind)
    }

    /// Wallet application used when none is requested.
    pub fn default_target_wallet(&self) -> &'static str {
        self.derivation().default_wallet()
    }

    /// Human-readable name of the account secret.
    pub fn secret_label(&self) -> &'static str {
        self.derivation().secret_label()
    }

    /// Generates a fresh mnemonic from `bits` bits of entropy.
    ///
    /// # Errors
    ///
    /// See [`generate_mnemonic`].
    pub fn generate_mnemonic_words<E: EntropySource + ?Sized>(
        &self,
        bits: usize,
        source: &mut E,
    ) -> Result<Vec<String>> {
        generate_mnemonic(bits, source)
    }

    /// Checks a mnemonic sentence against this protocol's rules.
    pub fn validate_mnemonic_words(&self, words: &[String]) -> Result<()> {
        self.derivation().validate_mnemonic_words(words)
    }

    /// Derives an account from `words`. See [`Account::create`].
    pub fn create_account<E: EntropySource + ?Sized>(
        &self,
        words: &[String],
        pass_phrase: &str,
        wallet_app: &str,
        config: &JsonConfig,
        source: &mut E,
    ) -> Result<Account> {
        Account::create(*self, words, pass_phrase, wallet_app, &config.cipher, source)
    }

    /// Restores an account record. See [`Account::restore`].
    pub fn restore_account(
        &self,
        record: &Map<String, Value>,
        pass_phrase: &str,
        wallet_app: &str,
        config: &JsonConfig,
    ) -> Result<Account> {
        Account::restore(*self, record, pass_phrase, wallet_app, &config.cipher)
    }

    /// Creates a wallet, generating a mnemonic when `words` is `None`
    /// or empty.
    ///
    /// # Errors
    ///
    /// - Mnemonic validation errors (length, checksum).
    /// - [`PaperWalletError::UnsupportedWalletApp`]
    ///   for an unknown `wallet_app`.
    /// - Entropy and derivation errors.
    pub fn create_wallet<E: EntropySource + ?Sized>(
        &self,
        words: Option<&[String]>,
        pass_phrase: &str,
        wallet_app: Option<&str>,
        entropy_bits: usize,
        config: &JsonConfig,
        source: &mut E,
    ) -> Result<Wallet> {
        let words = match words {
            Some(words) if !words.is_empty() => words.to_vec(),
            _ => self.generate_mnemonic_words(entropy_bits, source)?,
        };
        self.validate_mnemonic_words(&words)?;

        let wallet_app = wallet_app.unwrap_or_else(|| self.default_target_wallet());
        let account = self.create_account(&words, pass_phrase, wallet_app, config, source)?;
        Ok(Wallet::new(account, Some(words)))
    }

    /// Restores a wallet from a parsed envelope.
    ///
    /// The target wallet app is read from `account.wallet`, then from a
    /// top-level `wallet` attribute, and otherwise defaults to
    /// [`Protocol::default_target_wallet`].
    ///
    /// # Errors
    ///
    /// - Envelope validation errors (see [`validate_envelope`]).
    /// - [`PaperWalletError::Serialization`] if the wallet app attribute
    ///   is not a string.
    /// - Every error of [`Account::restore`].
    pub fn restore_wallet(
        &self,
        envelope: &Value,
        pass_phrase: &str,
        config: &JsonConfig,
    ) -> Result<Wallet> {
        let record = validate_envelope(envelope)?;
        let wallet_app = match record.get(JSON_WALLET).or_else(|| envelope.get(JSON_WALLET)) {
            Some(Value::String(app)) => app.as_str(),
            Some(_) => {
                return Err(PaperWalletError::Serialization {
                    reason: format!("'{JSON_WALLET}' attribute must be a string"),
                })
            }
            None => self.default_target_wallet(),
        };

        let account = self.restore_account(record, pass_phrase, wallet_app, config)?;
        Ok(Wallet::new(account, None))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.network)
    }
}
