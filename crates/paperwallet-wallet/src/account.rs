//! A single derived account: address, secret and the wallet app it
//! targets.
//!
//! Every account upholds `address == derive_address(secret)`. Accounts
//! are built either from a mnemonic ([`Account::create`]) or from a
//! stored account record ([`Account::restore`]); restoring re-derives
//! the address and refuses a record whose stored address differs.

use std::fmt;

use paperwallet_crypto::cipher::{CipherParams, EncryptedSecret, SecretCipher};
use paperwallet_crypto::entropy::EntropySource;
use paperwallet_types::{Network, PaperWalletError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::{Zeroize, Zeroizing};

use crate::bitcoin::Chain;
use crate::derivation::ProtocolDerivation;
use crate::protocol::Protocol;

/// JSON key of the target wallet application.
pub const JSON_WALLET: &str = "wallet";
/// JSON key of the account address.
pub const JSON_ADDRESS: &str = "address";
/// JSON key of the (possibly encrypted) secret.
pub const JSON_SECRET: &str = "secret";
/// JSON key of the encryption flag.
pub const JSON_ENCRYPTED: &str = "encrypted";
/// JSON key of the Base64 IV.
pub const JSON_IV: &str = "iv";

// ---------------------------------------------------------------------------
// AccountRecord
// ---------------------------------------------------------------------------

/// The `account` object of a wallet file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub wallet: String,
    pub address: String,
    /// Plaintext secret, or Base64 ciphertext when `encrypted` is set.
    pub secret: String,
    pub encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<Chain>,
}

impl Drop for AccountRecord {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A derived account for one protocol and wallet application.
#[derive(Clone)]
pub struct Account {
    address: String,
    secret: Zeroizing<String>,
    pass_phrase: Zeroizing<String>,
    wallet: &'static str,
    protocol: Protocol,
    chains: Vec<Chain>,
    encrypted: Option<EncryptedSecret>,
}

impl Account {
    /// Derives a new account from a mnemonic sentence.
    ///
    /// When `pass_phrase` is non-empty the secret is encrypted right
    /// away with `cipher`, using an IV drawn from `source`.
    ///
    /// # Errors
    ///
    /// - [`PaperWalletError::UnsupportedWalletApp`] if `wallet` is not
    ///   supported by the protocol.
    /// - [`PaperWalletError::CryptoError`] if derivation or encryption
    ///   fails.
    pub fn create<E: EntropySource + ?Sized>(
        protocol: Protocol,
        words: &[String],
        pass_phrase: &str,
        wallet: &str,
        cipher: &CipherParams,
        source: &mut E,
    ) -> Result<Self> {
        let derivation = protocol.derivation();
        let wallet = derivation.canonical_wallet(wallet)?;

        let secret = Zeroizing::new(derivation.derive_secret(words, pass_phrase)?);
        let address = derivation.derive_address(&secret, protocol.network(), wallet)?;
        let chains = derivation.chains(&secret, protocol.network())?;

        let encrypted = if pass_phrase.is_empty() {
            None
        } else {
            Some(SecretCipher::with_params(pass_phrase, cipher)?.encrypt(&secret, source)?)
        };

        tracing::debug!(%protocol, wallet, %address, "account created");

        Ok(Self {
            address,
            secret,
            pass_phrase: Zeroizing::new(pass_phrase.to_string()),
            wallet,
            protocol,
            chains,
            encrypted,
        })
    }

    /// Restores an account from the `account` object of a wallet file.
    ///
    /// # Validation order
    ///
    /// 1. `address`, `secret` and `encrypted` must be present.
    /// 2. If `encrypted` is true: a non-empty passphrase, then an `iv`,
    ///    then a successful decryption.
    /// 3. The address re-derived from the secret must equal the stored
    ///    address.
    ///
    /// # Errors
    ///
    /// - [`PaperWalletError::MalformedEnvelope`] for a missing attribute.
    /// - [`PaperWalletError::Serialization`] for an attribute of the
    ///   wrong JSON type.
    /// - [`PaperWalletError::MissingPassphrase`],
    ///   [`PaperWalletError::MissingIv`] and
    ///   [`PaperWalletError::DecryptionFailure`] for encrypted records.
    /// - [`PaperWalletError::AddressVerificationFailure`] if the secret
    ///   does not reproduce the stored address.
    /// - [`PaperWalletError::UnsupportedWalletApp`] if `wallet` is not
    ///   supported by the protocol.
    pub fn restore(
        protocol: Protocol,
        record: &Map<String, Value>,
        pass_phrase: &str,
        wallet: &str,
        cipher: &CipherParams,
    ) -> Result<Self> {
        let derivation = protocol.derivation();
        let wallet = derivation.canonical_wallet(wallet)?;

        let stored_address = string_field(record, JSON_ADDRESS)?;
        let stored_secret = string_field(record, JSON_SECRET)?;
        let is_encrypted = bool_field(record, JSON_ENCRYPTED)?;

        let (secret, encrypted) = if is_encrypted {
            if pass_phrase.is_empty() {
                return Err(PaperWalletError::MissingPassphrase);
            }
            let iv = match record.get(JSON_IV) {
                Some(Value::String(iv)) => iv,
                Some(_) => return Err(wrong_type(JSON_IV, "a string")),
                None => return Err(PaperWalletError::MissingIv),
            };
            let plaintext = SecretCipher::with_params(pass_phrase, cipher)?.decrypt(stored_secret, iv)?;
            let sealed = EncryptedSecret {
                ciphertext: stored_secret.to_string(),
                iv: iv.clone(),
            };
            (Zeroizing::new(plaintext), Some(sealed))
        } else {
            (Zeroizing::new(stored_secret.to_string()), None)
        };

        let derived = derivation.derive_address(&secret, protocol.network(), wallet)?;
        if derived != stored_address {
            tracing::warn!(
                %protocol,
                expected = %derived,
                found = %stored_address,
                "address verification failed"
            );
            return Err(PaperWalletError::AddressVerificationFailure {
                expected: derived,
                found: stored_address.to_string(),
            });
        }

        let chains = derivation.chains(&secret, protocol.network())?;
        tracing::debug!(%protocol, wallet, address = %derived, "account restored");

        Ok(Self {
            address: derived,
            secret,
            pass_phrase: Zeroizing::new(pass_phrase.to_string()),
            wallet,
            protocol,
            chains,
            encrypted,
        })
    }

    /// Builds the `account` object written to wallet files.
    ///
    /// The secret is written encrypted whenever the account has a
    /// passphrase.
    pub fn to_record(&self) -> AccountRecord {
        let (secret, encrypted, iv) = match &self.encrypted {
            Some(sealed) => (sealed.ciphertext.clone(), true, Some(sealed.iv.clone())),
            None => (self.secret.to_string(), false, None),
        };
        AccountRecord {
            wallet: self.wallet.to_string(),
            address: self.address.clone(),
            secret,
            encrypted,
            iv,
            chains: self.chains.clone(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The plaintext account secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn pass_phrase(&self) -> &str {
        &self.pass_phrase
    }

    /// Canonical name of the target wallet application.
    pub fn wallet(&self) -> &'static str {
        self.wallet
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn network(&self) -> Network {
        self.protocol.network()
    }

    /// Receive and change chain previews (Bitcoin only).
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Ciphertext and IV of the secret, if the account is encrypted.
    pub fn encrypted(&self) -> Option<&EncryptedSecret> {
        self.encrypted.as_ref()
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted.is_some()
    }

    /// Setup instructions for the target wallet application.
    pub fn wallet_info(&self) -> &'static str {
        self.protocol.derivation().wallet_info(self.wallet)
    }
}

/// Accounts are equal when secret, passphrase, address and protocol
/// agree. Wallet app, chains and ciphertext are not compared.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        *self.secret == *other.secret
            && *self.pass_phrase == *other.pass_phrase
            && self.address == other.address
            && self.protocol == other.protocol
    }
}

impl Eq for Account {}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("wallet", &self.wallet)
            .field("protocol", &self.protocol)
            .field("encrypted", &self.is_encrypted())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn wrong_type(field: &str, expected: &str) -> PaperWalletError {
    PaperWalletError::Serialization {
        reason: format!("'{field}' attribute must be {expected}"),
    }
}

fn required<'a>(record: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| PaperWalletError::MalformedEnvelope {
            missing_field: field.to_string(),
        })
}

fn string_field<'a>(record: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    required(record, field)?
        .as_str()
        .ok_or_else(|| wrong_type(field, "a string"))
}

fn bool_field(record: &Map<String, Value>, field: &str) -> Result<bool> {
    required(record, field)?
        .as_bool()
        .ok_or_else(|| wrong_type(field, "a boolean"))
}
