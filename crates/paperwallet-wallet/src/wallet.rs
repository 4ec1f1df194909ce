//! The versioned wallet envelope and the crate's outward entry points.
//!
//! A [`Wallet`] wraps one [`Account`] plus, for freshly created wallets,
//! the mnemonic it was derived from. On disk it is a JSON envelope:
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "protocol": "Bitcoin",
//!   "network": "Production",
//!   "account": {
//!     "wallet": "Electrum",
//!     "address": "14r2TsZ75SHANYaz3WjjYtEfhnVJKcvp3Z",
//!     "secret": "<plaintext or Base64 ciphertext>",
//!     "encrypted": true,
//!     "iv": "<Base64, only when encrypted>",
//!     "chains": []
//!   }
//! }
//! ```

use std::fmt;

use paperwallet_crypto::entropy::EntropySource;
use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::account::{Account, AccountRecord};
use crate::json_config::JsonConfig;
use crate::protocol::Protocol;
use crate::registry::{ProtocolRegistry, JSON_NETWORK, JSON_PROTOCOL};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Envelope version written and accepted by this crate.
pub const WALLET_VERSION: &str = "2.0";

/// JSON key of the envelope version.
pub const JSON_VERSION: &str = "version";

/// JSON key of the account object.
pub const JSON_ACCOUNT: &str = "account";

/// Extension of wallet files.
pub const FILE_EXTENSION: &str = "json";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WalletEnvelope {
    version: &'static str,
    protocol: ProtocolKind,
    network: Network,
    account: AccountRecord,
}

/// Checks the envelope structure and returns its account object.
///
/// # Validation order
///
/// 1. `version` is present and equals [`WALLET_VERSION`].
/// 2. `protocol` is present.
/// 3. `network` is present.
/// 4. `account` is present and is an object.
///
/// # Errors
///
/// - [`PaperWalletError::Serialization`] if the envelope is not a JSON
///   object.
/// - [`PaperWalletError::MalformedEnvelope`] naming the first missing
///   attribute.
/// - [`PaperWalletError::UnsupportedVersion`] for any other version.
pub fn validate_envelope(envelope: &Value) -> Result<&Map<String, Value>> {
    let object = envelope
        .as_object()
        .ok_or_else(|| PaperWalletError::Serialization {
            reason: "wallet envelope is not a JSON object".into(),
        })?;

    let version = required(object, JSON_VERSION)?;
    if version.as_str() != Some(WALLET_VERSION) {
        let found = match version {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(PaperWalletError::UnsupportedVersion { found });
    }

    required(object, JSON_PROTOCOL)?;
    required(object, JSON_NETWORK)?;

    required(object, JSON_ACCOUNT)?
        .as_object()
        .ok_or_else(|| PaperWalletError::MalformedEnvelope {
            missing_field: JSON_ACCOUNT.to_string(),
        })
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| PaperWalletError::MalformedEnvelope {
            missing_field: field.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A paper wallet: one account and, when freshly created, its mnemonic.
///
/// Two wallets are equal when their accounts are equal.
pub struct Wallet {
    account: Account,
    mnemonic_words: Option<Zeroizing<Vec<String>>>,
}

impl Wallet {
    pub(crate) fn new(account: Account, mnemonic_words: Option<Vec<String>>) -> Self {
        Self {
            account,
            mnemonic_words: mnemonic_words.map(Zeroizing::new),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn protocol(&self) -> Protocol {
        self.account.protocol()
    }

    /// The mnemonic, present only for wallets created in this process.
    pub fn mnemonic_words(&self) -> Option<&[String]> {
        self.mnemonic_words.as_deref().map(Vec::as_slice)
    }

    pub fn secret(&self) -> &str {
        self.account.secret()
    }

    pub fn pass_phrase(&self) -> &str {
        self.account.pass_phrase()
    }

    /// Human-readable name of the account secret ("Mnemonic Seed",
    /// "Private Key" or "Seed").
    pub fn secret_label(&self) -> &'static str {
        self.protocol().secret_label()
    }

    /// File name without extension: the account address.
    pub fn file_base_name(&self) -> &str {
        self.account.address()
    }

    /// `<address>.json`.
    pub fn file_name(&self) -> String {
        format!("{}.{FILE_EXTENSION}", self.file_base_name())
    }

    fn envelope(&self) -> WalletEnvelope {
        let protocol = self.protocol();
        WalletEnvelope {
            version: WALLET_VERSION,
            protocol: protocol.kind(),
            network: protocol.network(),
            account: self.account.to_record(),
        }
    }

    /// The wallet as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::Serialization`] if encoding fails.
    pub fn to_envelope(&self) -> Result<Value> {
        serde_json::to_value(self.envelope()).map_err(|e| PaperWalletError::Serialization {
            reason: format!("failed to encode wallet envelope: {e}"),
        })
    }

    /// The wallet as JSON text, pretty-printed if `config.pretty`.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::Serialization`] if encoding fails.
    pub fn to_json(&self, config: &JsonConfig) -> Result<String> {
        let envelope = self.envelope();
        let json = if config.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        json.map_err(|e| PaperWalletError::Serialization {
            reason: format!("failed to encode wallet envelope: {e}"),
        })
    }
}

impl PartialEq for Wallet {
    fn eq(&self, other: &Self) -> bool {
        self.account == other.account
    }
}

impl Eq for Wallet {}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("account", &self.account)
            .field("has_mnemonic", &self.mnemonic_words.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Creates a wallet for `protocol`. See [`Protocol::create_wallet`].
pub fn create_wallet<E: EntropySource + ?Sized>(
    protocol: Protocol,
    words: Option<&[String]>,
    pass_phrase: &str,
    wallet_app: Option<&str>,
    entropy_bits: usize,
    config: &JsonConfig,
    source: &mut E,
) -> Result<Wallet> {
    protocol.create_wallet(words, pass_phrase, wallet_app, entropy_bits, config, source)
}

/// Restores a wallet from raw envelope bytes.
///
/// # Errors
///
/// - [`PaperWalletError::Serialization`] for empty or unparsable input.
/// - Envelope, registry and account errors, in that order.
pub fn restore_wallet(envelope: &[u8], pass_phrase: &str, config: &JsonConfig) -> Result<Wallet> {
    let value: Value = serde_json::from_slice(envelope).map_err(|e| PaperWalletError::Serialization {
        reason: format!("failed to parse wallet envelope: {e}"),
    })?;

    validate_envelope(&value)?;
    let protocol = ProtocolRegistry::resolve_from_envelope(&value)?;
    protocol.restore_wallet(&value, pass_phrase, config)
}
