//! Core shared types for the paper wallet engine.
//!
//! This crate defines the enums every other crate agrees on (protocol
//! kind and network), the central error type, and application
//! configuration. No other crate should define shared types; everything
//! lives here.

pub mod config;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Target network for derived addresses.
///
/// Only Bitcoin encodes the network into its addresses (mainnet vs.
/// testnet version byte). Ethereum and IOTA addresses are identical on
/// every network, but the value is still carried in the wallet envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Main network.
    Production,
    /// Public test network.
    Test,
    /// Local regression or unit-test network.
    Local,
}

impl Network {
    /// All networks in declaration order.
    pub const ALL: [Network; 3] = [Network::Production, Network::Test, Network::Local];

    /// Canonical name as written to wallet files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Production => "Production",
            Network::Test => "Test",
            Network::Local => "Local",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = PaperWalletError;

    /// Parses a network name, ignoring ASCII case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaperWalletError::UnknownNetwork { name: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// ProtocolKind
// ---------------------------------------------------------------------------

/// The blockchain protocols a paper wallet can be generated for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ProtocolKind {
    Bitcoin,
    Ethereum,
    Iota,
}

impl ProtocolKind {
    /// All protocol kinds in declaration order.
    pub const ALL: [ProtocolKind; 3] =
        [ProtocolKind::Bitcoin, ProtocolKind::Ethereum, ProtocolKind::Iota];

    /// Canonical name as written to wallet files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Bitcoin => "Bitcoin",
            ProtocolKind::Ethereum => "Ethereum",
            ProtocolKind::Iota => "Iota",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = PaperWalletError;

    /// Parses a protocol name, ignoring ASCII case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProtocolKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaperWalletError::UnknownProtocol { name: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// PaperWalletError
// ---------------------------------------------------------------------------

/// Central error type for the paper wallet engine.
///
/// All crates in the workspace report failures through this enum.
/// Variants fall into four groups: validation (bad user input),
/// structural (malformed wallet files), cryptographic (decryption), and
/// consistency (a restored secret does not reproduce its address).
#[derive(Debug, Error)]
pub enum PaperWalletError {
    /// Entropy is not 16, 20, 24, 28 or 32 bytes long.
    #[error("invalid entropy length: {bytes} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength {
        /// Offending length in bytes.
        bytes: usize,
    },

    /// The trailing checksum bits of a mnemonic do not match its entropy.
    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    /// A mnemonic word is not part of the BIP39 English wordlist.
    #[error("unknown mnemonic word '{word}'")]
    UnknownMnemonicWord {
        /// The unrecognized word.
        word: String,
    },

    /// The mnemonic has the wrong number of words.
    #[error("invalid mnemonic length: {words} words (expected 12..=24, multiple of 3)")]
    InvalidMnemonicLength {
        /// Number of words supplied.
        words: usize,
    },

    /// The mnemonic failed protocol-specific seed validation.
    #[error("mnemonic fails to verify: {reason}")]
    InvalidMnemonicChecksum {
        /// Underlying codec failure.
        reason: String,
    },

    /// The requested wallet application is not supported by the protocol.
    #[error("unsupported target wallet '{wallet}'")]
    UnsupportedWalletApp {
        /// Requested wallet application name.
        wallet: String,
    },

    /// The protocol name does not match any known protocol.
    #[error("unknown protocol '{name}'")]
    UnknownProtocol {
        /// The unrecognized name.
        name: String,
    },

    /// The network name does not match any known network.
    #[error("unknown network '{name}'")]
    UnknownNetwork {
        /// The unrecognized name.
        name: String,
    },

    /// A wallet envelope or account record lacks a required field.
    #[error("malformed wallet: missing '{missing_field}' attribute")]
    MalformedEnvelope {
        /// Name of the missing JSON key.
        missing_field: String,
    },

    /// The wallet envelope carries an unknown version tag.
    #[error("unsupported wallet version '{found}'")]
    UnsupportedVersion {
        /// Version tag found in the envelope.
        found: String,
    },

    /// An encrypted account was restored without a passphrase.
    #[error("no pass phrase provided for encrypted account")]
    MissingPassphrase,

    /// An encrypted account record has no IV attribute.
    #[error("encrypted account has no iv attribute")]
    MissingIv,

    /// Decryption failed. Deliberately carries no detail.
    #[error("failed to decrypt account secret")]
    DecryptionFailure,

    /// The address derived from the restored secret differs from the stored one.
    #[error("address verification failure: expected '{expected}' but found '{found}'")]
    AddressVerificationFailure {
        /// Address re-derived from the secret.
        expected: String,
        /// Address stored in the wallet file.
        found: String,
    },

    /// A cryptographic primitive failed (key derivation, hashing, encoding).
    #[error("crypto error: {reason}")]
    CryptoError {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// A configuration value is invalid or missing.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("io error: {reason}")]
    Io {
        /// Human-readable description of the I/O failure.
        reason: String,
    },
}

/// Convenience alias used across all crates.
pub type Result<T> = std::result::Result<T, PaperWalletError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
