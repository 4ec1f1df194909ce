//! BIP32 secp256k1 hierarchical deterministic key derivation.
//!
//! Wraps `bip32::XPrv` for private-parent to private-child derivation
//! from a BIP39 seed, tracking the path each key was derived along.
//! Both hardened and normal indices are supported.
//!
//! # Derivation path format
//!
//! Paths are sequences of raw child indices. A hardened index has the
//! top bit set (see [`hardened`]). [`parse_derivation_path`] accepts
//! the textual form:
//!
//! ```text
//! m/44'/60'/0'/0/0
//! ```
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>

use bip32::{ChildNumber, XPrv};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use paperwallet_types::{PaperWalletError, Result};
use zeroize::Zeroizing;

use crate::mnemonic::Seed;

/// The hardened index offset (0x80000000) per BIP32.
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// Returns `index` with the hardened bit set.
pub const fn hardened(index: u32) -> u32 {
    index | HARDENED_BIT
}

// ---------------------------------------------------------------------------
// ExtendedPrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 extended private key together with the path it was
/// derived along. The key material zeroizes itself on drop.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    xprv: XPrv,
    path: Vec<u32>,
}

// ExtendedPrivateKey does not implement Debug to prevent leakage.

impl ExtendedPrivateKey {
    /// Generates the master key from a BIP39 seed.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] if the seed yields an
    /// invalid master key.
    pub fn master(seed: &Seed) -> Result<Self> {
        Self::master_from_bytes(seed.as_bytes())
    }

    /// Generates the master key from raw seed bytes (16, 32 or 64
    /// bytes).
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] for an unsupported
    /// seed length or an invalid master key.
    pub fn master_from_bytes(seed: &[u8]) -> Result<Self> {
        let xprv = XPrv::new(seed).map_err(|e| PaperWalletError::CryptoError {
            reason: format!("failed to create master key: {e}"),
        })?;
        Ok(Self {
            xprv,
            path: Vec::new(),
        })
    }

    /// Derives the child at `index`. Indices with [`HARDENED_BIT`] set
    /// derive hardened children.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] for the (negligibly
    /// rare) invalid child.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let child_number = ChildNumber::new(index & !HARDENED_BIT, index & HARDENED_BIT != 0)
            .map_err(|e| PaperWalletError::CryptoError {
                reason: format!("invalid child index {index:#x}: {e}"),
            })?;

        let xprv = self
            .xprv
            .derive_child(child_number)
            .map_err(|e| PaperWalletError::CryptoError {
                reason: format!("child derivation failed at index {index:#x}: {e}"),
            })?;

        let mut path = self.path.clone();
        path.push(index);

        Ok(Self { xprv, path })
    }

    /// Derives along every index of `path` in turn.
    ///
    /// # Errors
    ///
    /// Same as [`ExtendedPrivateKey::derive_child`].
    pub fn derive_path(&self, path: &[u32]) -> Result<Self> {
        let mut current = self.clone();
        for &index in path {
            current = current.derive_child(index)?;
        }
        Ok(current)
    }

    /// The indices this key was derived along, from the master key.
    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Raw 32-byte private key.
    pub fn private_key(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.xprv.private_key().to_bytes().into())
    }

    /// Chain code.
    pub fn chain_code(&self) -> [u8; 32] {
        self.xprv.attrs().chain_code
    }

    /// SEC1 compressed public key (33 bytes).
    ///
    /// # Errors
    ///
    /// Never fails for a key produced by this type; the `Result` keeps
    /// the signature aligned with [`Self::public_key_uncompressed`].
    pub fn public_key_compressed(&self) -> Result<[u8; 33]> {
        Ok(self.xprv.public_key().to_bytes())
    }

    /// SEC1 uncompressed public key (65 bytes, leading `0x04`).
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] if the key is invalid.
    pub fn public_key_uncompressed(&self) -> Result<[u8; 65]> {
        let point = self.secret_key()?.public_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(point.as_bytes());
        Ok(out)
    }

    fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(self.private_key().as_slice()).map_err(|e| {
            PaperWalletError::CryptoError {
                reason: format!("invalid secp256k1 private key: {e}"),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Path formatting
// ---------------------------------------------------------------------------

/// Parses a path such as `m/44'/0'/0'/0/1` into raw indices.
///
/// Hardened components end with `'`, `h` or `H`. A bare `m` yields the
/// empty path.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if the path does not start
/// with `m` or `M`, has an empty component, or an index is out of range.
pub fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    let trimmed = path.trim();
    let mut parts = trimmed.split('/');

    match parts.next() {
        Some("m") | Some("M") => {}
        _ => {
            return Err(PaperWalletError::CryptoError {
                reason: format!("derivation path must start with 'm', got '{trimmed}'"),
            })
        }
    }

    let mut indices = Vec::new();
    for part in parts {
        let part = part.trim();
        let (num_str, is_hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
            Some(stripped) => (stripped, true),
            None => (part, false),
        };

        let index: u32 = num_str.parse().map_err(|e| PaperWalletError::CryptoError {
            reason: format!("invalid index '{part}' in path: {e}"),
        })?;

        if index >= HARDENED_BIT {
            return Err(PaperWalletError::CryptoError {
                reason: format!("index {index} exceeds maximum ({})", HARDENED_BIT - 1),
            });
        }

        indices.push(if is_hardened { hardened(index) } else { index });
    }

    Ok(indices)
}

/// Formats a path as `M/44H/0H/0H/0`, the notation wallet files use
/// for public derivation chains.
pub fn format_public_path(path: &[u32]) -> String {
    let mut out = String::from("M");
    for &index in path {
        out.push('/');
        if index & HARDENED_BIT != 0 {
            out.push_str(&format!("{}H", index & !HARDENED_BIT));
        } else {
            out.push_str(&index.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
