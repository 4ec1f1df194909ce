//! Address checksums: Base58Check for Bitcoin, EIP-55 mixed case for
//! Ethereum.
//!
//! Base58Check appends the first 4 bytes of `SHA-256(SHA-256(payload))`
//! to `version || payload` before Base58 encoding. EIP-55 encodes the
//! checksum into the letter case of the hex address.

use paperwallet_types::{PaperWalletError, Result};

use crate::hash::{double_sha256, keccak256};

/// Number of checksum bytes appended by Base58Check.
const CHECKSUM_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Base58Check
// ---------------------------------------------------------------------------

/// Encodes `version || payload || checksum` as Base58.
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);

    let digest = double_sha256(&data);
    data.extend_from_slice(&digest[..CHECKSUM_LEN]);

    bs58::encode(data).into_string()
}

/// Decodes a Base58Check string into its version byte and payload.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if:
/// - The string is not valid Base58.
/// - The decoded data is shorter than version plus checksum.
/// - The checksum does not match.
pub fn base58check_decode(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| PaperWalletError::CryptoError {
            reason: format!("base58 decoding failed: {e}"),
        })?;

    if data.len() < 1 + CHECKSUM_LEN {
        return Err(PaperWalletError::CryptoError {
            reason: format!("base58check data too short: {} bytes", data.len()),
        });
    }

    let (body, provided) = data.split_at(data.len() - CHECKSUM_LEN);
    let digest = double_sha256(body);
    if provided != &digest[..CHECKSUM_LEN] {
        return Err(PaperWalletError::CryptoError {
            reason: "base58check checksum mismatch".into(),
        });
    }

    Ok((body[0], body[1..].to_vec()))
}

// ---------------------------------------------------------------------------
// EIP-55
// ---------------------------------------------------------------------------

/// Formats a 20-byte Ethereum address with its EIP-55 checksum.
///
/// Each hex letter is uppercased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or greater. The result carries the
/// `0x` prefix.
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
