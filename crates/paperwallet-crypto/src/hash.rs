//! Hash functions used by address derivation.
//!
//! Bitcoin addresses use SHA-256 and RIPEMD-160, Ethereum addresses use
//! Keccak-256 (the pre-standard SHA3 padding). All functions return
//! fixed-size arrays.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let result = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Computes `SHA-256(SHA-256(data))`, the Bitcoin checksum hash.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Computes `RIPEMD-160(SHA-256(data))`, the Bitcoin public key hash.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let result = Ripemd160::digest(sha256(data));
    let mut out = [0u8; 20];
    out.copy_from_slice(&result);
    out
}

/// Computes the Keccak-256 digest of `data`.
///
/// This is the original Keccak submission, not NIST SHA3-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
