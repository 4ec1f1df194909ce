//! Balanced ternary helpers for IOTA seeds and addresses.
//!
//! A trit is one of `-1`, `0`, `1`. Three trits form a tryte, written
//! as one character of [`TRYTE_ALPHABET`]: `9` is zero, `A`..`M` are
//! 1..13 and `N`..`Z` are -13..-1. Trits are little-endian within a
//! tryte and across a tryte string.

use paperwallet_types::{PaperWalletError, Result};

/// The 27 tryte characters in value order.
pub const TRYTE_ALPHABET: &str = "9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of trits in one hash.
pub const HASH_LENGTH: usize = 243;

/// Number of trytes in one hash.
pub const HASH_TRYTES: usize = HASH_LENGTH / 3;

/// Returns the signed value (-13..=13) of a tryte character.
pub fn tryte_value(c: char) -> Option<i8> {
    let idx = TRYTE_ALPHABET.find(c)? as i8;
    Some(if idx > 13 { idx - 27 } else { idx })
}

/// Converts a tryte string into trits.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] on a character outside
/// [`TRYTE_ALPHABET`].
pub fn trytes_to_trits(trytes: &str) -> Result<Vec<i8>> {
    let mut trits = Vec::with_capacity(trytes.len() * 3);
    for c in trytes.chars() {
        let mut value = tryte_value(c).ok_or_else(|| PaperWalletError::CryptoError {
            reason: format!("invalid tryte character '{c}'"),
        })?;
        for _ in 0..3 {
            let trit = (value + 1).rem_euclid(3) - 1;
            trits.push(trit);
            value = (value - trit) / 3;
        }
    }
    Ok(trits)
}

/// Converts trits into a tryte string. A trailing partial tryte is
/// padded with zero trits.
pub fn trits_to_trytes(trits: &[i8]) -> String {
    let alphabet = TRYTE_ALPHABET.as_bytes();
    trits
        .chunks(3)
        .map(|chunk| {
            let value = chunk
                .iter()
                .rev()
                .fold(0i8, |acc, &trit| acc * 3 + trit);
            char::from(alphabet[value.rem_euclid(27) as usize])
        })
        .collect()
}
