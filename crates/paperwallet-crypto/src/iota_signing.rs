//! IOTA address generation from an 81-tryte seed.
//!
//! `seed -> private key -> key digests -> address`, all hashed with
//! [`Kerl`]. The optional checksum is the last 9 trytes of the Kerl
//! hash of the address.

use paperwallet_types::{PaperWalletError, Result};

use crate::kerl::Kerl;
use crate::ternary::{trits_to_trytes, trytes_to_trits, HASH_LENGTH, HASH_TRYTES};

/// Length of an IOTA seed in trytes.
pub const SEED_LENGTH: usize = 81;

/// Security level used for generated addresses.
pub const SECURITY_LEVEL_DEFAULT: usize = 2;

/// Length of the address checksum in trytes.
pub const CHECKSUM_LENGTH: usize = 9;

/// Hash chunks per key fragment.
const FRAGMENT_CHUNKS: usize = 27;

/// Trits per key fragment.
const FRAGMENT_LENGTH: usize = FRAGMENT_CHUNKS * HASH_LENGTH;

/// Hashing rounds applied to each key chunk to form its digest.
const CHUNK_ROUNDS: usize = 26;

/// Derives the private key trits for `index` at `security`.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if the seed is not a
/// multiple of 243 trits or `security` is not 1, 2 or 3.
pub fn key(seed: &[i8], index: u64, security: usize) -> Result<Vec<i8>> {
    if !(1..=3).contains(&security) {
        return Err(PaperWalletError::CryptoError {
            reason: format!("security level must be 1, 2 or 3, got {security}"),
        });
    }

    let mut subseed = seed.to_vec();
    for _ in 0..index {
        increment_trits(&mut subseed);
    }

    let mut kerl = Kerl::new();
    kerl.absorb(&subseed)?;
    let subseed = kerl.squeeze(subseed.len())?;

    kerl.reset();
    kerl.absorb(&subseed)?;
    kerl.squeeze(security * FRAGMENT_LENGTH)
}

/// Hashes each key fragment down to one 243-trit digest.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if `key` is not a whole
/// number of fragments.
pub fn digests(key: &[i8]) -> Result<Vec<i8>> {
    if key.is_empty() || key.len() % FRAGMENT_LENGTH != 0 {
        return Err(PaperWalletError::CryptoError {
            reason: format!("key length {} is not a multiple of {FRAGMENT_LENGTH}", key.len()),
        });
    }

    let mut out = Vec::with_capacity(key.len() / FRAGMENT_CHUNKS);
    let mut kerl = Kerl::new();
    for fragment in key.chunks(FRAGMENT_LENGTH) {
        let mut hashed = Vec::with_capacity(FRAGMENT_LENGTH);
        for chunk in fragment.chunks(HASH_LENGTH) {
            let mut buffer = chunk.to_vec();
            for _ in 0..CHUNK_ROUNDS {
                kerl.reset();
                kerl.absorb(&buffer)?;
                buffer = kerl.squeeze(HASH_LENGTH)?;
            }
            hashed.extend_from_slice(&buffer);
        }

        kerl.reset();
        kerl.absorb(&hashed)?;
        out.extend(kerl.squeeze(HASH_LENGTH)?);
    }
    Ok(out)
}

/// Hashes key digests into 243 address trits.
///
/// # Errors
///
/// Same as [`Kerl::absorb`].
pub fn address_trits(digests: &[i8]) -> Result<Vec<i8>> {
    let mut kerl = Kerl::new();
    kerl.absorb(digests)?;
    kerl.squeeze(HASH_LENGTH)
}

/// Computes the 9-tryte checksum of an 81-tryte address.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if `address` is not 81
/// valid trytes.
pub fn checksum(address: &str) -> Result<String> {
    if address.len() != HASH_TRYTES {
        return Err(PaperWalletError::CryptoError {
            reason: format!("address must be {HASH_TRYTES} trytes, got {}", address.len()),
        });
    }
    let mut kerl = Kerl::new();
    kerl.absorb(&trytes_to_trits(address)?)?;
    let hash = trits_to_trytes(&kerl.squeeze(HASH_LENGTH)?);
    Ok(hash[HASH_TRYTES - CHECKSUM_LENGTH..].to_string())
}

/// Generates the address at `index` for `seed`.
///
/// With `with_checksum` the result is 90 trytes, otherwise 81.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if the seed contains
/// non-tryte characters or has the wrong length.
pub fn new_address(seed: &str, security: usize, index: u64, with_checksum: bool) -> Result<String> {
    if seed.len() != SEED_LENGTH {
        return Err(PaperWalletError::CryptoError {
            reason: format!("IOTA seed must be {SEED_LENGTH} trytes, got {}", seed.len()),
        });
    }

    let seed_trits = trytes_to_trits(seed)?;
    let private_key = key(&seed_trits, index, security)?;
    let mut address = trits_to_trytes(&address_trits(&digests(&private_key)?)?);

    if with_checksum {
        let tail = checksum(&address)?;
        address.push_str(&tail);
    }
    Ok(address)
}

/// Adds one to a little-endian balanced trit number, wrapping.
fn increment_trits(trits: &mut [i8]) {
    for trit in trits.iter_mut() {
        *trit += 1;
        if *trit > 1 {
            *trit = -1;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str =
        "WZGTVNXWXTJ9SBNRYWAPZW99DPZQTDDMTRXZYOX9XRMBY9VFRGNTYGAGSJSRGDLOYCINVANLXQJGHYVUG";
    const ADDRESS: &str = "RCJXXBJJGBXOCCRGVZYITIBTVRGYQZDTJIZELVWTYJNHFLKFQNYGCJNXLWXPJDCICQJBCGGUOVNUTQGKYFZZSOCJED";

    #[test]
    fn known_address_with_checksum() -> std::result::Result<(), PaperWalletError> {
        let address = new_address(SEED, SECURITY_LEVEL_DEFAULT, 0, true)?;
        assert_eq!(address, ADDRESS);
        Ok(())
    }

    #[test]
    fn checksum_is_tail_of_known_address() -> std::result::Result<(), PaperWalletError> {
        let bare = new_address(SEED, SECURITY_LEVEL_DEFAULT, 0, false)?;
        assert_eq!(bare.len(), 81);
        assert_eq!(&ADDRESS[..81], bare);
        assert_eq!(checksum(&bare)?, &ADDRESS[81..]);
        Ok(())
    }

    #[test]
    fn index_changes_address() -> std::result::Result<(), PaperWalletError> {
        let first = new_address(SEED, 1, 0, false)?;
        let second = new_address(SEED, 1, 1, false)?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn increment_carries() {
        let mut trits = vec![1i8, 1, 0];
        increment_trits(&mut trits);
        assert_eq!(trits, vec![-1, -1, 1]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(new_address("ABC", 2, 0, true).is_err());
        assert!(new_address(&"a".repeat(81), 2, 0, true).is_err());
        assert!(new_address(SEED, 4, 0, true).is_err());
        assert!(checksum("ABC").is_err());
    }
}
