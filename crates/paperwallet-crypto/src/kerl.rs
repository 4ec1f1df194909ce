//! Kerl: the Keccak-384 sponge over 243-trit chunks.
//!
//! Each 243-trit chunk (last trit forced to zero) is read as a signed
//! balanced ternary integer and fed to Keccak-384 as 48 big-endian
//! two's complement bytes. Squeezing converts the 48-byte digest back
//! to 243 trits, then re-seeds the hasher with the bitwise complement
//! of the digest so that consecutive squeezes differ.

use paperwallet_types::{PaperWalletError, Result};
use sha3::{Digest, Keccak384};

use crate::ternary::HASH_LENGTH;

/// Bytes in one Keccak-384 digest.
pub const BYTE_HASH_LENGTH: usize = 48;

const LIMBS: usize = BYTE_HASH_LENGTH / 4;

/// Kerl sponge.
#[derive(Clone, Default)]
pub struct Kerl {
    keccak: Keccak384,
}

impl Kerl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        Digest::reset(&mut self.keccak);
    }

    /// Absorbs `trits`, whose length must be a multiple of 243.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] on a bad length.
    pub fn absorb(&mut self, trits: &[i8]) -> Result<()> {
        check_length(trits.len())?;
        for chunk in trits.chunks(HASH_LENGTH) {
            let mut state = [0i8; HASH_LENGTH];
            state.copy_from_slice(chunk);
            state[HASH_LENGTH - 1] = 0;
            self.keccak.update(trits_to_bytes(&state));
        }
        Ok(())
    }

    /// Squeezes `length` trits, a multiple of 243.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] on a bad length.
    pub fn squeeze(&mut self, length: usize) -> Result<Vec<i8>> {
        check_length(length)?;
        let mut out = Vec::with_capacity(length);
        for _ in 0..length / HASH_LENGTH {
            let digest = self.keccak.finalize_reset();
            let mut bytes = [0u8; BYTE_HASH_LENGTH];
            bytes.copy_from_slice(&digest);

            let mut trits = bytes_to_trits(&bytes);
            trits[HASH_LENGTH - 1] = 0;
            out.extend_from_slice(&trits);

            for byte in bytes.iter_mut() {
                *byte = !*byte;
            }
            self.keccak.update(bytes);
        }
        Ok(out)
    }
}

fn check_length(length: usize) -> Result<()> {
    if length == 0 || length % HASH_LENGTH != 0 {
        return Err(PaperWalletError::CryptoError {
            reason: format!("Kerl works on multiples of {HASH_LENGTH} trits, got {length}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Trit/byte conversion
// ---------------------------------------------------------------------------

/// Encodes 243 trits as a 384-bit big-endian two's complement integer.
pub fn trits_to_bytes(trits: &[i8; HASH_LENGTH]) -> [u8; BYTE_HASH_LENGTH] {
    // Little-endian 32-bit limbs, arithmetic modulo 2^384.
    let mut limbs = [0u32; LIMBS];
    for &trit in trits.iter().rev() {
        let mut carry = i64::from(trit);
        for limb in limbs.iter_mut() {
            let v = i64::from(*limb) * 3 + carry;
            *limb = v as u32;
            carry = v >> 32;
        }
    }

    let mut out = [0u8; BYTE_HASH_LENGTH];
    for (i, limb) in limbs.iter().rev().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&limb.to_be_bytes());
    }
    out
}

/// Decodes a 384-bit big-endian two's complement integer into 243
/// balanced trits. Magnitude beyond 243 trits is discarded.
pub fn bytes_to_trits(bytes: &[u8; BYTE_HASH_LENGTH]) -> [i8; HASH_LENGTH] {
    let mut limbs = [0u32; LIMBS];
    for (i, limb) in limbs.iter_mut().rev().enumerate() {
        let mut word = [0u8; 4];
        word.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
        *limb = u32::from_be_bytes(word);
    }

    let negative = bytes[0] & 0x80 != 0;
    if negative {
        negate(&mut limbs);
    }

    let mut trits = [0i8; HASH_LENGTH];
    for trit in trits.iter_mut() {
        let remainder = div3(&mut limbs);
        *trit = if remainder == 2 {
            increment(&mut limbs);
            -1
        } else {
            remainder as i8
        };
    }

    if negative {
        for trit in trits.iter_mut() {
            *trit = -*trit;
        }
    }
    trits
}

fn negate(limbs: &mut [u32; LIMBS]) {
    for limb in limbs.iter_mut() {
        *limb = !*limb;
    }
    increment(limbs);
}

fn increment(limbs: &mut [u32; LIMBS]) {
    for limb in limbs.iter_mut() {
        let (v, overflow) = limb.overflowing_add(1);
        *limb = v;
        if !overflow {
            break;
        }
    }
}

fn div3(limbs: &mut [u32; LIMBS]) -> u32 {
    let mut remainder = 0u64;
    for limb in limbs.iter_mut().rev() {
        let current = (remainder << 32) | u64::from(*limb);
        *limb = (current / 3) as u32;
        remainder = current % 3;
    }
    remainder as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ternary::{trits_to_trytes, trytes_to_trits};

    fn kerl_hash(trytes: &str) -> std::result::Result<String, PaperWalletError> {
        let mut kerl = Kerl::new();
        kerl.absorb(&trytes_to_trits(trytes)?)?;
        Ok(trits_to_trytes(&kerl.squeeze(HASH_LENGTH)?))
    }

    #[test]
    fn reference_hash() -> std::result::Result<(), PaperWalletError> {
        assert_eq!(
            kerl_hash("GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ")?,
            "OXJCNFHUNAHWDLKKPELTBFUCVW9KLXKOGWERKTJXQMXTKFKNWNNXYD9DMJJABSEIONOSJTTEVKVDQEWTW"
        );
        Ok(())
    }

    #[test]
    fn conversion_roundtrip() {
        let mut trits = [0i8; HASH_LENGTH];
        for (i, trit) in trits.iter_mut().enumerate().take(HASH_LENGTH - 1) {
            *trit = (i % 3) as i8 - 1;
        }
        // Leading trit decides the sign: positive here.
        trits[HASH_LENGTH - 2] = 1;

        let bytes = trits_to_bytes(&trits);
        assert_eq!(bytes[0] & 0x80, 0);
        assert_eq!(bytes_to_trits(&bytes), trits);

        let negated = trits.map(|t| -t);
        let bytes = trits_to_bytes(&negated);
        assert!(bytes[0] & 0x80 != 0);
        assert_eq!(bytes_to_trits(&bytes), negated);
    }

    #[test]
    fn small_values() {
        let mut one = [0i8; HASH_LENGTH];
        one[0] = 1;
        let bytes = trits_to_bytes(&one);
        assert_eq!(bytes[BYTE_HASH_LENGTH - 1], 1);
        assert!(bytes[..BYTE_HASH_LENGTH - 1].iter().all(|&b| b == 0));

        let minus_one = one.map(|t| -t);
        assert!(trits_to_bytes(&minus_one).iter().all(|&b| b == 0xff));
    }

    #[test]
    fn consecutive_squeezes_differ() -> std::result::Result<(), PaperWalletError> {
        let mut kerl = Kerl::new();
        kerl.absorb(&[1i8; HASH_LENGTH])?;
        let out = kerl.squeeze(2 * HASH_LENGTH)?;
        assert_ne!(out[..HASH_LENGTH], out[HASH_LENGTH..]);
        Ok(())
    }

    #[test]
    fn rejects_partial_chunks() {
        let mut kerl = Kerl::new();
        assert!(kerl.absorb(&[0i8; 100]).is_err());
        assert!(kerl.squeeze(0).is_err());
    }
}
