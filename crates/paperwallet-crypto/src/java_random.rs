//! The 48-bit linear congruential generator of `java.util.Random`.
//!
//! IOTA seed derivation picks each seed character with this generator,
//! so its output must match the JDK bit for bit. It is not a secure
//! random source and is never used as one.

use paperwallet_types::{PaperWalletError, Result};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// JDK-compatible linear congruential generator.
#[derive(Clone, Debug)]
pub struct JavaRandom {
    seed: u64,
}

impl JavaRandom {
    /// Seeds the generator the way `new Random(seed)` does.
    pub fn new(seed: i64) -> Self {
        Self {
            seed: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    fn next(&mut self, bits: u32) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.seed >> (48 - bits)) as i32
    }

    /// Next uniformly distributed `i32`, like `Random.nextInt()`.
    pub fn next_i32(&mut self) -> i32 {
        self.next(32)
    }

    /// Next value in `0..bound`, like `Random.nextInt(bound)`.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] if `bound` is not
    /// positive.
    pub fn next_int(&mut self, bound: i32) -> Result<i32> {
        if bound <= 0 {
            return Err(PaperWalletError::CryptoError {
                reason: format!("random bound must be positive, got {bound}"),
            });
        }

        let mut r = self.next(31);
        let m = bound - 1;
        if bound & m == 0 {
            return Ok(((i64::from(bound) * i64::from(r)) >> 31) as i32);
        }

        let mut u = r;
        loop {
            r = u % bound;
            // Reject the biased tail, detected through i32 overflow.
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return Ok(r);
            }
            u = self.next(31);
        }
    }
}
