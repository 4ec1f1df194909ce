//! Randomness as an explicit capability.
//!
//! Mnemonic generation and IV generation never reach for a global RNG.
//! Callers pass an [`EntropySource`]; production code uses
//! [`OsEntropy`], tests substitute a seeded `StdRng`.

use paperwallet_types::{PaperWalletError, Result};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// OS-level CSPRNG, the default entropy source.
pub use rand::rngs::OsRng as OsEntropy;

/// Default entropy size for new mnemonics, in bits (12 words).
pub const DEFAULT_ENTROPY_BITS: usize = 128;

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fills `dest` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PaperWalletError::CryptoError`] if the source is
    /// unavailable.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng + ?Sized> EntropySource for R {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(dest)
            .map_err(|e| PaperWalletError::CryptoError {
                reason: format!("failed to gather entropy: {e}"),
            })
    }
}

/// Draws `bits` bits of entropy from `source`.
///
/// `bits` must be a multiple of 32 between 128 and 256 inclusive, the
/// sizes a BIP39 mnemonic can encode.
///
/// # Errors
///
/// - [`PaperWalletError::InvalidEntropyLength`] for unsupported sizes.
/// - [`PaperWalletError::CryptoError`] if the source fails.
pub fn generate_entropy<E: EntropySource + ?Sized>(
    bits: usize,
    source: &mut E,
) -> Result<Zeroizing<Vec<u8>>> {
    if bits % 32 != 0 || !(128..=256).contains(&bits) {
        return Err(PaperWalletError::InvalidEntropyLength { bytes: bits / 8 });
    }

    let mut entropy = Zeroizing::new(vec![0u8; bits / 8]);
    source.fill(&mut entropy)?;
    Ok(entropy)
}
