//! BIP39 mnemonic generation, validation, and seed derivation.
//!
//! Implements the BIP39 codec for every standard entropy size
//! (128 to 256 bits in steps of 32):
//!
//! 1. **Encoding**: entropy → SHA-256 checksum (ENT/32 bits) appended →
//!    split into 11-bit indices → words from the English list.
//! 2. **Decoding**: words → 11-bit indices → entropy and checksum,
//!    recompute and verify the checksum.
//! 3. **Seed derivation**: PBKDF2-HMAC-SHA512 with 2048 rounds,
//!    salt = `"mnemonic" + passphrase`, producing a 64-byte seed.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use hmac::Hmac;
use paperwallet_types::{PaperWalletError, Result};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::entropy::{generate_entropy, EntropySource};
use crate::wordlist::{index_to_word, word_to_index};

/// Entropy lengths (in bytes) a mnemonic can encode.
pub const VALID_ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Number of PBKDF2 rounds for BIP39 seed derivation.
pub const SEED_ROUNDS: u32 = 2048;

/// Salt prefix for BIP39 seed derivation.
pub const SEED_SALT_PREFIX: &str = "mnemonic";

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed derived from a BIP39 mnemonic via PBKDF2-HMAC-SHA512.
///
/// This seed is the input to BIP32 master key generation. Automatically
/// zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a BIP39 seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Seed does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Sentence helpers
// ---------------------------------------------------------------------------

/// Joins mnemonic words with single spaces.
///
/// An empty word list yields an empty string.
pub fn sentence_to_string<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a sentence into words on whitespace.
///
/// An empty or blank string yields an empty list.
pub fn string_to_sentence(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Generates a fresh mnemonic from `bits` bits of entropy.
///
/// # Errors
///
/// - [`PaperWalletError::InvalidEntropyLength`] if `bits` is not a
///   multiple of 32 in `128..=256`.
/// - [`PaperWalletError::CryptoError`] if the entropy source fails.
pub fn generate_mnemonic<E: EntropySource + ?Sized>(
    bits: usize,
    source: &mut E,
) -> Result<Vec<String>> {
    let entropy = generate_entropy(bits, source)?;
    words_from_entropy(&entropy)
}

/// Converts raw entropy into a checksummed BIP39 word list.
///
/// # Process (BIP39)
///
/// 1. Compute `SHA-256(entropy)` and take the first `ENT / 32` bits as
///    checksum.
/// 2. Concatenate entropy bits and checksum bits.
/// 3. Split into groups of 11 bits; each group indexes the wordlist.
///
/// # Errors
///
/// Returns [`PaperWalletError::InvalidEntropyLength`] unless the entropy
/// is 16, 20, 24, 28 or 32 bytes long.
pub fn words_from_entropy(entropy: &[u8]) -> Result<Vec<String>> {
    if !VALID_ENTROPY_LENGTHS.contains(&entropy.len()) {
        return Err(PaperWalletError::InvalidEntropyLength {
            bytes: entropy.len(),
        });
    }

    let entropy_bits = entropy.len() * 8;
    let checksum_bits = entropy_bits / 32;
    let checksum = Sha256::digest(entropy);

    let mut bits = Vec::with_capacity(entropy_bits + checksum_bits);
    for byte in entropy {
        for j in (0..8).rev() {
            bits.push((byte >> j) & 1);
        }
    }
    for i in 0..checksum_bits {
        bits.push((checksum[i / 8] >> (7 - (i % 8))) & 1);
    }

    let mut words = Vec::with_capacity(bits.len() / 11);
    for group in bits.chunks(11) {
        let idx = group
            .iter()
            .fold(0u16, |acc, &bit| (acc << 1) | u16::from(bit));

        let word = index_to_word(idx).ok_or_else(|| PaperWalletError::CryptoError {
            reason: format!("BIP39 word index {idx} out of range"),
        })?;
        words.push(word.to_string());
    }

    bits.zeroize();
    Ok(words)
}

// ---------------------------------------------------------------------------
// Decoding / validation
// ---------------------------------------------------------------------------

/// Recovers the entropy encoded by a mnemonic word list.
///
/// # Errors
///
/// - [`PaperWalletError::InvalidMnemonicLength`] unless there are 12, 15,
///   18, 21 or 24 words.
/// - [`PaperWalletError::UnknownMnemonicWord`] if a word is not in the
///   English wordlist.
/// - [`PaperWalletError::ChecksumMismatch`] if the trailing checksum
///   bits do not match.
pub fn entropy_from_words<S: AsRef<str>>(words: &[S]) -> Result<Vec<u8>> {
    let count = words.len();
    if count == 0 || count % 3 != 0 || !(12..=24).contains(&count) {
        return Err(PaperWalletError::InvalidMnemonicLength { words: count });
    }

    let total_bits = count * 11;
    let checksum_bits = total_bits / 33;
    let entropy_bits = total_bits - checksum_bits;

    let mut bits = Vec::with_capacity(total_bits);
    for word in words {
        let word = word.as_ref();
        let idx = word_to_index(word).ok_or_else(|| PaperWalletError::UnknownMnemonicWord {
            word: word.to_string(),
        })?;
        for j in (0..11).rev() {
            bits.push(((idx >> j) & 1) as u8);
        }
    }

    let mut entropy = vec![0u8; entropy_bits / 8];
    for (i, bit) in bits[..entropy_bits].iter().enumerate() {
        if *bit == 1 {
            entropy[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    let expected = Sha256::digest(&entropy);
    let matches = (0..checksum_bits)
        .all(|i| bits[entropy_bits + i] == (expected[i / 8] >> (7 - (i % 8))) & 1);

    bits.zeroize();

    if !matches {
        entropy.zeroize();
        return Err(PaperWalletError::ChecksumMismatch);
    }

    Ok(entropy)
}

/// Validates a mnemonic word list (length, words, checksum).
///
/// # Errors
///
/// Same as [`entropy_from_words`].
pub fn validate_mnemonic<S: AsRef<str>>(words: &[S]) -> Result<()> {
    let mut entropy = entropy_from_words(words)?;
    entropy.zeroize();
    Ok(())
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derives a 64-byte seed from a mnemonic sentence and passphrase.
///
/// # Process (BIP39)
///
/// - **Password**: the mnemonic sentence (the English wordlist is ASCII,
///   so NFKD normalization is a no-op).
/// - **Salt**: `"mnemonic"` concatenated with `passphrase`.
/// - **Algorithm**: PBKDF2-HMAC-SHA512, 2048 rounds, 64-byte output.
///
/// The sentence is not validated here; callers that need a valid
/// checksum call [`validate_mnemonic`] first.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if PBKDF2 computation fails.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> Result<Seed> {
    let mut output = [0u8; 64];
    pbkdf2_sha512(mnemonic, passphrase, &mut output)?;
    Ok(Seed(output))
}

/// Runs the BIP39 PBKDF2 step with an arbitrary output length.
///
/// Some protocols stretch the mnemonic to more than 64 bytes using the
/// same password, salt and round count as BIP39.
///
/// # Errors
///
/// Returns [`PaperWalletError::CryptoError`] if PBKDF2 computation fails.
pub fn pbkdf2_sha512(mnemonic: &str, passphrase: &str, output: &mut [u8]) -> Result<()> {
    let mut salt = Vec::with_capacity(SEED_SALT_PREFIX.len() + passphrase.len());
    salt.extend_from_slice(SEED_SALT_PREFIX.as_bytes());
    salt.extend_from_slice(passphrase.as_bytes());

    let result = pbkdf2::pbkdf2::<Hmac<Sha512>>(mnemonic.as_bytes(), &salt, SEED_ROUNDS, output)
        .map_err(|e| PaperWalletError::CryptoError {
            reason: format!("PBKDF2-HMAC-SHA512 failed: {e}"),
        });

    salt.zeroize();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
