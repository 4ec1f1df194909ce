//! Paper wallet accounts for Bitcoin, Ethereum and IOTA.
//!
//! Handles the full paper wallet round trip:
//!
//! - **Create** an account from a supplied or generated BIP39 mnemonic
//! - **Derive** the secret and first address the way the target wallet
//!   app (Electrum, MetaMask, MyCrypto, Trinity) does
//! - **Encrypt** the secret with the account passphrase
//! - **Serialize** the account into a versioned JSON envelope
//! - **Restore** an envelope, decrypting and re-verifying the address
//!
//! All raw cryptography lives in `paperwallet-crypto`; this crate only
//! composes it.

pub mod account;
pub mod bitcoin;
pub mod derivation;
pub mod ethereum;
pub mod iota;
pub mod json_config;
pub mod protocol;
pub mod registry;
pub mod wallet;
pub mod wallet_io;
