//! Cryptographic primitives for the paper wallet engine.
//!
//! This crate is the **sole** location for cryptographic operations.
//! Protocol logic in `paperwallet-wallet` composes these building
//! blocks and never touches hash or cipher crates directly.
//!
//! # Modules
//!
//! - [`entropy`]: injectable secure random source
//! - [`wordlist`] and [`mnemonic`]: BIP39 codec and seed derivation
//! - [`hash`]: SHA-256, RIPEMD-160 and Keccak-256 digests
//! - [`checksum`]: Base58Check and EIP-55 address encodings
//! - [`hd_derive`]: BIP32 secp256k1 key derivation
//! - [`cipher`]: passphrase-keyed AES-CBC for account secrets
//! - [`ternary`], [`kerl`], [`java_random`] and [`iota_signing`]: IOTA
//!   seed and address generation

pub mod checksum;
pub mod cipher;
pub mod entropy;
pub mod hash;
pub mod hd_derive;
pub mod iota_signing;
pub mod java_random;
pub mod kerl;
pub mod mnemonic;
pub mod ternary;
pub mod wordlist;
