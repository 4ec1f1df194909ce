//! Known-vector tests that chain several primitives together.
//!
//! Address vectors were produced by Electrum, MetaMask and the IOTA
//! reference wallet for the same mnemonics.

use paperwallet_crypto::checksum::{base58check_decode, base58check_encode, to_checksum_address};
use paperwallet_crypto::cipher::{CipherParams, SecretCipher};
use paperwallet_crypto::hash::{hash160, keccak256};
use paperwallet_crypto::hd_derive::{hardened, parse_derivation_path, ExtendedPrivateKey};
use paperwallet_crypto::iota_signing::{new_address, SECURITY_LEVEL_DEFAULT};
use paperwallet_crypto::mnemonic::mnemonic_to_seed;
use paperwallet_types::PaperWalletError;
use rand::rngs::StdRng;
use rand::SeedableRng;

const BITCOIN_MNEMONIC: &str =
    "history suit seat regular toe valid circle public issue degree river vendor";
const ETHEREUM_MNEMONIC: &str =
    "expose dwarf coyote broken alert rifle fade novel estate output about repair";

fn p2pkh(mnemonic: &str, path: &str, version: u8) -> std::result::Result<String, PaperWalletError> {
    let seed = mnemonic_to_seed(mnemonic, "")?;
    let key = ExtendedPrivateKey::master(&seed)?.derive_path(&parse_derivation_path(path)?)?;
    Ok(base58check_encode(version, &hash160(&key.public_key_compressed()?)))
}

fn ethereum(mnemonic: &str, passphrase: &str, path: &[u32]) -> std::result::Result<String, PaperWalletError> {
    let seed = mnemonic_to_seed(mnemonic, passphrase)?;
    let key = ExtendedPrivateKey::master(&seed)?.derive_path(path)?;
    let public = key.public_key_uncompressed()?;
    let hash = keccak256(&public[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(to_checksum_address(&address))
}

// ===================================================================
// Bitcoin: BIP44 P2PKH
// ===================================================================

#[test]
fn bitcoin_first_receive_address() -> std::result::Result<(), PaperWalletError> {
    assert_eq!(
        p2pkh(BITCOIN_MNEMONIC, "m/44'/0'/0'/0/0", 0x00)?,
        "18RJUfZwBTaNSNS55seBRzkMSvLkvjKtur"
    );
    Ok(())
}

#[test]
fn bitcoin_testnet_address() -> std::result::Result<(), PaperWalletError> {
    let address = p2pkh(BITCOIN_MNEMONIC, "m/44'/0'/0'/0/0", 0x6f)?;
    assert_eq!(address, "mnwFmieuzV1dDUugoScZFuxgJuwTqW89Zm");

    let (version, payload) = base58check_decode(&address)?;
    assert_eq!(version, 0x6f);
    assert_eq!(payload.len(), 20);
    Ok(())
}

#[test]
fn bitcoin_receive_and_change_chains() -> std::result::Result<(), PaperWalletError> {
    let mnemonic = "version proof release patrol phone adapt figure behave aware hungry input subject";
    let expected = [
        ("m/44'/0'/0'/0/0", "14r2TsZ75SHANYaz3WjjYtEfhnVJKcvp3Z"),
        ("m/44'/0'/0'/0/1", "19g3WzSntjQHnEuVJv7f5iF7zZWWLX5gHo"),
        ("m/44'/0'/0'/1/0", "1BaLNJQBwfP112tSMEiZuATGN8Nz3mvmrr"),
        ("m/44'/0'/0'/1/1", "1AVhsds34bUHY52u4pwWeWvpaTJpEeuXf7"),
    ];
    for (path, address) in expected {
        assert_eq!(p2pkh(mnemonic, path, 0x00)?, address, "path {path}");
    }
    Ok(())
}

// ===================================================================
// Ethereum: BIP44 + Keccak + EIP-55
// ===================================================================

#[test]
fn ethereum_paths_without_passphrase() -> std::result::Result<(), PaperWalletError> {
    let h = hardened;
    let cases: [(&[u32], &str); 3] = [
        (&[h(44), h(60), h(0)], "0x6f441b62c491FE767968B0FA09Da9306BD866f08"),
        (&[h(44), h(60), h(0), 0], "0x338c8bc615365E550d22909603eb817606775F45"),
        (&[h(44), h(60), h(0), 0, 0], "0xF2E12BCFE9CF398b24492Df9fc02Af3397ED719f"),
    ];
    for (path, address) in cases {
        assert_eq!(ethereum(ETHEREUM_MNEMONIC, "", path)?, address);
    }
    Ok(())
}

#[test]
fn ethereum_paths_with_passphrase() -> std::result::Result<(), PaperWalletError> {
    let h = hardened;
    let cases: [(&[u32], &str); 3] = [
        (&[h(44), h(60), h(0)], "0x6C9BeF11b00764C0de04317C69c6BeB2E1b1f84F"),
        (&[h(44), h(60), h(0), 0], "0xC220E759A0083E5678b42D7CDA5bDb07259F0C31"),
        (&[h(44), h(60), h(0), 0, 0], "0xCC78cf4F160dBa3De11Bb5401Cb19d64e685c2Ac"),
    ];
    for (path, address) in cases {
        assert_eq!(ethereum(ETHEREUM_MNEMONIC, "test pass phrase", path)?, address);
    }
    Ok(())
}

// ===================================================================
// IOTA
// ===================================================================

#[test]
fn iota_address_from_seed() -> std::result::Result<(), PaperWalletError> {
    let address = new_address(
        "WZGTVNXWXTJ9SBNRYWAPZW99DPZQTDDMTRXZYOX9XRMBY9VFRGNTYGAGSJSRGDLOYCINVANLXQJGHYVUG",
        SECURITY_LEVEL_DEFAULT,
        0,
        true,
    )?;
    assert_eq!(
        address,
        "RCJXXBJJGBXOCCRGVZYITIBTVRGYQZDTJIZELVWTYJNHFLKFQNYGCJNXLWXPJDCICQJBCGGUOVNUTQGKYFZZSOCJED"
    );
    Ok(())
}

// ===================================================================
// Secret cipher
// ===================================================================

#[test]
fn encrypted_mnemonic_from_wallet_file() -> std::result::Result<(), PaperWalletError> {
    let cipher = SecretCipher::new("test pass phrase")?;
    let secret = cipher.decrypt(
        "ttpR/rOUlgyqdyl7CQSxxBVuR5daKM7skVxLDNBPf0EVtaUBplsEJtGsqdyKAeN3v8IvSQr0f6FhvrHOgBm7pDPcCQnZjYYYyBjqIcKnMouK83NIXCvWfpw0QooVbaSA",
        "q9q1O4ADvSN22nQu8nowYg==",
    )?;
    assert_eq!(
        secret,
        "version proof release patrol phone adapt figure behave aware hungry input subject"
    );
    Ok(())
}

#[test]
fn cipher_roundtrip_with_custom_params() -> std::result::Result<(), PaperWalletError> {
    let params = CipherParams {
        salt: b"custom salt".to_vec(),
        iterations: 2000,
        key_bits: 192,
        ..CipherParams::default()
    };
    let cipher = SecretCipher::with_params("pw", &params)?;
    let encrypted = cipher.encrypt(ETHEREUM_MNEMONIC, &mut StdRng::seed_from_u64(9))?;
    assert_eq!(cipher.decrypt(&encrypted.ciphertext, &encrypted.iv)?, ETHEREUM_MNEMONIC);

    // Same passphrase, different parameters: must not decrypt to the same text.
    let other = SecretCipher::with_params("pw", &CipherParams { iterations: 2001, ..params })?;
    assert!(other
        .decrypt(&encrypted.ciphertext, &encrypted.iv)
        .map(|text| text != ETHEREUM_MNEMONIC)
        .unwrap_or(true));
    Ok(())
}
