//! BIP39 known test vectors and end-to-end BIP32 derivation tests.
//!
//! Test vectors sourced from:
//! - BIP39: <https://github.com/trezor/python-mnemonic/blob/master/vectors.json>
//!   (passphrase "TREZOR")

use paperwallet_crypto::hd_derive::{hardened, ExtendedPrivateKey};
use paperwallet_crypto::mnemonic::{
    entropy_from_words, mnemonic_to_seed, sentence_to_string, string_to_sentence,
    validate_mnemonic, words_from_entropy,
};
use paperwallet_types::PaperWalletError;

// ===================================================================
// Helper
// ===================================================================

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap_or_default()
}

/// (entropy, mnemonic, seed with passphrase "TREZOR")
const TREZOR_VECTORS: &[(&str, &str, &str)] = &[
    (
        "00000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
    ),
    (
        "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
        "legal winner thank year wave sausage worth useful legal winner thank yellow",
        "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
    ),
    (
        "80808080808080808080808080808080",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
        "d71de856f81a8acc65e6fc851a38d4d7ec216fd0796d0a6827a3ad6ed5511a30fa280f12eb2e47ed2ac03b5c462a0358d18d69fe4f985ec81778c1b370b652a8",
    ),
    (
        "ffffffffffffffffffffffffffffffff",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
        "ac27495480225222079d7be181583751e86f571027b0497b5b5d11218e0a8a13332572917f0f8e5a589620c6f15b11c61dee327651a14c34e18231052e48c069",
    ),
    (
        "000000000000000000000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon agent",
        "035895f2f481b1b0f01fcf8c289c794660b289981a78f8106447707fdd9666ca06da5a9a565181599b79f53b844d8a71dd9f439c52a3d7b3e8a79c906ac845fa",
    ),
    (
        "808080808080808080808080808080808080808080808080",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic avoid letter always",
        "107d7c02a5aa6f38c58083ff74f04c607c2d2c0ecc55501dadd72d025b751bc27fe913ffb796f841c49b1d33b610cf0e91d3aa239027f5e99fe4ce9e5088cd65",
    ),
    (
        "9e885d952ad362caeb4efe34a8e91bd2",
        "ozone drill grab fiber curtain grace pudding thank cruise elder eight picnic",
        "274ddc525802f7c828d8ef7ddbcdc5304e87ac3535913611fbbfa986d0c9e5476c91689f9c8a54fd55bd38606aa6a8595ad213d4c9c9f9aca3fb217069a41028",
    ),
    (
        "6610b25967cdcca9d59875f5cb50b0ea75433311869e930b",
        "gravity machine north sort system female filter attitude volume fold club stay feature office ecology stable narrow fog",
        "628c3827a8823298ee685db84f55caa34b5cc195a778e52d45f59bcf75aba68e4d7590e101dc414bc1bbd5737666fbbef35d1f1903953b66624f910feef245ac",
    ),
    (
        "68a79eaca2324873eacc50cb9c6eca8cc68ea5d936f98787c60c7ebc74e6ce7c",
        "hamster diagram private dutch cause delay private meat slide toddler razor book happy fancy gospel tennis maple dilemma loan word shrug inflict delay length",
        "64c87cde7e12ecf6704ab95bb1408bef047c22db4cc7491c4271d170a1b213d20b385bc1588d9c7b38f1b39d415665b8a9030c9ec653d75e65f847d8fc1fc440",
    ),
    (
        "f585c11aec520db57dd353c69554b21a89b20fb0650966fa0a9d6f74fd989d8f",
        "void come effort suffer camp survey warrior heavy shoot primary clutch crush open amazing screen patrol group space point ten exist slush involve unfold",
        "01f5bced59dec48e362f2c45b5de68b9fd6c92c6634f44d6d40aab69056506f0e35524a518034ddc1192e1dacd32c1ed3eaa3c3b131c88ed8e7e54c49a5d0998",
    ),
];

// ===================================================================
// Entropy -> mnemonic
// ===================================================================

#[test]
fn trezor_entropy_to_mnemonic() -> std::result::Result<(), PaperWalletError> {
    for (entropy, mnemonic, _) in TREZOR_VECTORS {
        let words = words_from_entropy(&hex_to_bytes(entropy))?;
        assert_eq!(sentence_to_string(&words), *mnemonic, "entropy {entropy}");
    }
    Ok(())
}

// ===================================================================
// Mnemonic -> entropy
// ===================================================================

#[test]
fn trezor_mnemonic_to_entropy() -> std::result::Result<(), PaperWalletError> {
    for (entropy, mnemonic, _) in TREZOR_VECTORS {
        let words = string_to_sentence(mnemonic);
        validate_mnemonic(&words)?;
        assert_eq!(hex::encode(entropy_from_words(&words)?), *entropy);
    }
    Ok(())
}

// ===================================================================
// Mnemonic -> seed
// ===================================================================

#[test]
fn trezor_mnemonic_to_seed() -> std::result::Result<(), PaperWalletError> {
    for (_, mnemonic, seed) in TREZOR_VECTORS {
        let derived = mnemonic_to_seed(mnemonic, "TREZOR")?;
        assert_eq!(hex::encode(derived.as_bytes()), *seed, "mnemonic {mnemonic}");
    }
    Ok(())
}

// ===================================================================
// Corruption is detected
// ===================================================================

#[test]
fn swapped_word_fails_checksum() {
    // "about" -> "above" keeps the word valid but breaks the checksum.
    let words = string_to_sentence(
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon above",
    );
    assert!(matches!(
        validate_mnemonic(&words),
        Err(PaperWalletError::ChecksumMismatch)
    ));
}

#[test]
fn truncated_mnemonic_rejected() {
    let words = string_to_sentence("legal winner thank year wave sausage worth useful legal winner thank");
    assert!(matches!(
        validate_mnemonic(&words),
        Err(PaperWalletError::InvalidMnemonicLength { words: 11 })
    ));
}

// ===================================================================
// End-to-end: mnemonic -> seed -> BIP32 -> public key
// ===================================================================

#[test]
fn mnemonic_to_bip44_key_is_stable() -> std::result::Result<(), PaperWalletError> {
    let (_, mnemonic, _) = TREZOR_VECTORS[0];
    let seed = mnemonic_to_seed(mnemonic, "")?;
    let master = ExtendedPrivateKey::master(&seed)?;

    let path = [hardened(44), hardened(0), hardened(0), 0, 0];
    let a = master.derive_path(&path)?;
    let b = ExtendedPrivateKey::master(&seed)?.derive_path(&path)?;

    assert_eq!(a.public_key_compressed()?, b.public_key_compressed()?);
    assert_eq!(a.path(), &path);
    Ok(())
}

#[test]
fn stepwise_and_path_derivation_agree() -> std::result::Result<(), PaperWalletError> {
    let seed = mnemonic_to_seed(TREZOR_VECTORS[1].1, "TREZOR")?;
    let master = ExtendedPrivateKey::master(&seed)?;

    let account = master.derive_path(&[hardened(44), hardened(60), hardened(0)])?;
    let stepwise = account.derive_child(0)?.derive_child(0)?;
    let direct = master.derive_path(&[hardened(44), hardened(60), hardened(0), 0, 0])?;

    assert_eq!(*stepwise.private_key(), *direct.private_key());
    Ok(())
}
