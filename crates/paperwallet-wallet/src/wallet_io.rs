//! Wallet file persistence.
//!
//! Wallets are written as `<address>.json` into a target directory.
//! Writes go through a temporary file and a rename so a crash never
//! leaves a half-written wallet behind.

use std::path::{Path, PathBuf};

use paperwallet_types::{PaperWalletError, Result};

use crate::json_config::JsonConfig;
use crate::wallet::{restore_wallet, Wallet};

/// Writes `wallet` to `<dir>/<address>.json` and returns the path.
///
/// # Errors
///
/// - [`PaperWalletError::Serialization`] if encoding fails.
/// - [`PaperWalletError::Io`] if the directory is missing or the file
///   cannot be written.
pub fn save_wallet(dir: &Path, wallet: &Wallet, config: &JsonConfig) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(PaperWalletError::Io {
            reason: format!("target directory not found: {}", dir.display()),
        });
    }

    let json = wallet.to_json(config)?;
    let path = dir.join(wallet.file_name());

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(|e| PaperWalletError::Io {
        reason: format!("failed to write wallet file: {e}"),
    })?;

    std::fs::rename(&tmp_path, &path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        PaperWalletError::Io {
            reason: format!("failed to rename wallet file: {e}"),
        }
    })?;

    tracing::info!(path = %path.display(), "wallet saved");
    Ok(path)
}

/// Reads the raw envelope bytes of a wallet file.
///
/// # Errors
///
/// Returns [`PaperWalletError::Io`] if the file is missing or
/// unreadable.
pub fn load_envelope(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(PaperWalletError::Io {
            reason: format!("wallet file not found: {}", path.display()),
        });
    }

    std::fs::read(path).map_err(|e| PaperWalletError::Io {
        reason: format!("failed to read wallet file: {e}"),
    })
}

/// Loads and restores a wallet file in one step.
///
/// # Errors
///
/// The errors of [`load_envelope`] and [`restore_wallet`].
pub fn restore_from_file(path: &Path, pass_phrase: &str, config: &JsonConfig) -> Result<Wallet> {
    let bytes = load_envelope(path)?;
    tracing::debug!(path = %path.display(), "restoring wallet");
    restore_wallet(&bytes, pass_phrase, config)
}
