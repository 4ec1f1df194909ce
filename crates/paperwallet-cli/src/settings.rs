//! Config file loading.
//!
//! Without `--config` the built-in defaults apply. A config file may set
//! any subset of [`AppConfig`]; command line flags override it.

use std::path::Path;

use paperwallet_types::config::AppConfig;
use paperwallet_types::{PaperWalletError, Result};

/// Loads and validates the application config.
///
/// # Errors
///
/// Returns [`PaperWalletError::ConfigError`] if the file cannot be read,
/// is not valid JSON, or holds out-of-range values.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => read(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| PaperWalletError::ConfigError {
        reason: format!("failed to read config file {}: {e}", path.display()),
    })?;

    serde_json::from_str(&text).map_err(|e| PaperWalletError::ConfigError {
        reason: format!("invalid config JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperwallet_types::Network;

    #[test]
    fn defaults_without_file() -> std::result::Result<(), PaperWalletError> {
        let config = load(None)?;
        assert_eq!(config.entropy_bits, 128);
        Ok(())
    }

    #[test]
    fn partial_file_overrides() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "default_network": "Local", "pretty_json": false }"#)?;

        let config = load(Some(path.as_path()))?;
        assert_eq!(config.default_network, Network::Local);
        assert!(!config.pretty_json);
        assert_eq!(config.entropy_bits, 128);
        Ok(())
    }

    #[test]
    fn invalid_values_rejected() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "entropy_bits": 100 }"#)?;

        assert!(matches!(
            load(Some(path.as_path())),
            Err(PaperWalletError::ConfigError { .. })
        ));
        Ok(())
    }

    #[test]
    fn missing_file_rejected() {
        assert!(matches!(
            load(Some(Path::new("/nonexistent/paperwallet.json"))),
            Err(PaperWalletError::ConfigError { .. })
        ));
    }

    #[test]
    fn bad_json_rejected() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json")?;

        assert!(matches!(
            load(Some(path.as_path())),
            Err(PaperWalletError::ConfigError { .. })
        ));
        Ok(())
    }
}
