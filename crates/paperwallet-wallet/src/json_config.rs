//! Serialization settings threaded through every wallet write.

use paperwallet_crypto::cipher::CipherParams;
use paperwallet_types::config::AppConfig;

/// Controls how accounts are encrypted and how envelopes are rendered.
///
/// There is no process-wide serializer state: every call that produces
/// JSON or ciphertext takes a `JsonConfig` explicitly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonConfig {
    /// Pretty-print envelopes (two-space indentation).
    pub pretty: bool,
    /// Key derivation parameters for account secret encryption.
    pub cipher: CipherParams,
}

impl JsonConfig {
    /// Builds the serialization settings from application configuration.
    ///
    /// The cipher always uses the default parameters: wallet files do
    /// not record them, so anything else would make a wallet
    /// unrecoverable from its passphrase alone.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            pretty: config.pretty_json,
            cipher: CipherParams::default(),
        }
    }

    /// Compact output with default cipher parameters.
    pub fn compact() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_maps_pretty_flag() {
        let app = AppConfig {
            pretty_json: false,
            ..AppConfig::default()
        };
        let config = JsonConfig::from_app_config(&app);
        assert!(!config.pretty);
        assert_eq!(config, JsonConfig::compact());
    }

    #[test]
    fn default_app_config_keeps_default_cipher() {
        let config = JsonConfig::from_app_config(&AppConfig::default());
        assert!(config.pretty);
        assert_eq!(config.cipher, CipherParams::default());
    }
}
