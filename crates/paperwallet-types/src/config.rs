//! Application configuration with sensible defaults.
//!
//! All operational parameters are centralized here. Every value has a
//! documented default; a JSON config file may override any subset.

use serde::{Deserialize, Serialize};

use crate::{Network, PaperWalletError, ProtocolKind, Result};

/// Pseudo-random function used by PBKDF2 when deriving the secret
/// cipher key.
///
/// Wallet files do not record the PRF, so only tests override the
/// default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum KdfPrf {
    /// HMAC-SHA1. Kept as the default for compatibility with existing
    /// wallet files, which were all encrypted under it.
    #[default]
    HmacSha1,
    /// HMAC-SHA256.
    HmacSha256,
}

/// Global application configuration.
///
/// Missing keys in a config file fall back to [`AppConfig::default`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Protocol used when none is given on the command line.
    pub default_protocol: ProtocolKind,

    /// Network used when none is given on the command line.
    pub default_network: Network,

    /// Directory wallet files are written to.
    pub output_dir: String,

    /// Entropy size for freshly generated mnemonics, in bits.
    /// 128 bits yields 12 words, 256 bits yields 24.
    pub entropy_bits: usize,

    /// Pretty-print wallet JSON files.
    pub pretty_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_protocol: ProtocolKind::Bitcoin,
            default_network: Network::Production,
            output_dir: ".".into(),
            entropy_bits: 128,
            pretty_json: true,
        }
    }
}

impl AppConfig {
    /// Validates all configuration values.
    ///
    /// Returns an error if any value is outside its acceptable range.
    pub fn validate(&self) -> Result<()> {
        if self.entropy_bits % 32 != 0 || !(128..=256).contains(&self.entropy_bits) {
            return Err(PaperWalletError::ConfigError {
                reason: format!(
                    "entropy_bits must be a multiple of 32 in 128..=256, got {}",
                    self.entropy_bits
                ),
            });
        }

        if self.output_dir.trim().is_empty() {
            return Err(PaperWalletError::ConfigError {
                reason: "output_dir must not be empty".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn default_values() {
        let config = AppConfig::default();
        assert_eq!(config.default_protocol, ProtocolKind::Bitcoin);
        assert_eq!(config.default_network, Network::Production);
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.entropy_bits, 128);
        assert!(config.pretty_json);
    }

    #[test]
    fn entropy_bits_not_multiple_of_32_rejected() {
        let config = AppConfig {
            entropy_bits: 136,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn entropy_bits_out_of_range_rejected() {
        for bits in [96, 288] {
            let config = AppConfig {
                entropy_bits: bits,
                ..AppConfig::default()
            };
            assert!(config.validate().is_err(), "{bits} bits must be rejected");
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config: AppConfig = serde_json::from_str(r#"{ "default_network": "Test" }"#)?;
        assert_eq!(config.default_network, Network::Test);
        assert_eq!(config.entropy_bits, 128);
        Ok(())
    }

    #[test]
    fn cipher_keys_in_file_are_ignored() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config: AppConfig = serde_json::from_str(
            r#"{ "cipher_iterations": 2000, "cipher_prf": "HmacSha256", "entropy_bits": 256 }"#,
        )?;
        assert_eq!(config.entropy_bits, 256);
        config.validate()?;
        Ok(())
    }

    #[test]
    fn prf_defaults_to_sha1() {
        assert_eq!(KdfPrf::default(), KdfPrf::HmacSha1);
    }
}
