//! Maps protocol and network names to a [`Protocol`].

use paperwallet_types::{Network, PaperWalletError, ProtocolKind, Result};
use serde_json::Value;

use crate::protocol::Protocol;

/// JSON key of the protocol name in a wallet envelope.
pub const JSON_PROTOCOL: &str = "protocol";
/// JSON key of the network name in a wallet envelope.
pub const JSON_NETWORK: &str = "network";

/// Resolves protocols by kind, by name or from a wallet envelope.
pub struct ProtocolRegistry;

impl ProtocolRegistry {
    /// Returns the protocol for `kind` on `network`.
    pub fn resolve(kind: ProtocolKind, network: Network) -> Protocol {
        tracing::debug!(%kind, %network, "resolving protocol");
        Protocol::new(kind, network)
    }

    /// Parses both names (case-insensitive) and resolves the protocol.
    ///
    /// # Errors
    ///
    /// - [`PaperWalletError::UnknownProtocol`] for an unknown protocol.
    /// - [`PaperWalletError::UnknownNetwork`] for an unknown network.
    pub fn resolve_by_name(protocol: &str, network: &str) -> Result<Protocol> {
        let kind: ProtocolKind = protocol.parse()?;
        let network: Network = network.parse()?;
        Ok(Self::resolve(kind, network))
    }

    /// Resolves the protocol named by an envelope's `protocol` and
    /// `network` attributes.
    ///
    /// # Errors
    ///
    /// - [`PaperWalletError::MalformedEnvelope`] if either attribute is
    ///   missing.
    /// - [`PaperWalletError::Serialization`] if either is not a string.
    /// - The errors of [`ProtocolRegistry::resolve_by_name`].
    pub fn resolve_from_envelope(envelope: &Value) -> Result<Protocol> {
        let protocol = envelope_str(envelope, JSON_PROTOCOL)?;
        let network = envelope_str(envelope, JSON_NETWORK)?;
        Self::resolve_by_name(protocol, network)
    }
}

fn envelope_str<'a>(envelope: &'a Value, field: &str) -> Result<&'a str> {
    envelope
        .get(field)
        .ok_or_else(|| PaperWalletError::MalformedEnvelope {
            missing_field: field.to_string(),
        })?
        .as_str()
        .ok_or_else(|| PaperWalletError::Serialization {
            reason: format!("'{field}' attribute must be a string"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_by_name_ignores_case() -> std::result::Result<(), PaperWalletError> {
        let p = ProtocolRegistry::resolve_by_name("ethereum", "TEST")?;
        assert_eq!(p, Protocol::new(ProtocolKind::Ethereum, Network::Test));
        Ok(())
    }

    #[test]
    fn unknown_names() {
        assert!(matches!(
            ProtocolRegistry::resolve_by_name("Dogecoin", "Production"),
            Err(PaperWalletError::UnknownProtocol { name }) if name == "Dogecoin"
        ));
        assert!(matches!(
            ProtocolRegistry::resolve_by_name("Bitcoin", "Mainnet"),
            Err(PaperWalletError::UnknownNetwork { name }) if name == "Mainnet"
        ));
    }

    #[test]
    fn from_envelope() -> std::result::Result<(), PaperWalletError> {
        let envelope = json!({ "protocol": "Iota", "network": "Local" });
        assert_eq!(
            ProtocolRegistry::resolve_from_envelope(&envelope)?,
            Protocol::new(ProtocolKind::Iota, Network::Local)
        );
        Ok(())
    }

    #[test]
    fn from_envelope_missing_network() {
        let envelope = json!({ "protocol": "Iota" });
        assert!(matches!(
            ProtocolRegistry::resolve_from_envelope(&envelope),
            Err(PaperWalletError::MalformedEnvelope { missing_field }) if missing_field == "network"
        ));
    }

    #[test]
    fn from_envelope_non_string() {
        let envelope = json!({ "protocol": 3, "network": "Local" });
        assert!(matches!(
            ProtocolRegistry::resolve_from_envelope(&envelope),
            Err(PaperWalletError::Serialization { .. })
        ));
    }
}
