//! Connection configuration
//!
//! Field names use the wrapped SDK's wire shape (camelCase), so serialized
//! options can be handed to the JS facade unchanged. The serialized form also
//! feeds the session's client memo key: two option sets with the same
//! serialization share one connected client.

use serde::{Deserialize, Serialize};

/// Target network. Two values only; the console defaults to mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

/// Low-level connection settings, applied only on next connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_failed_address: Option<bool>,
}

impl ConnectionSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Options for one SDK connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    pub network: Network,
    pub trusted: bool,
    pub proofs: bool,
    /// Protocol version override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ConnectionSettings>,
}

/// Advanced settings collected from the configuration panel. Blank inputs
/// leave the corresponding option unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_failed_address: Option<bool>,
}

impl AdvancedOptions {
    /// Fold the advanced settings into connection options.
    pub fn apply_to(&self, options: &mut ConnectOptions) {
        options.version = self.platform_version;
        let settings = ConnectionSettings {
            connect_timeout_ms: self.connect_timeout,
            timeout_ms: self.request_timeout,
            retries: self.retries,
            ban_failed_address: self.ban_failed_address,
        };
        options.settings = (!settings.is_empty()).then_some(settings);
    }
}
