//! Startup configuration: which contract, on which chain.

use std::path::Path;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    network::{NativeCurrency, NetworkDescriptor},
};

/// Deployment the client talks to. Loaded once at startup and treated as a
/// constant afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub contract_address: Address,
    pub network: NetworkDescriptor,
}

impl AppConfig {
    /// The Energy Web Volta testnet deployment.
    pub fn volta() -> Self {
        Self {
            contract_address: address!("658f17BC6Dcfc19BBc4A76B260a8Dab56A413799"),
            network: NetworkDescriptor {
                chain_id_hex: "0x12047".into(),
                name: "Energy Web Volta Testnet".into(),
                rpc_url: "https://volta-rpc.energyweb.org".into(),
                block_explorer_url: "https://volta-explorer.energyweb.org".into(),
                native_currency: NativeCurrency {
                    name: "Energy Web Volta Testnet".into(),
                    symbol: "VT".into(),
                    decimals: 18,
                },
            },
        }
    }

    /// Reads a JSON config file with the same shape as [`AppConfig`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|err| Error::Config(format!("{}: {err}", path.as_ref().display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| Error::Config(format!("{}: {err}", path.as_ref().display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volta_descriptor_is_consistent() {
        let config = AppConfig::volta();
        assert_eq!(config.network.chain_id_hex, "0x12047");
        assert_eq!(config.network.native_currency.decimals, 18);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig::volta();
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: AppConfig = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }
}
