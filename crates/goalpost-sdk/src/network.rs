//! Network descriptors and the switch-then-add reconciliation flow.
//!
//! Wallet providers refuse to switch to a chain they have never seen, but
//! accept a combined "add" request that both registers and activates it.
//! The distinguished rejection code 4902 is the only branching signal; the
//! rest of the flow stays linear.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    provider::WalletProvider,
};

/// Native currency metadata advertised when registering a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Static description of the chain the contract lives on.
///
/// Loaded once at startup and never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub chain_id_hex: String,
    pub name: String,
    pub rpc_url: String,
    pub block_explorer_url: String,
    pub native_currency: NativeCurrency,
}

/// Brings the provider's active chain in line with `required`.
///
/// Already on the right chain is a no-op with zero provider prompts. An
/// unrecognized chain (code 4902) is registered via `add_chain`, which also
/// activates it. Every other provider failure surfaces as
/// [`Error::NetworkSwitchFailed`].
pub async fn ensure_network<P: WalletProvider>(
    provider: &P,
    required: &NetworkDescriptor,
) -> Result<()> {
    let current = provider
        .chain_id()
        .await
        .map_err(|err| Error::NetworkSwitchFailed(err.to_string()))?;
    if current.eq_ignore_ascii_case(&required.chain_id_hex) {
        debug!("already on chain {current}");
        return Ok(());
    }

    debug!(
        "active chain {current} differs from required {}; requesting switch",
        required.chain_id_hex
    );
    match provider.switch_chain(&required.chain_id_hex).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_unrecognized_chain() => {
            debug!("chain {} unknown to provider, adding it", required.chain_id_hex);
            provider.add_chain(required).await.map_err(|err| {
                warn!("adding chain {} failed: {err}", required.chain_id_hex);
                Error::NetworkSwitchFailed(err.to_string())
            })
        }
        Err(err) => {
            warn!("switch to chain {} failed: {err}", required.chain_id_hex);
            Err(Error::NetworkSwitchFailed(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use alloy_primitives::{Address, U256};
    use async_trait::async_trait;

    use super::*;
    use crate::provider::{ProviderError, ProviderResult};

    struct RecorderProvider {
        chain: &'static str,
        switch_error: Option<i64>,
        chain_id_reads: Mutex<u32>,
        switches: Mutex<Vec<String>>,
        adds: Mutex<Vec<NetworkDescriptor>>,
    }

    impl RecorderProvider {
        fn on_chain(chain: &'static str) -> Self {
            Self {
                chain,
                switch_error: None,
                chain_id_reads: Mutex::new(0),
                switches: Mutex::new(Vec::new()),
                adds: Mutex::new(Vec::new()),
            }
        }

        fn failing_switch(chain: &'static str, code: i64) -> Self {
            Self {
                switch_error: Some(code),
                ..Self::on_chain(chain)
            }
        }
    }

    #[async_trait]
    impl WalletProvider for RecorderProvider {
        async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
            Ok(vec![Address::repeat_byte(0x11)])
        }

        async fn chain_id(&self) -> ProviderResult<String> {
            *self.chain_id_reads.lock().unwrap() += 1;
            Ok(self.chain.to_string())
        }

        async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()> {
            self.switches.lock().unwrap().push(chain_id_hex.to_string());
            match self.switch_error {
                Some(code) => Err(ProviderError::new(code, "switch rejected")),
                None => Ok(()),
            }
        }

        async fn add_chain(&self, network: &NetworkDescriptor) -> ProviderResult<()> {
            self.adds.lock().unwrap().push(network.clone());
            Ok(())
        }

        async fn native_balance(&self, _account: Address) -> ProviderResult<U256> {
            Ok(U256::ZERO)
        }
    }

    fn required() -> NetworkDescriptor {
        crate::config::AppConfig::volta().network
    }

    #[tokio::test]
    async fn matching_chain_is_a_no_op() {
        let provider = RecorderProvider::on_chain("0x12047");
        ensure_network(&provider, &required()).await.expect("no-op");
        ensure_network(&provider, &required()).await.expect("no-op");
        assert!(provider.switches.lock().unwrap().is_empty());
        assert!(provider.adds.lock().unwrap().is_empty());
        assert_eq!(*provider.chain_id_reads.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn chain_id_compare_ignores_hex_case() {
        let provider = RecorderProvider::on_chain("0x12047");
        let mut net = required();
        net.chain_id_hex = "0x12047".to_uppercase();
        ensure_network(&provider, &net).await.expect("no-op");
        assert!(provider.switches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatch_triggers_exactly_one_switch() {
        let provider = RecorderProvider::on_chain("0x1");
        ensure_network(&provider, &required()).await.expect("switch");
        assert_eq!(*provider.switches.lock().unwrap(), vec!["0x12047"]);
        assert!(provider.adds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_chain_falls_back_to_add() {
        let provider = RecorderProvider::failing_switch("0x1", 4902);
        ensure_network(&provider, &required()).await.expect("add path");
        let adds = provider.adds.lock().unwrap();
        assert_eq!(adds.len(), 1);
        assert_eq!(adds[0], required());
    }

    #[tokio::test]
    async fn other_switch_failures_surface() {
        let provider = RecorderProvider::failing_switch("0x1", 4001);
        let err = ensure_network(&provider, &required())
            .await
            .expect_err("user rejection");
        assert!(matches!(err, Error::NetworkSwitchFailed(_)));
        assert!(provider.adds.lock().unwrap().is_empty());
    }
}
