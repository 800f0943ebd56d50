//! Wallet provider boundary: account access, chain management, balances.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::network::NetworkDescriptor;

/// Result alias for provider-boundary calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Failure reported by a wallet provider, keeping the JSON-RPC error code
/// so callers can branch on distinguished rejections.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("provider rejected request (code {code}): {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// EIP-3085/3326 code for "this chain has never been added".
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Failure below the RPC layer (connection refused, timeouts, ...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

/// Abstraction over the wallet provider brokering account access and chain
/// switching on behalf of the user.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Requests account access; the first returned account is the active one.
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;
    /// Hex-encoded id of the provider's currently active chain.
    async fn chain_id(&self) -> ProviderResult<String>;
    /// Asks the provider to activate an already-registered chain.
    async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()>;
    /// Registers (and activates) a chain the provider has never seen.
    async fn add_chain(&self, network: &NetworkDescriptor) -> ProviderResult<()>;
    /// Native-token balance in smallest units.
    async fn native_balance(&self, account: Address) -> ProviderResult<U256>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use rpc::RpcWalletProvider;

#[cfg(not(target_arch = "wasm32"))]
mod rpc {
    use alloy_json_rpc::RpcError;
    use alloy_network::EthereumWallet;
    use alloy_primitives::{Address, TxKind, U256};
    use alloy_provider::{Provider, ProviderBuilder};
    use alloy_rpc_types::eth::transaction::{TransactionInput, TransactionRequest};
    use alloy_signer::Signer;
    use alloy_signer_local::PrivateKeySigner;
    use async_trait::async_trait;
    use log::debug;
    use serde::Serialize;
    use tokio::time::{sleep, Duration};

    use super::{ProviderError, ProviderResult, WalletProvider};
    use crate::{
        contracts::TxHash,
        error::{Error, Result},
        network::NetworkDescriptor,
        transport::{EvmCall, EvmTransport, EvmViewTransport},
    };

    const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
    const RECEIPT_POLL_ATTEMPTS: u32 = 60;

    #[derive(Serialize, Clone, Debug)]
    #[serde(rename_all = "camelCase")]
    struct SwitchChainParams {
        chain_id: String,
    }

    #[derive(Serialize, Clone, Debug)]
    #[serde(rename_all = "camelCase")]
    struct NativeCurrencyParams {
        name: String,
        symbol: String,
        decimals: u8,
    }

    #[derive(Serialize, Clone, Debug)]
    #[serde(rename_all = "camelCase")]
    struct AddChainParams {
        chain_id: String,
        chain_name: String,
        rpc_urls: Vec<String>,
        native_currency: NativeCurrencyParams,
        block_explorer_urls: Vec<String>,
    }

    impl From<&NetworkDescriptor> for AddChainParams {
        fn from(network: &NetworkDescriptor) -> Self {
            Self {
                chain_id: network.chain_id_hex.clone(),
                chain_name: network.name.clone(),
                rpc_urls: vec![network.rpc_url.clone()],
                native_currency: NativeCurrencyParams {
                    name: network.native_currency.name.clone(),
                    symbol: network.native_currency.symbol.clone(),
                    decimals: network.native_currency.decimals,
                },
                block_explorer_urls: vec![network.block_explorer_url.clone()],
            }
        }
    }

    /// JSON-RPC wallet provider backed by Alloy's provider stack.
    ///
    /// An optional local private key stands in for a browser wallet: with a
    /// key, account requests answer with the signer's address and writes are
    /// signed locally; without one, accounts come from the node and writes
    /// are refused.
    #[derive(Clone)]
    pub struct RpcWalletProvider {
        rpc_url: reqwest::Url,
        wallet: Option<PrivateKeySigner>,
        default_gas: u64,
    }

    impl RpcWalletProvider {
        /// Builds a provider targeting `rpc_url`, signing with
        /// `private_key_hex` when given.
        pub async fn new(rpc_url: &str, private_key_hex: Option<&str>) -> Result<Self> {
            let url = reqwest::Url::parse(rpc_url)
                .map_err(|err| Error::Config(format!("rpc url: {err}")))?;

            let wallet = match private_key_hex {
                Some(key) => {
                    let base = ProviderBuilder::new().on_http(url.clone());
                    let chain_id = base
                        .get_chain_id()
                        .await
                        .map_err(|err| Error::Transport(err.to_string()))?;
                    let mut signer: PrivateKeySigner = key
                        .trim_start_matches("0x")
                        .parse()
                        .map_err(|_| Error::Config("private key does not parse".into()))?;
                    signer.set_chain_id(Some(chain_id));
                    Some(signer)
                }
                None => None,
            };

            Ok(Self {
                rpc_url: url,
                wallet,
                default_gas: 500_000,
            })
        }

        fn signer(&self) -> Result<&PrivateKeySigner> {
            self.wallet.as_ref().ok_or(Error::NotConnected)
        }

        fn build_transaction(&self, call: &EvmCall) -> Result<TransactionRequest> {
            let signer = self.signer()?;
            let mut tx = TransactionRequest::default()
                .from(signer.address())
                .gas_limit(call.gas_limit.unwrap_or(self.default_gas))
                .input(TransactionInput::from(call.data.clone()))
                .value(call.value);
            tx.to = Some(TxKind::Call(call.to));
            Ok(tx)
        }
    }

    fn rpc_failure<E: std::error::Error>(err: RpcError<E>) -> ProviderError {
        match err.as_error_resp() {
            Some(payload) => ProviderError::new(payload.code, payload.message.to_string()),
            None => ProviderError::transport(err.to_string()),
        }
    }

    #[async_trait]
    impl WalletProvider for RpcWalletProvider {
        async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
            if let Some(wallet) = &self.wallet {
                return Ok(vec![wallet.address()]);
            }
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            provider.get_accounts().await.map_err(rpc_failure)
        }

        async fn chain_id(&self) -> ProviderResult<String> {
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            let id = provider.get_chain_id().await.map_err(rpc_failure)?;
            Ok(format!("{id:#x}"))
        }

        async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()> {
            let params = [SwitchChainParams {
                chain_id: chain_id_hex.to_string(),
            }];
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            provider
                .raw_request::<_, serde_json::Value>("wallet_switchEthereumChain".into(), params)
                .await
                .map(|_| ())
                .map_err(rpc_failure)
        }

        async fn add_chain(&self, network: &NetworkDescriptor) -> ProviderResult<()> {
            let params = [AddChainParams::from(network)];
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            provider
                .raw_request::<_, serde_json::Value>("wallet_addEthereumChain".into(), params)
                .await
                .map(|_| ())
                .map_err(rpc_failure)
        }

        async fn native_balance(&self, account: Address) -> ProviderResult<U256> {
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            provider.get_balance(account).await.map_err(rpc_failure)
        }
    }

    #[async_trait]
    impl EvmTransport for RpcWalletProvider {
        async fn send(&self, call: EvmCall) -> Result<TxHash> {
            let tx = self.build_transaction(&call)?;
            let wallet = self.signer()?.clone();
            let provider = ProviderBuilder::new()
                .with_recommended_fillers()
                .wallet(EthereumWallet::new(wallet))
                .on_http(self.rpc_url.clone());
            let pending = provider
                .send_transaction(tx)
                .await
                .map_err(|err| Error::Transport(err.to_string()))?;
            let hash = *pending.tx_hash();
            debug!("submitted transaction {hash}");
            Ok(TxHash(hash))
        }

        async fn confirm(&self, tx: TxHash) -> Result<()> {
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            for _ in 0..RECEIPT_POLL_ATTEMPTS {
                let receipt = provider
                    .get_transaction_receipt(tx.0)
                    .await
                    .map_err(|err| Error::Transport(err.to_string()))?;
                if let Some(receipt) = receipt {
                    if receipt.status() {
                        return Ok(());
                    }
                    return Err(Error::TransactionFailed(format!(
                        "transaction {} reverted",
                        tx.0
                    )));
                }
                sleep(RECEIPT_POLL_INTERVAL).await;
            }
            Err(Error::TransactionFailed(format!(
                "transaction {} not confirmed in time",
                tx.0
            )))
        }
    }

    #[async_trait]
    impl EvmViewTransport for RpcWalletProvider {
        async fn call_view(&self, call: EvmCall) -> Result<alloy_primitives::Bytes> {
            let mut tx = TransactionRequest::default()
                .input(TransactionInput::from(call.data.clone()))
                .value(call.value);
            tx.to = Some(TxKind::Call(call.to));
            let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
            provider
                .call(&tx)
                .await
                .map_err(|err| Error::Transport(err.to_string()))
        }
    }
}
