use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use goalpost_sdk::{AppConfig, GoalpostClient, RpcWalletProvider};

/// Connection flags shared by every subcommand.
#[derive(Clone, Debug, Args)]
pub struct ProviderOpts {
    /// JSON config file overriding the built-in Volta deployment.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint; defaults to the configured network's RPC.
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Private key (0x-prefixed) acting as the wallet. Falls back to the
    /// GOALPOST_PRIVATE_KEY environment variable; omit both for read-only
    /// access through node-managed accounts.
    #[arg(long)]
    pub private_key: Option<String>,
}

impl ProviderOpts {
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::from_file(path).context("loading config file"),
            None => Ok(AppConfig::volta()),
        }
    }
}

pub async fn build_client(opts: &ProviderOpts) -> Result<GoalpostClient<RpcWalletProvider>> {
    let config = opts.load_config()?;
    let rpc_url = opts
        .rpc_url
        .clone()
        .unwrap_or_else(|| config.network.rpc_url.clone());
    let private_key = opts
        .private_key
        .clone()
        .or_else(|| std::env::var("GOALPOST_PRIVATE_KEY").ok());
    let provider = RpcWalletProvider::new(&rpc_url, private_key.as_deref())
        .await
        .context("building wallet provider")?;
    Ok(GoalpostClient::new(config, Some(provider)))
}

pub fn format_tx_hash(hash: goalpost_sdk::TxHash) -> String {
    format!("0x{}", hex::encode(hash.bytes()))
}
