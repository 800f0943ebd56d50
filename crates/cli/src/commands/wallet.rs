use anyhow::Result;
use clap::Args;

use super::common::{build_client, ProviderOpts};

#[derive(Clone, Debug, Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub provider: ProviderOpts,
}

pub async fn run(args: BalanceArgs) -> Result<()> {
    let client = build_client(&args.provider).await?;
    let connected = client.connect_wallet().await?;
    println!("account={}", connected.account);
    println!("balance={}", connected.balance);
    Ok(())
}
