use anyhow::Result;
use clap::Args;
use goalpost_sdk::Campaign;

use super::common::{build_client, ProviderOpts};

#[derive(Clone, Debug, Args)]
pub struct CampaignsArgs {
    #[command(flatten)]
    pub provider: ProviderOpts,

    /// Connect first and show only campaigns created by the wallet account.
    #[arg(long, default_value_t = false)]
    pub mine: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub provider: ProviderOpts,

    /// Ledger-assigned campaign id.
    #[arg(long)]
    pub id: u64,
}

pub async fn list(args: CampaignsArgs) -> Result<()> {
    let client = build_client(&args.provider).await?;
    if args.mine {
        client.connect_wallet().await?;
    }
    client.fetch_campaigns().await?;

    let campaigns = if args.mine {
        client.user_campaigns().await
    } else {
        client.campaigns().await
    };
    if campaigns.is_empty() {
        println!("no campaigns found");
        return Ok(());
    }
    for campaign in &campaigns {
        print_row(campaign);
    }
    Ok(())
}

pub async fn show(args: ShowArgs) -> Result<()> {
    let client = build_client(&args.provider).await?;
    let details = client.campaign_by_id(args.id).await?;

    println!("id={}", details.id);
    println!("creator={}", details.creator);
    println!("title={}", details.title);
    println!("category={}", details.category);
    println!("goal={}", details.goal_amount);
    println!("funded={}", details.total_funded);
    println!("active={}", details.is_active);
    println!("duration_days={}", details.duration);
    println!("description={}", details.description);
    println!("proof_of_work={}", details.proof_of_work);
    println!("beneficiaries={}", details.beneficiaries);
    for url in &details.media {
        println!("media={url}");
    }
    Ok(())
}

fn print_row(campaign: &Campaign) {
    println!(
        "#{} [{}] {} goal={} funded={} creator={}",
        campaign.id,
        if campaign.is_active { "active" } else { "closed" },
        campaign.title,
        campaign.goal_amount,
        campaign.total_funded,
        campaign.creator,
    );
}
