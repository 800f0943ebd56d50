use anyhow::{anyhow, Result};
use clap::Args;
use goalpost_sdk::{parse_units, validate, CampaignDraft, MilestoneDraft};

use super::common::{build_client, format_tx_hash, ProviderOpts};

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub provider: ProviderOpts,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub category: String,

    /// Funding goal in native-token display units, e.g. "100" or "12.5".
    #[arg(long)]
    pub goal: String,

    /// Campaign duration in days.
    #[arg(long)]
    pub duration: String,

    #[arg(long)]
    pub beneficiaries: String,

    #[arg(long)]
    pub proof_of_work: String,

    /// Milestone as "name=target"; repeat for each milestone.
    #[arg(long = "milestone")]
    pub milestones: Vec<String>,

    /// Media URL; repeat for each entry, order is preserved.
    #[arg(long = "media")]
    pub media: Vec<String>,

    /// Validate and encode without sending a transaction.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl CreateArgs {
    fn draft(&self) -> Result<CampaignDraft> {
        let milestones = self
            .milestones
            .iter()
            .map(|entry| {
                entry
                    .split_once('=')
                    .map(|(name, target)| MilestoneDraft::new(name, target))
                    .ok_or_else(|| anyhow!("milestone {entry:?} is not name=target"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CampaignDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            goal: self.goal.clone(),
            duration: self.duration.clone(),
            category: self.category.clone(),
            beneficiaries: self.beneficiaries.clone(),
            proof_of_work: self.proof_of_work.clone(),
            milestones,
            media: self.media.clone(),
        })
    }
}

pub async fn run(args: CreateArgs) -> Result<()> {
    let draft = args.draft()?;

    if args.dry_run {
        return dry_run(&draft);
    }

    let client = build_client(&args.provider).await?;
    let connected = client.connect_wallet().await?;
    println!("connected as {}", connected.account);

    let tx = client.create_campaign(&draft).await?;
    println!("campaign created in {}", format_tx_hash(tx));
    Ok(())
}

fn dry_run(draft: &CampaignDraft) -> Result<()> {
    let report = validate(draft);
    if !report.is_clean() {
        return Err(anyhow!("draft rejected: {report}"));
    }

    println!("goal_units={}", parse_units(&draft.goal)?);
    for milestone in &draft.milestones {
        println!(
            "milestone name={} target_units={}",
            milestone.name.trim(),
            parse_units(&milestone.target)?
        );
    }
    println!("dry run: transaction not sent");
    Ok(())
}
