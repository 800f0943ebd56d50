mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goalpost-cli", about = "Goalpost campaign developer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List campaigns recorded on the contract.
    Campaigns(commands::campaigns::CampaignsArgs),
    /// Show one campaign's full record.
    Show(commands::campaigns::ShowArgs),
    /// Validate and submit a new campaign.
    Create(commands::create::CreateArgs),
    /// Connect the wallet and print account + native balance.
    Balance(commands::wallet::BalanceArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Campaigns(args) => commands::campaigns::list(args).await,
        Commands::Show(args) => commands::campaigns::show(args).await,
        Commands::Create(args) => commands::create::run(args).await,
        Commands::Balance(args) => commands::wallet::run(args).await,
    };
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
