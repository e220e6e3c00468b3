//! MAIR CLI Application

mod cli;

use clap::Parser as _;
use cli::{AdminCommands, Cli, Commands, LedgerCommands, TreeCommands};
use mair_sdk::commands::{
    build_distribution, claim, distribution_schema, init_ledger, print_status, rotate_root,
    verify_proofs, withdraw,
};

fn init_tracing() -> eyre::Result<()> {
    #[cfg(feature = "tokio-console")]
    {
        use tracing_subscriber::prelude::*;
        tracing_subscriber::registry()
            .with(console_subscriber::spawn())
            .with(
                tracing_subscriber::fmt::layer().with_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                ),
            )
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;
    }

    #[cfg(not(feature = "tokio-console"))]
    {
        // Logs go to stderr so that `status` and `tree schema` output stays parseable
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_timer(tracing_subscriber::fmt::time::uptime())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;
    }

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Tree { command } => match command {
            TreeCommands::Build { args } => {
                build_distribution(args.allocation, args.config_out, args.proofs_out).await
            }
            TreeCommands::Verify { args } => verify_proofs(args.proofs, args.root).await,
            TreeCommands::Schema => distribution_schema(),
        },
        Commands::Ledger { command } => match command {
            LedgerCommands::Init { args } => {
                init_ledger(
                    args.config,
                    args.ledger,
                    args.admin,
                    args.vault,
                    args.deposit,
                )
                .await
            }
        },
        Commands::Claim { args } => {
            claim(
                args.files.ledger,
                args.files.journal,
                args.proofs,
                args.address,
                args.amount,
            )
            .await
        }
        Commands::Admin { command } => match command {
            AdminCommands::RotateRoot { args } => {
                rotate_root(
                    args.files.ledger,
                    args.files.journal,
                    args.caller,
                    args.source.into(),
                )
                .await
            }
            AdminCommands::Withdraw { args } => {
                withdraw(
                    args.files.ledger,
                    args.files.journal,
                    args.caller,
                    args.amount,
                )
                .await
            }
        },
        Commands::Status { args } => print_status(args.ledger, args.address).await,
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
