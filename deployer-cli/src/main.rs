mod tui;

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clarity_deployer::wallet::{truncate_middle, BridgeConnector, ConnectionTracker};
use clarity_deployer::{AppConfig, ClarityVersion, ContractDraft, DeployOutcome, DeploymentSubmitter};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clarity-deployer")]
#[command(about = "Deploy Clarity contracts to the Stacks testnet through your wallet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the Terminal User Interface (default)
    Tui,
    /// Show the persisted wallet session
    Status,
    /// Authorize the wallet and persist its session
    Connect,
    /// Forget the wallet session
    Disconnect,
    /// Deploy a contract without the TUI
    Deploy {
        /// Contract name
        #[arg(long)]
        name: String,
        /// Path to the Clarity source file
        #[arg(long)]
        source: PathBuf,
        /// Clarity version: 2 or 3
        #[arg(long, default_value = "2")]
        clarity_version: ClarityVersion,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file
    init_logging(&config, matches!(command, Commands::Tui))?;
    info!("Starting Clarity Deployer v{}", env!("CARGO_PKG_VERSION"));

    let connector = BridgeConnector::from_config(&config)?;
    info!("Wallet bridge: {}", connector.endpoint());

    match command {
        Commands::Tui => tui::run_tui(config, connector).await,
        Commands::Status => {
            let mut tracker = ConnectionTracker::new();
            tracker.check_existing_session(&connector);
            match tracker.address() {
                Some(address) => println!("Connected: {} ({})", truncate_middle(address, 6, 4), address),
                None if tracker.is_connected() => println!("Connected (no STX address in session)"),
                None => println!("Not connected"),
            }
            println!("Session file: {}", connector.store().path().display());
            Ok(())
        }
        Commands::Connect => {
            let mut tracker = ConnectionTracker::new();
            println!("Approve the connection in your wallet...");
            tracker.connect_wallet(&connector).await?;
            println!("Connected: {}", tracker.address().unwrap_or("(no STX address)"));
            Ok(())
        }
        Commands::Disconnect => {
            let mut tracker = ConnectionTracker::new();
            tracker.disconnect_wallet(&connector).await;
            println!("Disconnected");
            Ok(())
        }
        Commands::Deploy {
            name,
            source,
            clarity_version,
        } => deploy(&connector, name, source, clarity_version).await,
    }
}

async fn deploy(
    connector: &BridgeConnector,
    name: String,
    source: PathBuf,
    version: ClarityVersion,
) -> anyhow::Result<()> {
    let code = std::fs::read_to_string(&source)
        .with_context(|| format!("cannot read {}", source.display()))?;

    let mut tracker = ConnectionTracker::new();
    tracker.check_existing_session(connector);

    let mut draft = ContractDraft::new(version);
    draft.set_name(name);
    draft.set_source(code);

    println!("Waiting for wallet confirmation...");
    let mut submitter = DeploymentSubmitter::new();
    let outcome = submitter.deploy(tracker.session(), &mut draft, connector).await;
    if let Some(status) = submitter.status_message() {
        println!("{}", status);
    }

    match outcome {
        DeployOutcome::Success { .. } => Ok(()),
        DeployOutcome::Failed { message } => Err(anyhow::anyhow!(message)),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.as_str().into());

    if to_file {
        let path = config.log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
