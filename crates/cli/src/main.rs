use anyhow::Context;
use bot_panel_core::{ConfigLoader, OperationResult, PanelConfig};
use bot_panel_probe::SystemProbe;
use bot_panel_supervisor::{BotCommand, PgrepLocator, Supervisor, UpdateRunner};
use bot_panel_web_api::{ApiServer, AppState};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bot-panel")]
#[command(about = "Remote control panel for a trading bot process", long_about = None)]
struct Cli {
    /// Config file path (a sibling .json file is read too)
    #[arg(short, long, default_value = "config/panel.toml", env = "PANEL_CONFIG")]
    config: PathBuf,

    /// Override the panel base directory
    #[arg(long)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP control server
    Serve {
        /// Listen host
        #[arg(long)]
        host: Option<String>,
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print bot status (running, PIDs, state, recent trades)
    Status,
    /// Print host status (uptime, disk, memory, overlay network)
    System,
    /// Start the bot if it is not running
    Start,
    /// Send SIGTERM to the running bot
    Stop,
    /// Stop, wait, then start the bot
    Restart,
    /// Run the dashboard update script once
    Update,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(base_dir) = cli.base_dir {
        config.bot.base_dir = base_dir;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            let supervisor = supervisor(config);
            print_json(&supervisor.status().await)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::System => {
            print_json(&SystemProbe::from_config(&config).probe().await)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Start => run_bot_command(config, BotCommand::Start).await,
        Commands::Stop => run_bot_command(config, BotCommand::Stop).await,
        Commands::Restart => run_bot_command(config, BotCommand::Restart).await,
        Commands::Update => {
            let result = UpdateRunner::new(Arc::new(config)).run().await;
            report(&result)
        }
    }
}

async fn run_server(config: PanelConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr();
    let base_dir = config.base_dir().to_path_buf();
    tracing::info!(
        "Supervising {} from {}",
        config.bot_script_path().display(),
        base_dir.display()
    );

    let config = Arc::new(config);
    let locator = Arc::new(PgrepLocator::from_config(&config));
    let server = ApiServer::new(AppState::new(config, locator));

    server.serve(&addr).await
}

fn supervisor(config: PanelConfig) -> Supervisor {
    let locator = Arc::new(PgrepLocator::from_config(&config));
    Supervisor::new(Arc::new(config), locator)
}

async fn run_bot_command(config: PanelConfig, command: BotCommand) -> anyhow::Result<ExitCode> {
    let result = supervisor(config).execute(command).await;
    report(&result)
}

fn report(result: &OperationResult) -> anyhow::Result<ExitCode> {
    print_json(result)?;
    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
