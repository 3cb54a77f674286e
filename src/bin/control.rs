//! Control server binary

use clap::{Parser, Subcommand};
use quorumvault::{Config, Coordinator};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quorumvault-control")]
#[command(about = "quorumvault control server: majority reads and monotonic writes over vaults")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start control server
    Serve {
        /// TOML config file (defaults to $QUORUMVAULT_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Interface to listen on
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port on which to listen for requests
        #[arg(long)]
        port: Option<u16>,

        /// Vault addresses (comma-separated host:port)
        #[arg(long, value_delimiter = ',')]
        vaults: Option<Vec<String>>,

        /// Per-vault call timeout in milliseconds
        #[arg(long)]
        vault_timeout_ms: Option<u64>,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            vaults,
            vault_timeout_ms,
            log_level,
        } => {
            // File and environment first, explicit flags win
            let mut file_config = Config::load(config.as_deref())?;
            let control = &mut file_config.control;
            if let Some(host) = host {
                control.host = host;
            }
            if let Some(port) = port {
                control.port = port;
            }
            if let Some(vaults) = vaults {
                control.vaults = vaults;
            }
            if let Some(timeout) = vault_timeout_ms {
                control.vault_timeout_ms = timeout;
            }
            let log_level = log_level.unwrap_or_else(|| file_config.log_level.clone());

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| log_level.into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            let coord = Coordinator::new(file_config.control)?;
            coord.serve().await?;
        }
    }

    Ok(())
}
