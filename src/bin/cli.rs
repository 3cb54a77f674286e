//! CLI for talking to a control server

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quorumvault")]
#[command(about = "quorumvault client CLI")]
#[command(version)]
struct Cli {
    /// Control server URL
    #[arg(long, default_value = "http://localhost:8000")]
    coordinator: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the quorum value
    Get,

    /// Write a new value
    Set {
        /// Non-negative integer
        value: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()?;
    let url = format!("{}/", cli.coordinator.trim_end_matches('/'));

    let resp = match cli.command {
        Commands::Get => client.get(&url).send().await,
        Commands::Set { value } => client.post(&url).body(value.to_string()).send().await,
    }
    .with_context(|| format!("request to {} failed", url))?;

    let status = resp.status();
    let body = resp.text().await?;
    println!("{}", body);

    if !status.is_success() {
        bail!("control server returned {}", status);
    }
    Ok(())
}
