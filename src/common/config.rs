//! Configuration for the control server

use crate::common::{Error, Result, VaultSet};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a TOML config file
pub const CONFIG_ENV: &str = "QUORUMVAULT_CONFIG";

/// Prefix for environment overrides, e.g. `QUORUMVAULT_CONTROL__PORT=9000`
pub const ENV_PREFIX: &str = "QUORUMVAULT";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Control server config
    #[serde(default)]
    pub control: ControlConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            control: ControlConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file (explicit path or
    /// `QUORUMVAULT_CONFIG`), then `QUORUMVAULT_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut builder = config::Config::builder();
        if let Some(file) = &file {
            builder = builder.add_source(config::File::from(file.as_path()).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("control.vaults"),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.control.validate()?;
        Ok(config)
    }
}

/// Control server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Interface to listen on
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Vault addresses (host:port)
    #[serde(default)]
    pub vaults: Vec<String>,

    /// Per-vault call timeout
    #[serde(default = "default_vault_timeout")]
    pub vault_timeout_ms: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
fn default_port() -> u16 {
    8000
}
fn default_vault_timeout() -> u64 {
    1000
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            vaults: Vec::new(),
            vault_timeout_ms: default_vault_timeout(),
        }
    }
}

impl ControlConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn vault_timeout(&self) -> Duration {
        Duration::from_millis(self.vault_timeout_ms)
    }

    pub fn vault_set(&self) -> Result<VaultSet> {
        VaultSet::parse(&self.vaults.join(","))
    }

    pub fn validate(&self) -> Result<()> {
        if self.vault_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "vault_timeout_ms must be greater than zero".to_string(),
            ));
        }
        self.vault_set().map(|_| ())
    }
}
