//! Common utilities and types shared across quorumvault

pub mod config;
pub mod error;
pub mod tracing_middleware;
pub mod types;

pub use config::{Config, ControlConfig};
pub use error::{Error, Result};
pub use types::{StoredValue, VaultAddress, VaultSet};
