//! # quorumvault
//!
//! A coordinator that presents one quorum-consistent integer replicated
//! across a fixed set of independent storage backends ("vaults"):
//! - Every read and write fans out to all vaults concurrently
//! - A value counts only when a strict majority (`N/2 + 1`) agrees
//! - Writes never move the committed value backwards
//!
//! The coordinator keeps no copy of the value; only the last committed
//! watermark lives in memory.
//!
//! ## Architecture
//!
//! ```text
//!              GET / , POST /
//!                    │
//! ┌──────────────────▼──────────────────────┐
//! │            Control server               │
//! │  watermark check → fan-out → tally      │
//! └───────┬──────────────┬─────────────┬────┘
//!         │ HTTP         │             │
//!   ┌─────▼────┐   ┌─────▼────┐   ┌────▼─────┐
//!   │ Vault 1  │   │ Vault 2  │   │ Vault 3  │
//!   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start the control server
//! ```bash
//! quorumvault-control serve \
//!   --port 8000 \
//!   --vaults localhost:7001,localhost:7002,localhost:7003
//! ```
//!
//! ### Use the CLI
//! ```bash
//! quorumvault --coordinator http://localhost:8000 set 12
//! quorumvault --coordinator http://localhost:8000 get
//! ```

pub mod common;
pub mod coordinator;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use coordinator::Coordinator;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
