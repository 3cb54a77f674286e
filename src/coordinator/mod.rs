//! Quorum coordinator
//!
//! The coordinator never stores the value. It is responsible for:
//! - Fanning every request out to all vaults concurrently
//! - Majority-vote decisions on reads and writes
//! - Refusing writes that would move the value backwards

pub mod control;
pub mod fanout;
pub mod guard;
pub mod http;
pub mod quorum;
pub mod server;
pub mod vault_client;

pub use control::{ControlPlane, WriteReceipt};
pub use server::Coordinator;
