//! Concurrent dispatch to every vault
//!
//! One task per vault, all joined before a decision is made. Tasks record
//! their result into a per-request collection under a mutex; a failed vault
//! simply records nothing.

use crate::common::{StoredValue, VaultSet};
use crate::coordinator::quorum::{AckSet, VoteTally};
use crate::coordinator::vault_client::VaultClient;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct FanOut {
    vaults: VaultSet,
    client: VaultClient,
}

impl FanOut {
    pub fn new(vaults: VaultSet, client: VaultClient) -> Self {
        Self { vaults, client }
    }

    pub fn vaults(&self) -> &VaultSet {
        &self.vaults
    }

    /// Read every vault and tally the answers
    pub async fn collect_votes(&self) -> VoteTally {
        let tally = Arc::new(Mutex::new(VoteTally::new()));
        let mut tasks = JoinSet::new();

        for vault in self.vaults.iter().cloned() {
            let client = self.client.clone();
            let tally = tally.clone();
            tasks.spawn(async move {
                match client.read(&vault).await {
                    Ok(value) => {
                        tracing::debug!(vault = %vault, value, "Read vault");
                        tally
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .record(value);
                    }
                    Err(e) => tracing::warn!("Error getting value from vault: {}", e),
                }
            });
        }
        join_all(&mut tasks).await;

        let tally = tally.lock().unwrap_or_else(PoisonError::into_inner).clone();
        tally
    }

    /// Send `value` to every vault and collect acknowledgements
    pub async fn collect_acks(&self, value: StoredValue) -> AckSet {
        let acks = Arc::new(Mutex::new(AckSet::new()));
        let mut tasks = JoinSet::new();

        for vault in self.vaults.iter().cloned() {
            let client = self.client.clone();
            let acks = acks.clone();
            tasks.spawn(async move {
                tracing::debug!(vault = %vault, value, "Setting vault value");
                match client.write(&vault, value).await {
                    Ok(()) => acks
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .acknowledge(vault),
                    Err(e) => tracing::warn!(value, "Error setting vault value: {}", e),
                }
            });
        }
        join_all(&mut tasks).await;

        let acks = acks.lock().unwrap_or_else(PoisonError::into_inner).clone();
        acks
    }
}

/// Wait for every task. A task that panicked counts as an abstention.
async fn join_all(tasks: &mut JoinSet<()>) {
    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            tracing::error!("Vault task failed: {}", e);
        }
    }
}
