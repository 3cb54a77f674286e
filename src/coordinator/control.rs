//! Quorum read and write orchestration
//!
//! Read:  fan out → tally → consensus value or no quorum.
//! Write: validate → watermark check → fan out → tally → commit watermark.

use crate::common::{Error, Result, StoredValue, VaultSet};
use crate::coordinator::fanout::FanOut;
use crate::coordinator::guard::MonotonicGuard;
use crate::coordinator::quorum::{decide_read, decide_write, ReadDecision, WriteDecision};
use crate::coordinator::vault_client::VaultClient;
use std::time::Duration;

/// Outcome of a write that passed validation and reached the vaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReceipt {
    pub value: StoredValue,
    pub acknowledged: usize,
    pub total: usize,
    pub committed: bool,
}

impl WriteReceipt {
    pub fn message(&self) -> String {
        format!("Sent updates to {}/{} vaults", self.acknowledged, self.total)
    }
}

#[derive(Debug)]
pub struct ControlPlane {
    fanout: FanOut,
    guard: MonotonicGuard,
}

impl ControlPlane {
    pub fn new(vaults: VaultSet, vault_timeout: Duration) -> Result<Self> {
        let client = VaultClient::new(vault_timeout)?;
        Ok(Self::with_guard(
            FanOut::new(vaults, client),
            MonotonicGuard::new(),
        ))
    }

    pub fn with_guard(fanout: FanOut, guard: MonotonicGuard) -> Self {
        Self { fanout, guard }
    }

    pub fn vaults(&self) -> &VaultSet {
        self.fanout.vaults()
    }

    /// Lowest value a write may currently carry
    pub fn minimum(&self) -> StoredValue {
        self.guard.current()
    }

    /// The value a majority of vaults agree on
    pub async fn read(&self) -> Result<StoredValue> {
        let vaults = self.vaults();
        let tally = self.fanout.collect_votes().await;
        tracing::info!(responses = tally.responses(), "Counts data: {:?}", tally);

        match decide_read(&tally, vaults) {
            ReadDecision::Consensus(value) => Ok(value),
            ReadDecision::NoQuorum { best } => {
                if let Some((popular, count)) = tally.most_popular() {
                    tracing::warn!(
                        popular,
                        "No majority; only have {}/{} with a consensus value",
                        count,
                        vaults.len()
                    );
                }
                Err(Error::NoQuorum {
                    agreeing: best,
                    required: vaults.majority(),
                    total: vaults.len(),
                })
            }
            ReadDecision::NoData => {
                tracing::error!("Could not reach any vaults to get counts data");
                Err(Error::NoQuorum {
                    agreeing: 0,
                    required: vaults.majority(),
                    total: vaults.len(),
                })
            }
        }
    }

    /// Validate `body` and replicate it. Client errors return before any
    /// vault is contacted; a write that misses quorum still yields a receipt.
    pub async fn write(&self, body: &[u8]) -> Result<WriteReceipt> {
        let value = parse_value(body)?;

        if let Err(e) = self.guard.check(value) {
            tracing::warn!("{}", e);
            return Err(e);
        }

        let vaults = self.vaults();
        let acks = self.fanout.collect_acks(value).await;
        let receipt = WriteReceipt {
            value,
            acknowledged: acks.len(),
            total: vaults.len(),
            committed: decide_write(&acks, vaults) == WriteDecision::Committed,
        };

        if receipt.committed {
            self.guard.commit(value);
            tracing::info!(
                value,
                acknowledged = receipt.acknowledged,
                total = receipt.total,
                "Committed value"
            );
        } else {
            tracing::warn!(
                value,
                acknowledged = receipt.acknowledged,
                required = vaults.majority(),
                total = receipt.total,
                "Write did not reach a majority"
            );
        }
        Ok(receipt)
    }
}

/// Parse a client-supplied value: a decimal integer with an optional sign,
/// no surrounding whitespace, not negative.
pub fn parse_value(body: &[u8]) -> Result<StoredValue> {
    let text = std::str::from_utf8(body)
        .map_err(|e| Error::InvalidInput(format!("body is not UTF-8: {}", e)))?;
    let n: i64 = text
        .parse()
        .map_err(|e| Error::InvalidInput(format!("{:?}: {}", text, e)))?;
    StoredValue::try_from(n).map_err(|_| Error::InvalidInput(format!("negative value {}", n)))
}
