//! Monotonic write watermark
//!
//! Holds the last value committed through a quorum write. Writes below it are
//! rejected before any vault is contacted.
//!
//! `check` and `commit` take the lock separately. Two overlapping writers can
//! both pass `check` against the same watermark and then commit in either
//! order; the watermark ends at whichever committed last.

use crate::common::{Error, Result, StoredValue};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct MonotonicGuard {
    minimum: RwLock<StoredValue>,
}

impl MonotonicGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(minimum: StoredValue) -> Self {
        Self {
            minimum: RwLock::new(minimum),
        }
    }

    /// Current watermark
    pub fn current(&self) -> StoredValue {
        *self.minimum.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject `proposed` if it would move the value backwards
    pub fn check(&self, proposed: StoredValue) -> Result<()> {
        let current = *self.minimum.read().unwrap_or_else(PoisonError::into_inner);
        if proposed < current {
            return Err(Error::Regression { current, proposed });
        }
        Ok(())
    }

    /// Record a value that reached quorum
    pub fn commit(&self, value: StoredValue) {
        *self.minimum.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}
