//! Majority-vote decisions over per-vault results

use crate::common::{StoredValue, VaultAddress, VaultSet};
use std::collections::{HashMap, HashSet};

/// How many vaults reported each value during one read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: HashMap<StoredValue, usize>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: StoredValue) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Number of vaults that answered
    pub fn responses(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The most reported value and its count. Ties resolve to the smaller value.
    pub fn most_popular(&self) -> Option<(StoredValue, usize)> {
        self.counts
            .iter()
            .map(|(&value, &count)| (value, count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }
}

/// Vaults that acknowledged one write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AckSet {
    vaults: HashSet<VaultAddress>,
}

impl AckSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acknowledge(&mut self, vault: VaultAddress) {
        self.vaults.insert(vault);
    }

    pub fn contains(&self, vault: &VaultAddress) -> bool {
        self.vaults.contains(vault)
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDecision {
    /// A strict majority of the vault set reported this value
    Consensus(StoredValue),
    /// Vaults answered but no value reached the threshold. `best` is the
    /// largest group size, kept for diagnostics only.
    NoQuorum { best: usize },
    /// No vault answered
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    Committed,
    Rejected,
}

/// Decide the read outcome.
///
/// Groups partition at most N votes, so at most one group can hold a strict
/// majority; the first one found is the answer.
pub fn decide_read(tally: &VoteTally, vaults: &VaultSet) -> ReadDecision {
    if tally.is_empty() {
        return ReadDecision::NoData;
    }

    let mut best = 0;
    for (&value, &count) in &tally.counts {
        if vaults.has_majority(count) {
            return ReadDecision::Consensus(value);
        }
        best = best.max(count);
    }
    ReadDecision::NoQuorum { best }
}

pub fn decide_write(acks: &AckSet, vaults: &VaultSet) -> WriteDecision {
    if vaults.has_majority(acks.len()) {
        WriteDecision::Committed
    } else {
        WriteDecision::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vaults(n: usize) -> VaultSet {
        VaultSet::new(
            (0..n)
                .map(|i| VaultAddress::new(format!("vault-{}:80", i)).unwrap())
                .collect(),
        )
    }

    fn tally(values: &[StoredValue]) -> VoteTally {
        let mut tally = VoteTally::new();
        for &v in values {
            tally.record(v);
        }
        tally
    }

    #[test]
    fn test_majority_value_wins() {
        let decision = decide_read(&tally(&[7, 7, 7, 9, 9]), &vaults(5));
        assert_eq!(decision, ReadDecision::Consensus(7));
    }

    #[test]
    fn test_split_vote_has_no_quorum() {
        // One vault unreachable, the rest split 2/2
        let decision = decide_read(&tally(&[7, 7, 9, 9]), &vaults(5));
        assert_eq!(decision, ReadDecision::NoQuorum { best: 2 });
    }

    #[test]
    fn test_threshold_counts_configured_vaults_not_responders() {
        // Two agreeing answers out of five configured is not a majority
        let decision = decide_read(&tally(&[4, 4]), &vaults(5));
        assert_eq!(decision, ReadDecision::NoQuorum { best: 2 });

        let decision = decide_read(&tally(&[4, 4, 4]), &vaults(5));
        assert_eq!(decision, ReadDecision::Consensus(4));
    }

    #[test]
    fn test_three_way_split() {
        // Seven vaults: 3 say 1, 3 say 2, 1 says 4
        let decision = decide_read(&tally(&[1, 2, 1, 2, 2, 4, 1]), &vaults(7));
        assert_eq!(decision, ReadDecision::NoQuorum { best: 3 });
    }

    #[test]
    fn test_no_answers() {
        assert_eq!(decide_read(&VoteTally::new(), &vaults(3)), ReadDecision::NoData);
        assert_eq!(decide_read(&VoteTally::new(), &vaults(0)), ReadDecision::NoData);
    }

    #[test]
    fn test_even_vault_count_needs_more_than_half() {
        assert_eq!(
            decide_read(&tally(&[5, 5, 6, 6]), &vaults(4)),
            ReadDecision::NoQuorum { best: 2 }
        );
        assert_eq!(
            decide_read(&tally(&[5, 5, 5, 6]), &vaults(4)),
            ReadDecision::Consensus(5)
        );
    }

    #[test]
    fn test_single_vault() {
        assert_eq!(decide_read(&tally(&[0]), &vaults(1)), ReadDecision::Consensus(0));
    }

    #[test]
    fn test_tally_bookkeeping() {
        let t = tally(&[3, 3, 8]);
        assert_eq!(t.responses(), 3);
        assert_eq!(t.most_popular(), Some((3, 2)));
        assert_eq!(tally(&[5, 2]).most_popular(), Some((2, 1)));
        assert_eq!(VoteTally::new().most_popular(), None);
    }

    #[test]
    fn test_write_decision() {
        let set = vaults(5);
        let mut acks = AckSet::new();
        for vault in set.iter().take(2) {
            acks.acknowledge(vault.clone());
        }
        assert_eq!(decide_write(&acks, &set), WriteDecision::Rejected);

        // Duplicate acknowledgements do not count twice
        let first = set.iter().next().unwrap().clone();
        acks.acknowledge(first.clone());
        assert_eq!(acks.len(), 2);
        assert!(acks.contains(&first));
        assert_eq!(decide_write(&acks, &set), WriteDecision::Rejected);

        for vault in set.iter().skip(2).take(2) {
            acks.acknowledge(vault.clone());
        }
        assert_eq!(acks.len(), 4);
        assert_eq!(decide_write(&acks, &set), WriteDecision::Committed);
    }

    #[test]
    fn test_write_without_vaults_never_commits() {
        assert_eq!(
            decide_write(&AckSet::new(), &vaults(0)),
            WriteDecision::Rejected
        );
    }
}
