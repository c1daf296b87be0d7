use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;
use serde::{Serialize, Deserialize};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TallyError<T> {
    #[error("duplicate candidate: {0:?}")] DuplicateCandidate(T),
    #[error("unknown candidate: {0:?}")] UnknownCandidate(T),
    #[error("no candidates registered")] NoCandidates,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct CandidateMetrics {
    count: u64,
    order: u64,
}

/// Frequency count over a vote log. Candidates are registered up front so
/// zero-vote candidates appear in every read-out; recording against an
/// unregistered candidate is an error, which keeps the referential-validity
/// check close to the data.
#[derive(Debug, Clone)]
pub struct Tally<T: Clone + Eq + Hash> {
    entries: HashMap<T, CandidateMetrics>,
    next_order: u64,
}

impl<T: Clone + Eq + Hash> Tally<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), next_order: 0 }
    }

    pub fn register(&mut self, candidate: T) -> Result<(), TallyError<T>> {
        if self.entries.contains_key(&candidate) {
            return Err(TallyError::DuplicateCandidate(candidate));
        }
        let order = self.next_order;
        self.entries.insert(candidate, CandidateMetrics { count: 0, order });
        self.next_order += 1;
        Ok(())
    }

    pub fn record(&mut self, candidate: &T, weight: u64) -> Result<(), TallyError<T>> {
        self.entries.get_mut(candidate)
            .ok_or_else(|| TallyError::UnknownCandidate(candidate.clone()))?
            .count += weight;
        Ok(())
    }

    pub fn count(&self, candidate: &T) -> Option<u64> {
        self.entries.get(candidate).map(|m| m.count)
    }

    /// Per-candidate counts, zero-vote candidates included.
    pub fn counts(&self) -> HashMap<T, u64> {
        self.entries.iter().map(|(c, m)| (c.clone(), m.count)).collect()
    }

    /// Sum of all recorded weights.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|m| m.count).sum()
    }

    /// Candidates ordered by count descending; equal counts fall back to
    /// registration order, so the layout is stable across calls.
    pub fn standings(&self) -> Vec<(T, u64)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_unstable_by(|a, b| {
            b.1.count.cmp(&a.1.count)
                .then_with(|| a.1.order.cmp(&b.1.order))
        });
        sorted.into_iter().map(|(c, m)| (c.clone(), m.count)).collect()
    }

    /// The candidate with the maximum count. Ties break to the earliest
    /// registered of the tied candidates.
    pub fn winner(&self) -> Result<(T, u64), TallyError<T>> {
        self.standings().into_iter().next().ok_or(TallyError::NoCandidates)
    }
}

impl<T: Clone + Eq + Hash> Default for Tally<T> {
    fn default() -> Self {
        Self::new()
    }
}
