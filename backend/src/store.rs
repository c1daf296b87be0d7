use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared::models::{Candidate, Voter, VoteRecord};

/// Server-assigned vote ids count up from here; the first accepted vote
/// gets id 101.
const VOTE_ID_SEED: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("voter with id: {0} was not found")]
    VoterNotFound(u64),
    #[error("candidate with id: {0} was not found")]
    CandidateNotFound(u64),
    #[error("voter with id: {0} already exists")]
    VoterExists(u64),
    #[error("candidate with id: {0} already exists")]
    CandidateExists(u64),
    #[error("voter with id: {0} has already voted")]
    AlreadyVoted(u64),
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// The election data set. Voters and candidates live in ordered maps so
/// listings come back in ascending id order; the vote log is append-only
/// and keeps cast order.
#[derive(Debug)]
pub struct ElectionData {
    pub voters: BTreeMap<u64, Voter>,
    pub candidates: BTreeMap<u64, Candidate>,
    pub votes: Vec<VoteRecord>,
    next_vote_id: u64,
}

impl ElectionData {
    fn new() -> Self {
        Self {
            voters: BTreeMap::new(),
            candidates: BTreeMap::new(),
            votes: Vec::new(),
            next_vote_id: VOTE_ID_SEED,
        }
    }

    pub fn allocate_vote_id(&mut self) -> u64 {
        self.next_vote_id += 1;
        self.next_vote_id
    }
}

/// Explicitly owned store handed to handlers through Rocket's managed
/// state. All mutation happens under the write lock, so concurrent
/// requests cannot lose updates.
#[derive(Debug)]
pub struct ElectionStore {
    inner: RwLock<ElectionData>,
}

impl ElectionStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(ElectionData::new()) }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, ElectionData>, StoreError> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, ElectionData>, StoreError> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for ElectionStore {
    fn default() -> Self {
        Self::new()
    }
}
