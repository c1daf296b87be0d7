use time::OffsetDateTime;
use tracing::{info, warn};
use shared::models::*;
use shared::tally::Tally;
use shared::validation::{validate_new_candidate, validate_new_voter, validate_voter_update};
use crate::error::ApiError;
use crate::store::{ElectionData, ElectionStore, StoreError};
use crate::utils::{parse_timestamp, validate_interval};

/// Name length above which a weighted vote counts double.
const DOUBLE_WEIGHT_NAME_LEN: usize = 5;

pub struct ElectionProcessor;

impl ElectionProcessor {
    pub fn create_voter(store: &ElectionStore, request: NewVoter) -> Result<Voter, ApiError> {
        validate_new_voter(&request)?;

        let mut data = store.write()?;
        if data.voters.contains_key(&request.voter_id) {
            return Err(StoreError::VoterExists(request.voter_id).into());
        }

        let voter = Voter {
            voter_id: request.voter_id,
            name: request.name,
            age: request.age,
            has_voted: false,
        };
        data.voters.insert(voter.voter_id, voter.clone());
        info!("registered voter {}", voter.voter_id);
        Ok(voter)
    }

    pub fn voter(store: &ElectionStore, voter_id: u64) -> Result<Voter, ApiError> {
        let data = store.read()?;
        data.voters
            .get(&voter_id)
            .cloned()
            .ok_or_else(|| StoreError::VoterNotFound(voter_id).into())
    }

    pub fn list_voters(store: &ElectionStore) -> Result<VoterList, ApiError> {
        let data = store.read()?;
        Ok(VoterList {
            voters: data.voters.values().map(VoterSummary::from).collect(),
        })
    }

    pub fn update_voter(
        store: &ElectionStore,
        voter_id: u64,
        request: UpdateVoter,
    ) -> Result<Voter, ApiError> {
        validate_voter_update(&request)?;

        let mut data = store.write()?;
        let voter = data
            .voters
            .get_mut(&voter_id)
            .ok_or(StoreError::VoterNotFound(voter_id))?;
        if let Some(name) = request.name {
            voter.name = name;
        }
        if let Some(age) = request.age {
            voter.age = age;
        }
        Ok(voter.clone())
    }

    pub fn delete_voter(store: &ElectionStore, voter_id: u64) -> Result<Confirmation, ApiError> {
        let mut data = store.write()?;
        data.voters
            .remove(&voter_id)
            .ok_or(StoreError::VoterNotFound(voter_id))?;
        info!("deleted voter {}", voter_id);
        Ok(Confirmation::new(format!(
            "voter with id: {} deleted successfully",
            voter_id
        )))
    }

    pub fn register_candidate(
        store: &ElectionStore,
        request: NewCandidate,
    ) -> Result<Candidate, ApiError> {
        validate_new_candidate(&request)?;

        let mut data = store.write()?;
        if data.candidates.contains_key(&request.candidate_id) {
            return Err(StoreError::CandidateExists(request.candidate_id).into());
        }

        let candidate = Candidate {
            candidate_id: request.candidate_id,
            name: request.name,
            party: request.party,
        };
        data.candidates.insert(candidate.candidate_id, candidate.clone());
        info!("registered candidate {} ({})", candidate.candidate_id, candidate.party);
        Ok(candidate)
    }

    pub fn list_candidates(
        store: &ElectionStore,
        party: Option<&str>,
    ) -> Result<CandidateList, ApiError> {
        let data = store.read()?;
        let candidates = data
            .candidates
            .values()
            .filter(|c| party.map_or(true, |p| c.party == p))
            .cloned()
            .collect();
        Ok(CandidateList { candidates })
    }

    pub fn candidate_votes(
        store: &ElectionStore,
        candidate_id: u64,
    ) -> Result<CandidateVotes, ApiError> {
        let data = store.read()?;
        if !data.candidates.contains_key(&candidate_id) {
            return Err(StoreError::CandidateNotFound(candidate_id).into());
        }
        let votes = data
            .votes
            .iter()
            .filter(|v| v.candidate_id == candidate_id)
            .map(|v| u64::from(v.weight))
            .sum();
        Ok(CandidateVotes { candidate_id, votes })
    }

    /// Casting checks referential validity and the one-vote-per-voter rule
    /// under a single write lock, then appends to the log.
    pub fn cast_vote(
        store: &ElectionStore,
        request: CastVoteRequest,
        weighted: bool,
    ) -> Result<VoteRecord, ApiError> {
        let mut data = store.write()?;
        if !data.voters.contains_key(&request.voter_id) {
            return Err(StoreError::VoterNotFound(request.voter_id).into());
        }
        if !data.candidates.contains_key(&request.candidate_id) {
            return Err(StoreError::CandidateNotFound(request.candidate_id).into());
        }

        let weight = {
            let voter = data
                .voters
                .get_mut(&request.voter_id)
                .ok_or(StoreError::VoterNotFound(request.voter_id))?;
            if voter.has_voted {
                warn!("rejected duplicate vote from voter {}", voter.voter_id);
                return Err(StoreError::AlreadyVoted(voter.voter_id).into());
            }
            voter.has_voted = true;
            if weighted { Self::vote_weight(voter) } else { 1 }
        };

        let vote_id = data.allocate_vote_id();
        let record = VoteRecord {
            vote_id,
            voter_id: request.voter_id,
            candidate_id: request.candidate_id,
            weight,
            cast_at: OffsetDateTime::now_utc(),
        };
        data.votes.push(record.clone());
        info!(
            "vote {} cast for candidate {} (weight {})",
            record.vote_id, record.candidate_id, record.weight
        );
        Ok(record)
    }

    fn vote_weight(voter: &Voter) -> u32 {
        if voter.name.len() > DOUBLE_WEIGHT_NAME_LEN { 2 } else { 1 }
    }

    fn build_tally(data: &ElectionData) -> Result<Tally<u64>, ApiError> {
        let mut tally = Tally::new();
        for id in data.candidates.keys() {
            tally.register(*id)?;
        }
        for vote in &data.votes {
            tally.record(&vote.candidate_id, u64::from(vote.weight))?;
        }
        Ok(tally)
    }

    pub fn results(store: &ElectionStore) -> Result<Leaderboard, ApiError> {
        let data = store.read()?;
        let tally = Self::build_tally(&data)?;
        let results = tally
            .standings()
            .into_iter()
            .map(|(candidate_id, votes)| CandidateStanding {
                candidate_id,
                name: data
                    .candidates
                    .get(&candidate_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                votes,
            })
            .collect();
        Ok(Leaderboard { results })
    }

    pub fn winner(store: &ElectionStore) -> Result<WinnerResponse, ApiError> {
        let data = store.read()?;
        let tally = Self::build_tally(&data)?;
        let (candidate_id, votes) = tally.winner()?;
        let name = data
            .candidates
            .get(&candidate_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Ok(WinnerResponse {
            winner: CandidateStanding { candidate_id, name, votes },
        })
    }

    pub fn timeline(store: &ElectionStore, candidate_id: u64) -> Result<VoteTimeline, ApiError> {
        let data = store.read()?;
        if !data.candidates.contains_key(&candidate_id) {
            return Err(StoreError::CandidateNotFound(candidate_id).into());
        }
        let timeline = data
            .votes
            .iter()
            .filter(|v| v.candidate_id == candidate_id)
            .map(|v| TimelineEntry { vote_id: v.vote_id, timestamp: v.cast_at })
            .collect();
        Ok(VoteTimeline { candidate_id, timeline })
    }

    pub fn votes_in_range(
        store: &ElectionStore,
        candidate_id: u64,
        from_raw: &str,
        to_raw: &str,
    ) -> Result<RangeCount, ApiError> {
        let data = store.read()?;
        if !data.candidates.contains_key(&candidate_id) {
            return Err(StoreError::CandidateNotFound(candidate_id).into());
        }

        let from = parse_timestamp(from_raw)?;
        let to = parse_timestamp(to_raw)?;
        validate_interval(from, to)?;

        let votes_gained = data
            .votes
            .iter()
            .filter(|v| v.candidate_id == candidate_id && v.cast_at >= from && v.cast_at <= to)
            .count() as u64;
        Ok(RangeCount { candidate_id, from, to, votes_gained })
    }
}
