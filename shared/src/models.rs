use serde::{Serialize, Deserialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voter {
    pub voter_id: u64,
    pub name: String,
    pub age: u32,
    pub has_voted: bool,
}

/// Listing shape for voters; the `has_voted` flag is only reported on
/// single-voter reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoterSummary {
    pub voter_id: u64,
    pub name: String,
    pub age: u32,
}

impl From<&Voter> for VoterSummary {
    fn from(voter: &Voter) -> Self {
        Self {
            voter_id: voter.voter_id,
            name: voter.name.clone(),
            age: voter.age,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub candidate_id: u64,
    pub name: String,
    pub party: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    pub vote_id: u64,
    pub voter_id: u64,
    pub candidate_id: u64,
    pub weight: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub cast_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVoter {
    pub voter_id: u64,
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateVoter {
    pub name: Option<String>,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCandidate {
    pub candidate_id: u64,
    pub name: String,
    pub party: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastVoteRequest {
    pub voter_id: u64,
    pub candidate_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoterList {
    pub voters: Vec<VoterSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateVotes {
    pub candidate_id: u64,
    pub votes: u64,
}

/// One row of the leaderboard returned by `/api/results`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateStanding {
    pub candidate_id: u64,
    pub name: String,
    pub votes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Leaderboard {
    pub results: Vec<CandidateStanding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinnerResponse {
    pub winner: CandidateStanding,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub vote_id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteTimeline {
    pub candidate_id: u64,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeCount {
    pub candidate_id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub to: OffsetDateTime,
    pub votes_gained: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
