use crate::models::{NewCandidate, NewVoter, UpdateVoter};

pub const MIN_VOTER_AGE: u32 = 18;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_PARTY_LENGTH: usize = 50;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid age: {0}, must be {MIN_VOTER_AGE} or older")]
    UnderAge(u32),
    #[error("name must not be empty")]
    EmptyName,
    #[error("name exceeds maximum length of {MAX_NAME_LENGTH}")]
    NameTooLong,
    #[error("party must not be empty")]
    EmptyParty,
    #[error("party exceeds maximum length of {MAX_PARTY_LENGTH}")]
    PartyTooLong,
    #[error("invalid interval: from > to")]
    InvalidInterval,
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() { return Err(ValidationError::EmptyName); }
    if name.len() > MAX_NAME_LENGTH { return Err(ValidationError::NameTooLong); }
    Ok(())
}

fn validate_age(age: u32) -> Result<(), ValidationError> {
    if age < MIN_VOTER_AGE { return Err(ValidationError::UnderAge(age)); }
    Ok(())
}

pub fn validate_new_voter(request: &NewVoter) -> Result<(), ValidationError> {
    validate_name(&request.name)?;
    validate_age(request.age)
}

pub fn validate_voter_update(request: &UpdateVoter) -> Result<(), ValidationError> {
    if let Some(name) = &request.name {
        validate_name(name)?;
    }
    if let Some(age) = request.age {
        validate_age(age)?;
    }
    Ok(())
}

pub fn validate_new_candidate(request: &NewCandidate) -> Result<(), ValidationError> {
    validate_name(&request.name)?;
    if request.party.trim().is_empty() { return Err(ValidationError::EmptyParty); }
    if request.party.len() > MAX_PARTY_LENGTH { return Err(ValidationError::PartyTooLong); }
    Ok(())
}
