use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use thiserror::Error;
use shared::error::ErrorResponse;
use shared::tally::TallyError;
use shared::validation::ValidationError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no candidates registered")]
    NoCandidates,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Store(e) => match e {
                StoreError::VoterNotFound(_) | StoreError::CandidateNotFound(_) => Status::NotFound,
                StoreError::VoterExists(_)
                | StoreError::CandidateExists(_)
                | StoreError::AlreadyVoted(_) => Status::Conflict,
                StoreError::LockPoisoned => Status::InternalServerError,
            },
            ApiError::Validation(_) => Status::UnprocessableEntity,
            ApiError::NoCandidates => Status::NotFound,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

// Tally errors only reach the API layer when the tally was fed from an
// inconsistent snapshot; everything except the empty-election case is a bug.
impl From<TallyError<u64>> for ApiError {
    fn from(e: TallyError<u64>) -> Self {
        match e {
            TallyError::NoCandidates => ApiError::NoCandidates,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
