use rocket::{Build, Rocket, State, get, post, put, delete, routes, catchers, http::Status, serde::json::Json};
use tracing::instrument;
use shared::models::*;
use crate::{
    catchers::{bad_request, conflict, internal_error, not_found, unprocessable},
    cors::CORS,
    error::ApiError,
    processor::ElectionProcessor,
    store::ElectionStore,
};

pub struct AppState {
    pub store: ElectionStore,
}

impl AppState {
    pub fn new() -> Self {
        Self { store: ElectionStore::new() }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[instrument(skip(state, request))]
#[post("/voters", format = "json", data = "<request>")]
pub async fn create_voter(
    state: &State<AppState>,
    request: Json<NewVoter>,
) -> Result<(Status, Json<Voter>), ApiError> {
    ElectionProcessor::create_voter(&state.store, request.into_inner())
        .map(|voter| (Status::Created, Json(voter)))
}

#[get("/voters")]
pub async fn list_voters(state: &State<AppState>) -> Result<Json<VoterList>, ApiError> {
    ElectionProcessor::list_voters(&state.store).map(Json)
}

#[get("/voters/<id>")]
pub async fn get_voter(state: &State<AppState>, id: u64) -> Result<Json<Voter>, ApiError> {
    ElectionProcessor::voter(&state.store, id).map(Json)
}

#[instrument(skip(state, request))]
#[put("/voters/<id>", format = "json", data = "<request>")]
pub async fn update_voter(
    state: &State<AppState>,
    id: u64,
    request: Json<UpdateVoter>,
) -> Result<Json<Voter>, ApiError> {
    ElectionProcessor::update_voter(&state.store, id, request.into_inner()).map(Json)
}

#[instrument(skip(state))]
#[delete("/voters/<id>")]
pub async fn delete_voter(
    state: &State<AppState>,
    id: u64,
) -> Result<Json<Confirmation>, ApiError> {
    ElectionProcessor::delete_voter(&state.store, id).map(Json)
}

#[instrument(skip(state, request))]
#[post("/candidates", format = "json", data = "<request>")]
pub async fn register_candidate(
    state: &State<AppState>,
    request: Json<NewCandidate>,
) -> Result<(Status, Json<Candidate>), ApiError> {
    ElectionProcessor::register_candidate(&state.store, request.into_inner())
        .map(|candidate| (Status::Created, Json(candidate)))
}

#[get("/candidates?<party>")]
pub async fn list_candidates(
    state: &State<AppState>,
    party: Option<&str>,
) -> Result<Json<CandidateList>, ApiError> {
    ElectionProcessor::list_candidates(&state.store, party).map(Json)
}

#[get("/candidates/<id>/votes")]
pub async fn get_candidate_votes(
    state: &State<AppState>,
    id: u64,
) -> Result<Json<CandidateVotes>, ApiError> {
    ElectionProcessor::candidate_votes(&state.store, id).map(Json)
}

#[instrument(skip(state, request))]
#[post("/votes", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: Json<CastVoteRequest>,
) -> Result<(Status, Json<VoteRecord>), ApiError> {
    ElectionProcessor::cast_vote(&state.store, request.into_inner(), false)
        .map(|record| (Status::Created, Json(record)))
}

#[instrument(skip(state, request))]
#[post("/votes/weighted", format = "json", data = "<request>")]
pub async fn cast_weighted_vote(
    state: &State<AppState>,
    request: Json<CastVoteRequest>,
) -> Result<(Status, Json<VoteRecord>), ApiError> {
    ElectionProcessor::cast_vote(&state.store, request.into_inner(), true)
        .map(|record| (Status::Created, Json(record)))
}

#[get("/votes/timeline?<candidate_id>")]
pub async fn get_vote_timeline(
    state: &State<AppState>,
    candidate_id: u64,
) -> Result<Json<VoteTimeline>, ApiError> {
    ElectionProcessor::timeline(&state.store, candidate_id).map(Json)
}

#[get("/votes/range?<candidate_id>&<from>&<to>")]
pub async fn get_range_votes(
    state: &State<AppState>,
    candidate_id: u64,
    from: &str,
    to: &str,
) -> Result<Json<RangeCount>, ApiError> {
    ElectionProcessor::votes_in_range(&state.store, candidate_id, from, to).map(Json)
}

#[get("/results")]
pub async fn get_results(state: &State<AppState>) -> Result<Json<Leaderboard>, ApiError> {
    ElectionProcessor::results(&state.store).map(Json)
}

#[get("/results/winner")]
pub async fn get_winner(state: &State<AppState>) -> Result<Json<WinnerResponse>, ApiError> {
    ElectionProcessor::winner(&state.store).map(Json)
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

/// Assembles the service with a fresh store. `main` swaps in its own
/// figment; tests mount it as-is.
pub fn service() -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .manage(AppState::new())
        .mount(
            "/api",
            routes![
                create_voter,
                list_voters,
                get_voter,
                update_voter,
                delete_voter,
                register_candidate,
                list_candidates,
                get_candidate_votes,
                cast_vote,
                cast_weighted_vote,
                get_vote_timeline,
                get_range_votes,
                get_results,
                get_winner,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                conflict,
                unprocessable,
                internal_error
            ],
        )
}
