#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};
    use crate::routes::service;

    fn client() -> Client {
        Client::tracked(service()).expect("valid rocket instance")
    }

    fn create_voter(client: &Client, id: u64, name: &str, age: u32) -> Status {
        client
            .post("/api/voters")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": id, "name": name, "age": age }).to_string())
            .dispatch()
            .status()
    }

    fn register_candidate(client: &Client, id: u64, name: &str, party: &str) -> Status {
        client
            .post("/api/candidates")
            .header(ContentType::JSON)
            .body(json!({ "candidate_id": id, "name": name, "party": party }).to_string())
            .dispatch()
            .status()
    }

    fn cast_vote(client: &Client, voter_id: u64, candidate_id: u64) -> Status {
        client
            .post("/api/votes")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": voter_id, "candidate_id": candidate_id }).to_string())
            .dispatch()
            .status()
    }

    fn get_json(client: &Client, uri: &str) -> Value {
        client.get(uri).dispatch().into_json().expect("json body")
    }

    #[test]
    fn test_voter_create_then_fetch_round_trip() {
        let client = client();
        assert_eq!(create_voter(&client, 1, "Ada", 30), Status::Created);

        let voter = get_json(&client, "/api/voters/1");
        assert_eq!(voter["voter_id"], 1);
        assert_eq!(voter["name"], "Ada");
        assert_eq!(voter["age"], 30);
        assert_eq!(voter["has_voted"], false);
    }

    #[test]
    fn test_duplicate_voter_conflicts() {
        let client = client();
        assert_eq!(create_voter(&client, 1, "Ada", 30), Status::Created);
        assert_eq!(create_voter(&client, 1, "Eve", 40), Status::Conflict);
    }

    #[test]
    fn test_underage_voter_rejected() {
        let client = client();
        assert_eq!(create_voter(&client, 1, "Kid", 17), Status::UnprocessableEntity);
        assert_eq!(client.get("/api/voters/1").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn test_missing_field_rejected() {
        let client = client();
        let status = client
            .post("/api/voters")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 1, "name": "Ada" }).to_string())
            .dispatch()
            .status();
        assert_eq!(status, Status::UnprocessableEntity);
    }

    #[test]
    fn test_voter_list_hides_voting_state() {
        let client = client();
        create_voter(&client, 2, "Bob", 40);
        create_voter(&client, 1, "Ada", 30);

        let body = get_json(&client, "/api/voters");
        let voters = body["voters"].as_array().expect("voters array");
        assert_eq!(voters.len(), 2);
        // ascending id order, no has_voted key
        assert_eq!(voters[0]["voter_id"], 1);
        assert_eq!(voters[1]["voter_id"], 2);
        assert!(voters[0].get("has_voted").is_none());
    }

    #[test]
    fn test_voter_update() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);

        let response = client
            .put("/api/voters/1")
            .header(ContentType::JSON)
            .body(json!({ "name": "Ada L.", "age": 31 }).to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let voter = get_json(&client, "/api/voters/1");
        assert_eq!(voter["name"], "Ada L.");
        assert_eq!(voter["age"], 31);
    }

    #[test]
    fn test_voter_update_rejects_underage() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);

        let status = client
            .put("/api/voters/1")
            .header(ContentType::JSON)
            .body(json!({ "age": 12 }).to_string())
            .dispatch()
            .status();
        assert_eq!(status, Status::UnprocessableEntity);

        let voter = get_json(&client, "/api/voters/1");
        assert_eq!(voter["age"], 30);
    }

    #[test]
    fn test_voter_delete() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);

        let response = client.delete("/api/voters/1").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(client.get("/api/voters/1").dispatch().status(), Status::NotFound);
        assert_eq!(client.delete("/api/voters/1").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn test_candidate_registration_and_party_filter() {
        let client = client();
        assert_eq!(register_candidate(&client, 1, "A", "Blue"), Status::Created);
        assert_eq!(register_candidate(&client, 2, "B", "Red"), Status::Created);
        assert_eq!(register_candidate(&client, 1, "C", "Blue"), Status::Conflict);

        let all = get_json(&client, "/api/candidates");
        assert_eq!(all["candidates"].as_array().unwrap().len(), 2);

        let blue = get_json(&client, "/api/candidates?party=Blue");
        let blue = blue["candidates"].as_array().unwrap();
        assert_eq!(blue.len(), 1);
        assert_eq!(blue[0]["candidate_id"], 1);

        let none = get_json(&client, "/api/candidates?party=Green");
        assert!(none["candidates"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_vote_requires_known_voter_and_candidate() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);
        register_candidate(&client, 1, "A", "Blue");

        assert_eq!(cast_vote(&client, 9, 1), Status::NotFound);
        assert_eq!(cast_vote(&client, 1, 9), Status::NotFound);

        // neither rejected cast shows up in the tally
        let results = get_json(&client, "/api/results");
        assert_eq!(results["results"][0]["votes"], 0);
    }

    #[test]
    fn test_duplicate_vote_rejected() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);
        register_candidate(&client, 1, "A", "Blue");
        register_candidate(&client, 2, "B", "Red");

        assert_eq!(cast_vote(&client, 1, 1), Status::Created);
        assert_eq!(cast_vote(&client, 1, 2), Status::Conflict);

        let results = get_json(&client, "/api/results");
        let rows = results["results"].as_array().unwrap();
        let total: u64 = rows.iter().map(|r| r["votes"].as_u64().unwrap()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_vote_ids_are_server_assigned() {
        let client = client();
        create_voter(&client, 1, "Ada", 30);
        create_voter(&client, 2, "Bob", 40);
        register_candidate(&client, 1, "A", "Blue");

        let first = client
            .post("/api/votes")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 1, "candidate_id": 1 }).to_string())
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(first["vote_id"], 101);
        assert_eq!(first["weight"], 1);

        let second = client
            .post("/api/votes")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 2, "candidate_id": 1 }).to_string())
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(second["vote_id"], 102);
    }

    #[test]
    fn test_results_and_winner_example() {
        // candidates {1: "A", 2: "B"}; votes (1,1), (2,1), (3,2)
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        register_candidate(&client, 2, "B", "Red");
        create_voter(&client, 1, "Ada", 30);
        create_voter(&client, 2, "Bob", 40);
        create_voter(&client, 3, "Cid", 50);

        cast_vote(&client, 1, 1);
        cast_vote(&client, 2, 1);
        cast_vote(&client, 3, 2);

        let results = get_json(&client, "/api/results");
        let rows = results["results"].as_array().unwrap();
        assert_eq!(rows[0]["candidate_id"], 1);
        assert_eq!(rows[0]["votes"], 2);
        assert_eq!(rows[1]["candidate_id"], 2);
        assert_eq!(rows[1]["votes"], 1);

        let winner = get_json(&client, "/api/results/winner");
        assert_eq!(winner["winner"]["candidate_id"], 1);
        assert_eq!(winner["winner"]["name"], "A");
        assert_eq!(winner["winner"]["votes"], 2);
    }

    #[test]
    fn test_results_include_zero_vote_candidates() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        register_candidate(&client, 2, "B", "Red");

        let results = get_json(&client, "/api/results");
        let rows = results["results"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["votes"] == 0));
    }

    #[test]
    fn test_winner_tie_breaks_to_lowest_id() {
        let client = client();
        register_candidate(&client, 2, "B", "Red");
        register_candidate(&client, 1, "A", "Blue");
        create_voter(&client, 1, "Ada", 30);
        create_voter(&client, 2, "Bob", 40);

        cast_vote(&client, 1, 2);
        cast_vote(&client, 2, 1);

        let winner = get_json(&client, "/api/results/winner");
        assert_eq!(winner["winner"]["candidate_id"], 1);
    }

    #[test]
    fn test_winner_without_candidates_is_not_found() {
        let client = client();
        assert_eq!(client.get("/api/results/winner").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn test_deleting_voter_keeps_past_votes() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        create_voter(&client, 1, "Ada", 30);
        cast_vote(&client, 1, 1);

        assert_eq!(client.delete("/api/voters/1").dispatch().status(), Status::Ok);

        let results = get_json(&client, "/api/results");
        assert_eq!(results["results"][0]["votes"], 1);
        let count = get_json(&client, "/api/candidates/1/votes");
        assert_eq!(count["votes"], 1);
    }

    #[test]
    fn test_weighted_vote_doubles_for_long_names() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        create_voter(&client, 1, "Benjamin", 30);
        create_voter(&client, 2, "Ada", 30);

        let weighted = client
            .post("/api/votes/weighted")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 1, "candidate_id": 1 }).to_string())
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(weighted["weight"], 2);

        let plain = client
            .post("/api/votes/weighted")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 2, "candidate_id": 1 }).to_string())
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(plain["weight"], 1);

        let count = get_json(&client, "/api/candidates/1/votes");
        assert_eq!(count["votes"], 3);
    }

    #[test]
    fn test_weighted_vote_still_single_use() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        create_voter(&client, 1, "Benjamin", 30);

        assert_eq!(cast_vote(&client, 1, 1), Status::Created);
        let status = client
            .post("/api/votes/weighted")
            .header(ContentType::JSON)
            .body(json!({ "voter_id": 1, "candidate_id": 1 }).to_string())
            .dispatch()
            .status();
        assert_eq!(status, Status::Conflict);
    }

    #[test]
    fn test_candidate_votes_requires_known_candidate() {
        let client = client();
        assert_eq!(client.get("/api/candidates/9/votes").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn test_timeline_in_cast_order() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        register_candidate(&client, 2, "B", "Red");
        create_voter(&client, 1, "Ada", 30);
        create_voter(&client, 2, "Bob", 40);
        create_voter(&client, 3, "Cid", 50);

        cast_vote(&client, 1, 1);
        cast_vote(&client, 2, 2);
        cast_vote(&client, 3, 1);

        let body = get_json(&client, "/api/votes/timeline?candidate_id=1");
        assert_eq!(body["candidate_id"], 1);
        let timeline = body["timeline"].as_array().unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0]["vote_id"], 101);
        assert_eq!(timeline[1]["vote_id"], 103);
        assert!(timeline[0]["timestamp"].is_string());

        let status = client
            .get("/api/votes/timeline?candidate_id=9")
            .dispatch()
            .status();
        assert_eq!(status, Status::NotFound);
    }

    #[test]
    fn test_range_query_counts_votes_in_interval() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");
        create_voter(&client, 1, "Ada", 30);
        cast_vote(&client, 1, 1);

        let body = get_json(
            &client,
            "/api/votes/range?candidate_id=1&from=2000-01-01T00:00:00Z&to=2100-01-01T00:00:00Z",
        );
        assert_eq!(body["candidate_id"], 1);
        assert_eq!(body["votes_gained"], 1);

        let past = get_json(
            &client,
            "/api/votes/range?candidate_id=1&from=2000-01-01T00:00:00Z&to=2001-01-01T00:00:00Z",
        );
        assert_eq!(past["votes_gained"], 0);
    }

    #[test]
    fn test_range_query_rejects_bad_intervals() {
        let client = client();
        register_candidate(&client, 1, "A", "Blue");

        let inverted = client
            .get("/api/votes/range?candidate_id=1&from=2100-01-01T00:00:00Z&to=2000-01-01T00:00:00Z")
            .dispatch();
        assert_eq!(inverted.status(), Status::UnprocessableEntity);

        let malformed = client
            .get("/api/votes/range?candidate_id=1&from=yesterday&to=2100-01-01T00:00:00Z")
            .dispatch();
        assert_eq!(malformed.status(), Status::UnprocessableEntity);

        let unknown = client
            .get("/api/votes/range?candidate_id=9&from=2000-01-01T00:00:00Z&to=2100-01-01T00:00:00Z")
            .dispatch();
        assert_eq!(unknown.status(), Status::NotFound);
    }

    #[test]
    fn test_error_body_shape() {
        let client = client();
        let response = client.get("/api/voters/1").dispatch();
        assert_eq!(response.status(), Status::NotFound);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error"], "voter with id: 1 was not found");
    }

    #[test]
    fn test_preflight_allowed() {
        let client = client();
        let response = client.options("/api/votes").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
    }
}
