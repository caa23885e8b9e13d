// tests/progression.rs

//! End-to-end progression tests against a mock backend: resume position,
//! level advancement, completion, restart, and the failure policies.

use mathgrid_engine::{ApiClient, Coord, Game, GameError, Phase};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "test-user";

/// 1x5 level `2 + _ = 5` with pool `[3]`; solvable with unit `num-3-0`.
fn level(id: i64) -> Value {
    json!({
        "id": id,
        "rows": 1,
        "cols": 5,
        "fixedCells": { "0-0": 2, "0-1": "+", "0-3": "=", "0-4": 5 },
        "equations": [{
            "id": 1,
            "op1Pos": [0, 0],
            "op2Pos": [0, 2],
            "resPos": [0, 4],
            "operator": "+",
            "operatorPos": [0, 1],
            "equalsPos": [0, 3],
            "solution": { "op1": 2, "op2": 3, "result": 5 }
        }],
        "draggableNumbers": [3],
        "name": format!("Niveli {id}")
    })
}

async fn backend(levels: Value, last_completed: usize, post_status: u16) -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/levels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(levels))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/progress/{USER}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "last_completed_level": last_completed })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .respond_with(ResponseTemplate::new(post_status))
        .mount(&server)
        .await;
    server
}

async fn load_game(server: &MockServer) -> Game {
    Game::load(ApiClient::new(server.uri()), USER.to_string())
        .await
        .expect("load should succeed")
}

/// Waits for the detached save task to hit the backend with this body.
async fn wait_for_post(server: &MockServer, expected_body: Value) {
    for _ in 0..200 {
        let requests = server.received_requests().await.unwrap_or_default();
        let seen = requests.iter().any(|r| {
            r.method.to_string().eq_ignore_ascii_case("post")
                && r.url.path() == "/api/progress"
                && serde_json::from_slice::<Value>(&r.body).ok().as_ref() == Some(&expected_body)
        });
        if seen {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no progress POST with body {expected_body} arrived");
}

fn solve_active_level(game: &mut Game) {
    let solved = game.place(Coord(0, 2), "num-3-0").expect("placement");
    assert!(solved, "placing the only number should solve the level");
}

#[tokio::test]
async fn resumes_at_saved_level() {
    let server = backend(json!([level(1), level(2)]), 1, 200).await;
    let game = load_game(&server).await;
    assert_eq!(game.phase(), Phase::Playing { index: 1 });
    assert_eq!(game.current_level().unwrap().id, 2);
    assert!(game.board().is_some());
}

#[tokio::test]
async fn saved_progress_past_catalog_goes_straight_to_complete() {
    let server = backend(json!([level(1), level(2)]), 2, 200).await;
    let game = load_game(&server).await;
    assert_eq!(game.phase(), Phase::Complete);
    assert!(game.board().is_none());
}

#[tokio::test]
async fn completing_a_level_advances_and_persists() {
    let server = backend(json!([level(1), level(2)]), 0, 200).await;
    let mut game = load_game(&server).await;

    solve_active_level(&mut game);
    assert!(game.advance_level());
    assert_eq!(game.phase(), Phase::Playing { index: 1 });
    // The next board starts fresh: its blank is empty again.
    assert!(!game.board().unwrap().is_solved());

    wait_for_post(
        &server,
        json!({ "userId": USER, "lastCompletedLevel": 1 }),
    )
    .await;
}

#[tokio::test]
async fn finishing_the_last_level_completes_then_restart_resets() {
    let server = backend(json!([level(1)]), 0, 200).await;
    let mut game = load_game(&server).await;

    solve_active_level(&mut game);
    assert!(game.advance_level());
    assert_eq!(game.phase(), Phase::Complete);
    wait_for_post(
        &server,
        json!({ "userId": USER, "lastCompletedLevel": 1 }),
    )
    .await;

    assert!(game.restart());
    assert_eq!(game.phase(), Phase::Playing { index: 0 });
    assert!(!game.board().unwrap().is_solved());
    wait_for_post(
        &server,
        json!({ "userId": USER, "lastCompletedLevel": 0 }),
    )
    .await;
}

#[tokio::test]
async fn advance_is_refused_while_unsolved() {
    let server = backend(json!([level(1)]), 0, 200).await;
    let mut game = load_game(&server).await;
    assert!(!game.advance_level());
    assert_eq!(game.phase(), Phase::Playing { index: 0 });
}

#[tokio::test]
async fn failing_levels_fetch_fails_the_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/levels"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/progress/{USER}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "last_completed_level": 0 })),
        )
        .mount(&server)
        .await;

    let err = Game::load(ApiClient::new(server.uri()), USER.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::LoadFailure(_)));
}

#[tokio::test]
async fn failing_progress_fetch_fails_the_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/levels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([level(1)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/progress/{USER}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = Game::load(ApiClient::new(server.uri()), USER.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::LoadFailure(_)));
}

#[tokio::test]
async fn empty_catalog_hits_the_missing_level_guard() {
    let server = backend(json!([]), 0, 200).await;
    let mut game = load_game(&server).await;
    assert_eq!(game.phase(), Phase::MissingLevel { index: 0 });
    assert!(game.board().is_none());

    // Restart is the only way out; with no levels it stalls again but
    // still resets the saved progress.
    assert!(game.restart());
    assert_eq!(game.phase(), Phase::MissingLevel { index: 0 });
    wait_for_post(
        &server,
        json!({ "userId": USER, "lastCompletedLevel": 0 }),
    )
    .await;
}

#[tokio::test]
async fn malformed_catalog_entries_are_dropped() {
    let mut bad = level(1);
    bad["draggableNumbers"] = json!([3, 9]); // pool size != blank count
    let server = backend(json!([bad, level(2)]), 0, 200).await;

    let game = load_game(&server).await;
    assert_eq!(game.level_count(), 1);
    assert_eq!(game.current_level().unwrap().id, 2);
}

#[tokio::test]
async fn rejected_save_never_surfaces() {
    // Backend rejects every POST; completion and restart still proceed.
    let server = backend(json!([level(1)]), 0, 500).await;
    let mut game = load_game(&server).await;

    solve_active_level(&mut game);
    assert!(game.advance_level());
    assert_eq!(game.phase(), Phase::Complete);
    assert!(game.restart());
    assert_eq!(game.phase(), Phase::Playing { index: 0 });
}

#[tokio::test]
async fn intents_outside_an_active_level_are_rejected() {
    let server = backend(json!([level(1)]), 1, 200).await;
    let mut game = load_game(&server).await;
    assert_eq!(game.phase(), Phase::Complete);

    let err = game.place(Coord(0, 2), "num-3-0").unwrap_err();
    assert!(matches!(err, GameError::InvalidPlacement(_)));
    let err = game.remove(Coord(0, 2)).unwrap_err();
    assert!(matches!(err, GameError::InvalidRemoval(_)));
}
