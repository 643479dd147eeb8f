use rochambeau_web::server::{routes, AppContext, ServerConfig, WebServer};
use rochambeau_web::{init_test_logging, SessionManager, StaticHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use warp::http::StatusCode;
use warp::hyper::{self, Body, Client as HyperClient, Request};

struct TestApp {
    _static_dir: TempDir,
    context: AppContext,
}

impl TestApp {
    fn new() -> Self {
        Self::with_sessions(SessionManager::new())
    }

    fn with_sessions(sessions: SessionManager) -> Self {
        let static_dir = TempDir::new().expect("tempdir");
        std::fs::write(
            static_dir.path().join("index.html"),
            "<pre id=\"result\">Choose your move!</pre>",
        )
        .expect("write index");
        std::fs::write(static_dir.path().join("app.js"), "// presenter").expect("write app.js");

        let config = ServerConfig::new("127.0.0.1", 0, static_dir.path());
        let context = AppContext::with_sessions(
            config,
            Arc::new(sessions),
            Arc::new(StaticHandler::new(static_dir.path())),
        );
        Self {
            _static_dir: static_dir,
            context,
        }
    }

    async fn send(&self, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = warp::test::request().method(method).path(path);
        if let Some(body) = body {
            request = request
                .header("content-type", "application/json")
                .body(body.to_string());
        }
        let response = request.reply(&routes(&self.context)).await;
        let status = response.status();
        let value = if response.body().is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(response.body()).expect("json body")
        };
        (status, value)
    }

    async fn create(&self, seed: u64) -> String {
        let (status, body) = self
            .send("POST", "/api/games", Some(json!({ "seed": seed })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["game_id"].as_str().expect("game id").to_string()
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn serves_page_and_script() {
    let app = TestApp::new();

    let page = warp::test::request()
        .path("/")
        .reply(&routes(&app.context))
        .await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(String::from_utf8_lossy(page.body()).contains("Choose your move!"));

    let script = warp::test::request()
        .path("/static/app.js")
        .reply(&routes(&app.context))
        .await;
    assert_eq!(script.status(), StatusCode::OK);

    let missing = warp::test::request()
        .path("/static/missing.css")
        .reply(&routes(&app.context))
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_game_starts_on_ready_screen() {
    let app = TestApp::new();
    let (status, body) = app.send("POST", "/api/games", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["game_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(
        body["screen"],
        json!({
            "state": "ready",
            "score": { "player": 0, "computer": 0 },
            "message": "Choose your move!"
        })
    );
}

#[tokio::test]
async fn rounds_update_score_and_message() {
    let app = TestApp::new();
    let id = app.create(7).await;

    let mut expected_player = 0;
    let mut expected_computer = 0;
    for (index, token) in ["rock", "PAPER", " scissors "].into_iter().enumerate() {
        let (status, body) = app
            .send(
                "POST",
                &format!("/api/games/{id}/rounds"),
                Some(json!({ "move": token })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let screen = &body["screen"];
        assert_eq!(screen["state"], "played");
        assert_eq!(screen["report"]["round"], index as u64 + 1);
        assert_eq!(screen["report"]["player_move"], token.trim().to_lowercase());

        match screen["report"]["outcome"].as_str() {
            Some("player_wins") => expected_player += 1,
            Some("computer_wins") => expected_computer += 1,
            Some("tie") => {}
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(screen["score"]["player"], expected_player);
        assert_eq!(screen["score"]["computer"], expected_computer);

        let message = screen["message"].as_str().expect("message");
        assert!(message.starts_with(&format!(
            "You chose: {}\nComputer chose: ",
            token.trim().to_uppercase()
        )));
    }

    let (status, body) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_id"], id.as_str());
    assert_eq!(body["screen"]["report"]["round"], 3);
}

#[tokio::test]
async fn same_seed_replays_same_computer_moves() {
    let app = TestApp::new();
    let first = app.create(2024).await;
    let second = app.create(2024).await;

    for _ in 0..5 {
        let (_, a) = app
            .send("POST", &format!("/api/games/{first}/rounds"), Some(json!({ "move": "rock" })))
            .await;
        let (_, b) = app
            .send("POST", &format!("/api/games/{second}/rounds"), Some(json!({ "move": "rock" })))
            .await;
        assert_eq!(a["screen"]["report"], b["screen"]["report"]);
    }
}

#[tokio::test]
async fn invalid_move_is_rejected_without_changing_the_game() {
    let app = TestApp::new();
    let id = app.create(11).await;
    let rounds = format!("/api/games/{id}/rounds");

    let (_, before) = app.send("POST", &rounds, Some(json!({ "move": "paper" }))).await;

    let (status, body) = app.send("POST", &rounds, Some(json!({ "move": "lizard" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_move");
    assert!(body["message"].as_str().expect("message").contains("lizard"));

    let (_, after) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(after["screen"], before["screen"]);
}

#[tokio::test]
async fn malformed_round_body_is_bad_request() {
    let app = TestApp::new();
    let id = app.create(1).await;

    let (status, body) = app
        .send("POST", &format!("/api/games/{id}/rounds"), Some(json!({ "choice": "rock" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn reset_returns_ready_screen() {
    let app = TestApp::new();
    let id = app.create(5).await;
    for _ in 0..4 {
        app.send("POST", &format!("/api/games/{id}/rounds"), Some(json!({ "move": "scissors" })))
            .await;
    }

    let (status, body) = app.send("POST", &format!("/api/games/{id}/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["screen"]["state"], "ready");
    assert_eq!(body["screen"]["score"], json!({ "player": 0, "computer": 0 }));

    let (_, body) = app
        .send("POST", &format!("/api/games/{id}/rounds"), Some(json!({ "move": "rock" })))
        .await;
    assert_eq!(body["screen"]["report"]["round"], 1);
}

#[tokio::test]
async fn deleted_and_unknown_games_are_not_found() {
    let app = TestApp::new();
    let id = app.create(3).await;

    let (status, body) = app.send("DELETE", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.send("GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "game_not_found");

    let (status, _) = app.send("DELETE", "/api/games/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn idle_game_expires_with_gone() {
    let app = TestApp::with_sessions(SessionManager::with_ttl(Duration::from_millis(20)));
    let id = app.create(9).await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    let (status, body) = app
        .send("POST", &format!("/api/games/{id}/rounds"), Some(json!({ "move": "rock" })))
        .await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"], "game_expired");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn round_and_request_events_are_logged() {
    let logs = init_test_logging();
    let app = TestApp::new();
    let id = app.create(42).await;

    app.send("POST", &format!("/api/games/{id}/rounds"), Some(json!({ "move": "rock" })))
        .await;

    let created = logs
        .matching("game created")
        .into_iter()
        .find(|entry| entry.field("game_id") == Some(id.as_str()))
        .expect("game created event");
    assert_eq!(created.field("seed"), Some("42"));

    let round = logs
        .matching("round played")
        .into_iter()
        .find(|entry| entry.field("game_id") == Some(id.as_str()))
        .expect("round played event");
    assert_eq!(round.field("player"), Some("rock"));
    assert_eq!(round.field("round"), Some("1"));

    assert!(logs
        .matching("request completed")
        .iter()
        .any(|entry| entry.field("path") == Some(format!("/api/games/{id}/rounds").as_str())));
}

#[tokio::test]
async fn live_server_plays_over_http() {
    let static_dir = TempDir::new().expect("tempdir");
    let server = WebServer::new(ServerConfig::new("127.0.0.1", 0, static_dir.path()))
        .expect("construct server");
    let handle = server.start().await.expect("start server");
    let address = handle.address();
    let client = HyperClient::new();

    let create = Request::builder()
        .method(hyper::Method::POST)
        .uri(format!("http://{address}/api/games"))
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "seed": 99 }).to_string()))
        .expect("build create request");
    let response = client.request(create).await.expect("create game");
    assert_eq!(response.status(), hyper::StatusCode::CREATED);
    let body = hyper::body::to_bytes(response.into_body())
        .await
        .expect("read create body");
    let created: Value = serde_json::from_slice(&body).expect("parse create json");
    let id = created["game_id"].as_str().expect("game id");

    let play = Request::builder()
        .method(hyper::Method::POST)
        .uri(format!("http://{address}/api/games/{id}/rounds"))
        .body(Body::from(json!({ "move": "scissors" }).to_string()))
        .expect("build round request");
    let response = client.request(play).await.expect("play round");
    assert_eq!(response.status(), hyper::StatusCode::OK);

    assert_eq!(handle.context().sessions().active_games(), vec![id.to_string()]);
    handle.shutdown().await.expect("shutdown");
}
