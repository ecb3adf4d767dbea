//! Integration tests for the HTTP surface
//!
//! These tests drive the full router with stub solvers, so no API key or
//! network access is needed:
//! 1. Problem form (empty state, success, agent failure)
//! 2. Diagram search over a temporary directory
//! 3. Static diagram serving and health check

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use social_solver::agent::{AgentError, AgentProfile, Solver, TaskSpec};
use social_solver::build_router;
use social_solver::config::Config;
use social_solver::state::AppState;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

/// Returns a fixed answer and records the tasks it receives
struct FixedSolver {
    answer: String,
    seen: Mutex<Vec<TaskSpec>>,
}

#[async_trait]
impl Solver for FixedSolver {
    async fn solve(&self, _: &AgentProfile, task: &TaskSpec) -> Result<String, AgentError> {
        self.seen.lock().unwrap().push(task.clone());
        Ok(self.answer.clone())
    }
}

/// Always fails with the given message
struct FailingSolver(String);

#[async_trait]
impl Solver for FailingSolver {
    async fn solve(&self, _: &AgentProfile, _: &TaskSpec) -> Result<String, AgentError> {
        Err(AgentError::Other(self.0.clone()))
    }
}

/// Helper to build a router over a fresh temp diagram directory
fn create_test_app(solver: Arc<dyn Solver>) -> (Router, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.diagrams.dir = temp_dir.path().to_path_buf();
    let state = AppState::new(config, solver).expect("Default config should be valid");
    (build_router(Arc::new(state)), temp_dir)
}

fn fixed(answer: &str) -> Arc<FixedSolver> {
    Arc::new(FixedSolver {
        answer: answer.to_string(),
        seen: Mutex::new(Vec::new()),
    })
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn body_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, text) = body_string(app, request).await;
    (status, serde_json::from_str(&text).unwrap())
}

fn diagrams_of(value: &serde_json::Value) -> HashSet<String> {
    value["diagrams"]
        .as_array()
        .expect("diagrams should be an array")
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").expect("Failed to create test file");
    }
}

#[tokio::test]
async fn test_get_index_is_empty_state() {
    let (app, _dir) = create_test_app(fixed("unused"));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, html) = body_string(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("name=\"prompt\""));
    assert!(!html.contains("id=\"result\""));
    assert!(!html.contains("id=\"diagram\""));
}

#[tokio::test]
async fn test_post_index_renders_answer_and_diagram_path() {
    let solver = fixed("Step 1: ... Step 2: ...");
    let (app, _dir) = create_test_app(solver.clone());

    let (status, html) = body_string(app, form_post("/", "prompt=clean+water+access")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<pre>Step 1: ... Step 2: ...</pre>"));
    assert!(html.contains("diagrams/clean_water_access.png"));

    let seen = solver.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0]
        .description
        .contains("for this social issue: clean water access."));
}

#[tokio::test]
async fn test_post_index_agent_failure_still_succeeds() {
    let (app, _dir) = create_test_app(Arc::new(FailingSolver("timeout".to_string())));

    let (status, html) = body_string(app, form_post("/", "prompt=food+insecurity")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("An error occurred: timeout"));
    assert!(html.contains("diagrams/food_insecurity.png"));
}

#[tokio::test]
async fn test_solve_json_success() {
    let (app, _dir) = create_test_app(fixed("Step 1: ... Step 2: ..."));

    let (status, body) = body_json(app, form_post("/api/solve", "prompt=clean%20water%20access")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Step 1: ... Step 2: ...");
    assert_eq!(body["diagram_url"], "diagrams/clean_water_access.png");
    assert_eq!(body["failed"], false);
}

#[tokio::test]
async fn test_solve_json_failure_sets_flag() {
    let (app, _dir) = create_test_app(Arc::new(FailingSolver("timeout".to_string())));

    let (status, body) = body_json(app, form_post("/api/solve", "prompt=food+insecurity")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "An error occurred: timeout");
    assert_eq!(body["diagram_url"], "diagrams/food_insecurity.png");
    assert_eq!(body["failed"], true);
}

#[tokio::test]
async fn test_repeated_prompt_uses_first_value() {
    let solver = fixed("Step 1: ...");
    let (app, _dir) = create_test_app(solver.clone());

    let (status, html) = body_string(app, form_post("/", "prompt=a&prompt=b")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("diagrams/a.png"));
    let seen = solver.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].description.contains("social issue: a."));
}

#[tokio::test]
async fn test_solve_without_prompt_field_proceeds() {
    let solver = fixed("Please describe the problem.");
    let (app, _dir) = create_test_app(solver.clone());

    let (status, body) = body_json(app, form_post("/api/solve", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diagram_url"], "diagrams/.png");
    assert_eq!(solver.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_matches_png_names_case_insensitively() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(dir.path(), &["flood_plan.png", "water_grid.png", "notes.txt"]);

    let (status, body) = body_json(app, form_post("/search_diagrams", "search_term=water")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"diagrams": ["/static/diagrams/water_grid.png"]})
    );
}

#[tokio::test]
async fn test_search_repeated_term_uses_first_value() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(dir.path(), &["water.png", "x_ray.png"]);

    let (status, body) = body_json(
        app,
        form_post("/search_diagrams", "search_term=water&search_term=x"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"diagrams": ["/static/diagrams/water.png"]})
    );
}

#[tokio::test]
async fn test_search_uppercase_term() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(dir.path(), &["Water_Grid.png", "rainwater.png", "flood_plan.png"]);

    let (_, body) = body_json(app, form_post("/search_diagrams", "search_term=WATER")).await;

    let expected: HashSet<String> = [
        "/static/diagrams/Water_Grid.png",
        "/static/diagrams/rainwater.png",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(diagrams_of(&body), expected);
}

#[tokio::test]
async fn test_search_empty_term_returns_empty_list() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(dir.path(), &["water_grid.png"]);

    let (status, body) = body_json(app, form_post("/search_diagrams", "search_term=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"diagrams": []}));
}

#[tokio::test]
async fn test_search_missing_term_returns_empty_list() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(dir.path(), &["water_grid.png"]);

    let (status, body) = body_json(app, form_post("/search_diagrams", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"diagrams": []}));
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let (app, dir) = create_test_app(fixed("unused"));
    touch(
        dir.path(),
        &["flood_water.png", "water_grid.png", "waterfall.png", "map.png"],
    );

    let (_, first) = body_json(
        app.clone(),
        form_post("/search_diagrams", "search_term=water"),
    )
    .await;
    let (_, second) = body_json(app, form_post("/search_diagrams", "search_term=water")).await;

    assert_eq!(diagrams_of(&first).len(), 3);
    assert_eq!(diagrams_of(&first), diagrams_of(&second));
}

#[tokio::test]
async fn test_search_missing_directory_is_server_error() {
    let (app, dir) = create_test_app(fixed("unused"));
    let path = dir.path().to_path_buf();
    dir.close().expect("Failed to remove temp dir");
    assert!(!path.exists());

    let (status, body) = body_json(app, form_post("/search_diagrams", "search_term=water")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Diagram directory unavailable"));
}

#[tokio::test]
async fn test_static_diagram_is_served() {
    let (app, dir) = create_test_app(fixed("unused"));
    std::fs::write(dir.path().join("water_grid.png"), b"not really a png").unwrap();

    let request = Request::builder()
        .uri("/static/diagrams/water_grid.png")
        .body(Body::empty())
        .unwrap();
    let (status, body) = body_string(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "not really a png");
}

#[tokio::test]
async fn test_static_missing_diagram_is_not_found() {
    let (app, _dir) = create_test_app(fixed("unused"));

    let request = Request::builder()
        .uri("/static/diagrams/clean_water_access.png")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = create_test_app(fixed("unused"));
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = body_json(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_initialize_creates_diagram_directory() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let nested = temp_dir.path().join("static").join("diagrams");
    let mut config = Config::default();
    config.diagrams.dir = nested.clone();

    let state = AppState::initialize(config)
        .await
        .expect("Initialization should succeed without an API key");

    assert!(nested.is_dir());
    assert_eq!(state.profile.role, "Problem Solver");
}

#[tokio::test]
async fn test_missing_api_key_is_reported_in_page() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.diagrams.dir = temp_dir.path().to_path_buf();
    config.agent.api_key = None;

    let state = AppState::initialize(config).await.unwrap();
    let app = build_router(Arc::new(state));

    let (status, body) = body_json(app, form_post("/api/solve", "prompt=housing")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], true);
    assert!(body["result"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred: GEMINI_API_KEY"));
    assert_eq!(body["diagram_url"], "diagrams/housing.png");
}

#[tokio::test]
async fn test_unmountable_prefix_is_rejected_at_startup() {
    for prefix in ["/", "static/diagrams"] {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.diagrams.dir = temp_dir.path().to_path_buf();
        config.diagrams.public_prefix = prefix.to_string();

        let result = AppState::initialize(config).await;
        assert!(result.is_err(), "Prefix {:?} should be rejected", prefix);

        let mut config = Config::default();
        config.diagrams.public_prefix = prefix.to_string();
        assert!(AppState::new(config, fixed("unused")).is_err());
    }
}

#[tokio::test]
async fn test_custom_prefix_is_mounted() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("water_grid.png"), b"grid").unwrap();
    let mut config = Config::default();
    config.diagrams.dir = temp_dir.path().to_path_buf();
    config.diagrams.public_prefix = "/assets/diagrams/".to_string();
    let app = build_router(Arc::new(AppState::new(config, fixed("unused")).unwrap()));

    let (_, body) = body_json(
        app.clone(),
        form_post("/search_diagrams", "search_term=grid"),
    )
    .await;
    assert_eq!(
        body,
        serde_json::json!({"diagrams": ["/assets/diagrams/water_grid.png"]})
    );

    let request = Request::builder()
        .uri("/assets/diagrams/water_grid.png")
        .body(Body::empty())
        .unwrap();
    let (status, served) = body_string(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, "grid");
}
