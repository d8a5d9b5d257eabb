//! HTTP API integration tests
//!
//! Spins up the full router against a throwaway SQLite file and drives
//! the auth, scan, and report endpoints end to end. OCR is configured
//! with no providers, so scans exercise the degraded no-text path.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use nutriscan_server::config::Config;
use nutriscan_server::db;
use nutriscan_server::routes;
use nutriscan_server::state::AppState;

// Magic bytes are enough for the intake sniffer.
const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

struct TestApp {
    server: TestServer,
    // Holds the database and upload directory for the test's lifetime
    _dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}/test.db", dir.path().display());
    config.uploads.dir = dir.path().join("uploads");
    config.ocr.providers = vec![];
    config.recommend.dataset_path = dir.path().join("no_dataset.csv");

    let pool = db::create_pool(&config.database.url).await.unwrap();
    let state = AppState::new(config, pool);
    state.images().init().await.unwrap();

    TestApp {
        server: TestServer::new(routes::router(state)).unwrap(),
        _dir: dir,
    }
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

async fn register_and_login(app: &TestApp, username: &str) -> String {
    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "hunter2",
            "confirm_password": "hunter2",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "identifier": username, "password": "hunter2" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn register_requires_all_fields() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "  ",
            "email": "a@example.com",
            "password": "pw",
            "confirm_password": "pw",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "All fields are required."
    );
}

#[tokio::test]
async fn register_rejects_password_mismatch() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "pw1",
            "confirm_password": "pw2",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Passwords do not match."
    );
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let app = spawn_app().await;
    register_and_login(&app, "ana").await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "ana",
            "email": "other@example.com",
            "password": "pw",
            "confirm_password": "pw",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], "Username already taken.");

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "ana2",
            "email": "ana@example.com",
            "password": "pw",
            "confirm_password": "pw",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        "Email already registered."
    );
}

#[tokio::test]
async fn login_accepts_email_identifier_and_rejects_bad_password() {
    let app = spawn_app().await;
    register_and_login(&app, "ben").await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "identifier": "ben@example.com", "password": "hunter2" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["user"]["username"], "ben");

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "identifier": "ben", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "identifier": "nobody", "password": "hunter2" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_reflects_session_and_logout_revokes_it() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "cara").await;

    let response = app.server.get("/api/v1/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = bearer(&token);
    let response = app
        .server
        .get("/api/v1/auth/me")
        .add_header(name.clone(), value.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["username"], "cara");
    // The password hash must never serialize into responses.
    assert!(body.get("password_hash").is_none());

    let response = app
        .server
        .post("/api/v1/auth/logout")
        .add_header(name.clone(), value.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get("/api/v1/auth/me")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scan_requires_authentication() {
    let app = spawn_app().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(PNG_HEADER.to_vec())
            .file_name("label.png")
            .mime_type("image/png"),
    );

    let response = app.server.post("/api/v1/scan").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scan_rejects_missing_image_field() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "dave").await;
    let (name, value) = bearer(&token);

    let form = MultipartForm::new().add_text("note", "no image here");

    let response = app
        .server
        .post("/api/v1/scan")
        .add_header(name, value)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "No image received. Please upload or capture an image."
    );
}

#[tokio::test]
async fn scan_rejects_disallowed_extension() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "erin").await;
    let (name, value) = bearer(&token);

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(PNG_HEADER.to_vec())
            .file_name("label.gif")
            .mime_type("image/gif"),
    );

    let response = app
        .server
        .post("/api/v1/scan")
        .add_header(name, value)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "upload_error");
}

#[tokio::test]
async fn scan_without_ocr_degrades_to_empty_report() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "finn").await;
    let (name, value) = bearer(&token);

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(PNG_HEADER.to_vec())
            .file_name("label.png")
            .mime_type("image/png"),
    );

    let response = app
        .server
        .post("/api/v1/scan")
        .add_header(name.clone(), value.clone())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["product_name"], "Unknown Product");
    assert_eq!(body["brand"], "Unknown Brand");
    assert_eq!(body["overall_label"], "Healthy");
    assert_eq!(body["extracted_text"], "");
    assert!(body["ocr_warning"].as_str().unwrap().contains("OCR failed"));
    assert_eq!(body["alternatives"].as_array().unwrap().len(), 0);

    // The stored photo is served back to its owner...
    let image_file = body["image_file"].as_str().unwrap();
    let response = app
        .server
        .get(&format!("/uploads/{}", image_file))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );

    // ...but not to anonymous callers.
    let response = app.server.get(&format!("/uploads/{}", image_file)).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_requires_login_and_serves_samples() {
    let app = spawn_app().await;

    let response = app.server.get("/api/v1/history").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let token = register_and_login(&app, "gail").await;
    let (name, value) = bearer(&token);

    let response = app
        .server
        .get("/api/v1/history")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["scans"][0]["product_name"], "Chocolate Bar");
    assert_eq!(body["scans"][1]["product_name"], "Granola Bar");
}

#[tokio::test]
async fn insights_differ_for_anonymous_and_logged_in() {
    let app = spawn_app().await;

    let response = app.server.get("/api/v1/insights").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let anon = response.json::<Value>();
    assert_eq!(anon["insights"].as_array().unwrap().len(), 3);
    assert_eq!(anon["insights"][0]["title"], "Stay Active");

    let token = register_and_login(&app, "hana").await;
    let (name, value) = bearer(&token);

    let response = app
        .server
        .get("/api/v1/insights")
        .add_header(name, value)
        .await;
    let authed = response.json::<Value>();
    assert_eq!(authed["insights"].as_array().unwrap().len(), 2);
    assert_eq!(authed["insights"][0]["title"], "Reduce Sugar Intake");
}

#[tokio::test]
async fn goals_are_served_to_everyone() {
    let app = spawn_app().await;

    let response = app.server.get("/api/v1/goals").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    let goals = body["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 3);
    assert_eq!(goals[0]["title"], "Increase Protein");
}
