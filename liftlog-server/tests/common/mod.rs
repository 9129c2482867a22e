#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use liftlog::auth::TokenIdentity;
use liftlog::db::models::UserId;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

use liftlog_server::config::ServerConfig;
use liftlog_server::router::build_app_router;
use liftlog_server::state::AppState;

const SECRET: &[u8] = b"liftlog-test-secret";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        auth_secret: String::from_utf8_lossy(SECRET).into_owned(),
        request_timeout_secs: 30,
        cors_origins: vec!["http://localhost:5173".to_string()],
        log_level: "info".to_string(),
    }
}

pub async fn test_pool() -> SqlitePool {
    liftlog::db::memory_pool().await.unwrap()
}

/// Router with the production middleware stack. Clone it per request; every clone
/// shares one state, so the dashboard cache behaves as in a running server.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let state = AppState::new(pool, test_config(), Arc::new(TokenIdentity::new(SECRET)));
    build_app_router(state).unwrap()
}

pub fn token_for(user: &str) -> String {
    TokenIdentity::new(SECRET)
        .issue(&UserId::new(user), 3600)
        .unwrap()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an exercise, a workout on `date` and one entry; returns (workout id, entry id).
pub async fn logged_workout(app: &Router, token: &str, exercise: &str, date: &str) -> (i64, i64) {
    let created = post_json(app, "/api/exercises", Some(token), serde_json::json!({ "name": exercise })).await;
    let exercise_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let created = post_json(app, "/api/workouts", Some(token), serde_json::json!({ "date": date })).await;
    let workout_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let created = post_json(
        app,
        &format!("/api/workouts/{workout_id}/exercises"),
        Some(token),
        serde_json::json!({ "exercise_id": exercise_id, "order": 1 }),
    )
    .await;
    let entry_id = body_json(created).await["data"]["id"].as_i64().unwrap();
    (workout_id, entry_id)
}
