//! Drives the router directly with `tower::ServiceExt::oneshot`; no listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, delete, get, logged_workout, post_json, put_json, send, test_pool,
    token_for,
};
use serde_json::json;

#[tokio::test]
async fn health_reports_database() {
    let app = build_test_app(test_pool().await);
    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app(test_pool().await);
    let response = get(&app, "/api/nothing-here", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_reads_are_empty_and_writes_are_401() {
    let app = build_test_app(test_pool().await);

    let response = get(&app, "/api/workouts?date=2025-12-16", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));

    let response = post_json(&app, "/api/workouts", None, json!({ "date": "2025-12-16" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(body["error"].is_string());

    let response = post_json(
        &app,
        "/api/workouts",
        Some("not-a-token"),
        json!({ "date": "2025-12-16" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/exercises", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn log_a_workout_and_read_it_back() {
    let app = build_test_app(test_pool().await);
    let token = token_for("user_alice");
    let (workout_id, entry_id) = logged_workout(&app, &token, "Squat", "2025-12-18").await;

    for (set_number, weight, reps) in [(2, 100.0, 8), (1, 60.0, 10), (3, 110.0, 6)] {
        let response = post_json(
            &app,
            &format!("/api/workout-exercises/{entry_id}/sets"),
            Some(&token),
            json!({ "set_number": set_number, "weight": weight, "reps": reps }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json(
        &app,
        &format!("/api/workouts/{workout_id}/complete"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["completed_at"].is_number());

    let response = get(&app, "/api/workouts?date=2025-12-18", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let workouts = json["data"].as_array().unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0]["id"], workout_id);
    assert_eq!(workouts[0]["exercises"][0]["exercise"]["name"], "Squat");
    let numbers: Vec<_> = workouts[0]["exercises"][0]["sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["set_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let response = get(&app, &format!("/api/workouts/{workout_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["date"], "2025-12-18");
}

#[tokio::test]
async fn other_users_rows_are_not_found() {
    let app = build_test_app(test_pool().await);
    let alice = token_for("user_alice");
    let bob = token_for("user_bob");
    let (workout_id, entry_id) = logged_workout(&app, &alice, "Bench Press", "2025-12-16").await;

    let created = post_json(
        &app,
        &format!("/api/workout-exercises/{entry_id}/sets"),
        Some(&alice),
        json!({ "set_number": 1, "weight": 60.0, "reps": 10 }),
    )
    .await;
    let set_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/sets/{set_id}"),
        Some(&bob),
        json!({ "weight": 1.0, "reps": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = delete(&app, &format!("/api/workouts/{workout_id}"), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, &format!("/api/workouts/{workout_id}"), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/workouts?date=2025-12-16", Some(&alice)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["exercises"][0]["sets"][0]["weight"], 60.0);
}

#[tokio::test]
async fn invalid_numbers_are_400() {
    let app = build_test_app(test_pool().await);
    let token = token_for("user_alice");
    let (_, entry_id) = logged_workout(&app, &token, "Deadlift", "2025-12-20").await;

    let response = post_json(
        &app,
        &format!("/api/workout-exercises/{entry_id}/sets"),
        Some(&token),
        json!({ "set_number": 1, "weight": -20.0, "reps": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = put_json(
        &app,
        "/api/sets/1",
        Some(&token),
        json!({ "weight": 20.0, "reps": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/api/workouts", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn exercise_endpoints() {
    let app = build_test_app(test_pool().await);
    let token = token_for("user_alice");

    let response = post_json(&app, "/api/exercises", Some(&token), json!({ "name": "Pull-up" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(&app, "/api/exercises", Some(&token), json!({ "name": "Pull-up" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json(
        &app,
        &format!("/api/exercises/{id}"),
        Some(&token),
        json!({ "name": "Chin-up" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Chin-up");

    let response = delete(&app, &format!("/api/exercises/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/exercises", None).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn deleting_a_workout_cascades() {
    let pool = test_pool().await;
    let app = build_test_app(pool.clone());
    let token = token_for("user_alice");
    let (workout_id, entry_id) = logged_workout(&app, &token, "Leg Press", "2025-12-22").await;
    post_json(
        &app,
        &format!("/api/workout-exercises/{entry_id}/sets"),
        Some(&token),
        json!({ "set_number": 1, "weight": 100.0, "reps": 12 }),
    )
    .await;

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/workouts/{workout_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let orphans: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM sets) + (SELECT COUNT(*) FROM workout_exercises)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn dashboard_reflects_updates() {
    let app = build_test_app(test_pool().await);
    let token = token_for("user_alice");
    let (workout_id, entry_id) = logged_workout(&app, &token, "Barbell Row", "2025-12-24").await;

    let before = body_json(get(&app, "/api/workouts?date=2025-12-24", Some(&token)).await).await;
    assert_eq!(before["data"][0]["exercises"][0]["sets"], json!([]));

    post_json(
        &app,
        &format!("/api/workout-exercises/{entry_id}/sets"),
        Some(&token),
        json!({ "set_number": 1, "weight": 50.0, "reps": 10 }),
    )
    .await;
    let after = body_json(get(&app, "/api/workouts?date=2025-12-24", Some(&token)).await).await;
    assert_eq!(after["data"][0]["exercises"][0]["sets"][0]["reps"], 10);

    let response = put_json(
        &app,
        &format!("/api/workouts/{workout_id}"),
        Some(&token),
        json!({ "date": "2025-12-25" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let moved = body_json(get(&app, "/api/workouts?date=2025-12-24", Some(&token)).await).await;
    assert_eq!(moved["data"], json!([]));
}
