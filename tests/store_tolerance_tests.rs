// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store degradation tests.
//!
//! A corrupt or hand-mangled collection file must never surface as a 5xx:
//! every derived view degrades to its zero-state instead.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn get(app: &axum::Router, token: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(common::authed_request("GET", uri, token, None))
        .await
        .unwrap();
    let status = response.status();
    (status, common::response_json(response).await)
}

#[tokio::test]
async fn test_corrupt_collection_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = common::create_test_app_on_disk(dir.path());
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    // Mangle the workout collection behind the store's back
    let user_dir = dir.path().join("user-1");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("manual_workouts.json"), b"{definitely not json").unwrap();

    let (status, logs) = get(&app, &token, "/api/workout/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logs["logs"].as_array().unwrap().len(), 0);

    let (status, streak) = get(&app, &token, "/api/activity/streak").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(streak["current_streak"], 0);

    let (status, summary) = get(&app, &token, "/api/activity/summary?view=week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["daily"].as_array().unwrap().len(), 7);
    assert!(summary["daily"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["has_workout"] == false));
}

#[tokio::test]
async fn test_records_with_missing_fields_count_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = common::create_test_app_on_disk(dir.path());
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    // A minimal record written by an older client revision
    let user_dir = dir.path().join("user-1");
    std::fs::create_dir_all(&user_dir).unwrap();
    let sparse = json!([{
        "id": "legacy-1",
        "timestamp": chrono::Local::now().timestamp_millis(),
    }]);
    std::fs::write(
        user_dir.join("manual_workouts.json"),
        serde_json::to_vec(&sparse).unwrap(),
    )
    .unwrap();

    let (status, summary) = get(&app, &token, "/api/activity/summary?view=week").await;
    assert_eq!(status, StatusCode::OK);
    let today = summary["daily"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(today["has_workout"], true);
    assert_eq!(today["calories_out"], 0.0);
    assert_eq!(today["workout_minutes"], 0.0);

    let (status, streak) = get(&app, &token, "/api/activity/streak").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(streak["current_streak"], 1);
}

#[tokio::test]
async fn test_logging_recovers_a_corrupt_collection() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = common::create_test_app_on_disk(dir.path());
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let user_dir = dir.path().join("user-1");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("manual_meals.json"), b"[{\"truncated").unwrap();

    // The corrupt file reads as empty, so the new log becomes the collection
    let response = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/diet/log",
            &token,
            Some(json!({ "name": "Fresh start", "calories": 500.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, logs) = get(&app, &token, "/api/diet/logs").await;
    assert_eq!(status, StatusCode::OK);
    let logs = logs["logs"].as_array().unwrap().clone();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["name"], "Fresh start");
}

#[tokio::test]
async fn test_records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (app, state) = common::create_test_app_on_disk(dir.path());
        let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);
        let response = app
            .oneshot(common::authed_request(
                "POST",
                "/api/workout/log",
                &token,
                Some(json!({ "name": "Before restart", "duration_minutes": 30.0 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // A fresh app over the same directory sees the records
    let (app, state) = common::create_test_app_on_disk(dir.path());
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let (status, logs) = get(&app, &token, "/api/workout/logs").await;
    assert_eq!(status, StatusCode::OK);
    let logs = logs["logs"].as_array().unwrap().clone();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["name"], "Before restart");
}
