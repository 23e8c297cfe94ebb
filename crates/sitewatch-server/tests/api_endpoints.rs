//! End-to-end API tests against the full router with a real SQLite file.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Local;
use serde_json::Value;
use sitewatch_alerts::AlertPolicy;
use sitewatch_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use sitewatch_events::{insert_detection, NewDetection, TIMESTAMP_FORMAT};
use sitewatch_server::{app, AppState};
use sitewatch_types::PpeFlags;
use tempfile::TempDir;
use tower::ServiceExt;

/// Builds the router over a fresh migrated database.
///
/// The TempDir must stay alive for the duration of the test.
fn test_app() -> (Router, DbPool, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("sitewatch-test.db");

    let pool = create_pool(
        db_path.to_str().expect("temp path should be utf-8"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to create pool");

    {
        let conn = pool.get().expect("failed to get connection");
        run_migrations(&conn).expect("failed to run migrations");
    }

    let state = AppState {
        pool: pool.clone(),
        policy: AlertPolicy::default(),
    };

    (app(state), pool, dir)
}

/// Timestamps "now" in local time, so events land in today's buckets.
fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn full_kit() -> PpeFlags {
    PpeFlags {
        helmet: true,
        vest: true,
        gloves: true,
        goggles: true,
        boots: true,
        mask: true,
    }
}

fn seed_detection(pool: &DbPool, worker_id: i64, flags: PpeFlags) {
    let conn = pool.get().expect("failed to get connection");
    insert_detection(
        &conn,
        &NewDetection {
            worker_id,
            timestamp: now_timestamp(),
            flags,
            confidence: 0.92,
            camera_location: "Gate A".to_string(),
        },
    )
    .expect("failed to seed detection");
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn post_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _pool, _dir) = test_app();

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn dashboard_stats_reflect_todays_events() {
    let (app, pool, _dir) = test_app();

    seed_detection(&pool, 1, full_kit());
    seed_detection(
        &pool,
        2,
        PpeFlags {
            gloves: false,
            ..full_kit()
        },
    );

    let (status, json) = get_json(&app, "/api/dashboard_stats").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["total_workers"], 5);
    assert_eq!(json["today_detections"], 2);
    assert_eq!(json["overall_compliance"], 50.0);
    assert_eq!(json["avg_ppe_usage"]["helmet"], 100.0);
    assert_eq!(json["avg_ppe_usage"]["gloves"], 50.0);
    assert_eq!(json["active_alerts"], 0);
}

#[tokio::test]
async fn dashboard_stats_handle_an_empty_store() {
    let (app, _pool, _dir) = test_app();

    let (status, json) = get_json(&app, "/api/dashboard_stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["today_detections"], 0);
    assert_eq!(json["overall_compliance"], 0.0);
}

#[tokio::test]
async fn recent_detections_are_annotated_with_verdicts() {
    let (app, pool, _dir) = test_app();

    seed_detection(
        &pool,
        1,
        PpeFlags {
            gloves: false,
            ..full_kit()
        },
    );

    let (status, json) = get_json(&app, "/api/recent_detections").await;
    assert_eq!(status, StatusCode::OK);

    let detections = json.as_array().expect("array response");
    assert_eq!(detections.len(), 1);

    let d = &detections[0];
    assert_eq!(d["worker_name"], "John Smith");
    assert_eq!(d["department"], "Construction");
    assert_eq!(d["camera_location"], "Gate A");
    assert_eq!(d["helmet"], true);
    assert_eq!(d["gloves"], false);
    // Verdict fields are flattened alongside the event fields.
    assert_eq!(d["status"], "Non-Compliant");
    assert_eq!(d["compliance_score"], 76.7);
    assert_eq!(d["required_missing"], serde_json::json!(["gloves"]));
}

#[tokio::test]
async fn worker_compliance_lists_every_worker() {
    let (app, pool, _dir) = test_app();

    seed_detection(&pool, 3, full_kit());

    let (status, json) = get_json(&app, "/api/worker_compliance").await;
    assert_eq!(status, StatusCode::OK);

    let workers = json.as_array().expect("array response");
    assert_eq!(workers.len(), 5);

    let idle = workers
        .iter()
        .find(|w| w["id"] == 1)
        .expect("worker 1 present");
    assert_eq!(idle["total_detections"], 0);
    assert_eq!(idle["compliance_score"], 0.0);

    let active = workers
        .iter()
        .find(|w| w["id"] == 3)
        .expect("worker 3 present");
    assert_eq!(active["total_detections"], 1);
    assert_eq!(active["helmet_rate"], 100.0);
}

#[tokio::test]
async fn alert_lifecycle_via_the_api() {
    let (app, pool, _dir) = test_app();

    // A violating event raises an alert during ingestion.
    {
        let mut conn = pool.get().expect("failed to get connection");
        let tx = conn.transaction().expect("begin transaction");
        let event = NewDetection {
            worker_id: 2,
            timestamp: now_timestamp(),
            flags: PpeFlags {
                helmet: false,
                ..full_kit()
            },
            confidence: 0.87,
            camera_location: "Workshop".to_string(),
        };
        insert_detection(&tx, &event).expect("insert detection");
        sitewatch_alerts::evaluate(&tx, &AlertPolicy::default(), &event)
            .expect("evaluate")
            .expect("violation should alert");
        tx.commit().expect("commit");
    }

    let (status, json) = get_json(&app, "/api/alerts").await;
    assert_eq!(status, StatusCode::OK);
    let alerts = json.as_array().expect("array response");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["worker_name"], "Maria Garcia");
    assert_eq!(alerts[0]["severity"], "High");
    assert_eq!(alerts[0]["violation_type"], "No Helmet");
    let alert_id = alerts[0]["id"].as_i64().expect("alert id");

    // First resolve succeeds.
    let (status, json) = post_json(&app, &format!("/api/resolve_alert/{alert_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    // Second resolve is idempotent.
    let (status, json) = post_json(&app, &format!("/api/resolve_alert/{alert_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    // Unknown ID reports failure without an HTTP error.
    let (status, json) = post_json(&app, "/api/resolve_alert/99999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);

    // The resolved alert no longer appears in the active list.
    let (_, json) = get_json(&app, "/api/alerts").await;
    assert_eq!(json.as_array().expect("array response").len(), 0);
}

#[tokio::test]
async fn compliance_trends_return_seven_days_ending_today() {
    let (app, pool, _dir) = test_app();

    seed_detection(&pool, 1, full_kit());

    let (status, json) = get_json(&app, "/api/compliance_trends").await;
    assert_eq!(status, StatusCode::OK);

    let trends = json.as_array().expect("array response");
    assert_eq!(trends.len(), 7);

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(trends[6]["date"], today);
    assert_eq!(trends[6]["total_detections"], 1);
    assert_eq!(trends[6]["compliance_rate"], 100.0);

    // Empty days report zeros, not gaps.
    assert_eq!(trends[0]["total_detections"], 0);
    assert_eq!(trends[0]["compliance_rate"], 0.0);

    // Dates ascend.
    let dates: Vec<&str> = trends.iter().map(|t| t["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);
}
