//! Integration tests for the inspection lifecycle over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{TestApp, TestFile, id_of};

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("expected a list")
        .iter()
        .map(id_of)
        .collect()
}

#[tokio::test]
async fn test_customer_creates_pending_inspection() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;

    let inspection = app.create_inspection(&customer).await;
    assert_eq!(inspection["status"], "pending");
    assert_eq!(inspection["analysis_status"], "not_started");
    assert_eq!(inspection["location"], "Site 1");
    assert_eq!(inspection["package"], "Basic");
    assert!(inspection["pilot_id"].is_null());
}

#[tokio::test]
async fn test_pilot_cannot_create_inspection() {
    let app = TestApp::new();
    let pilot = app.pilot("p@x.com").await;

    let response = app
        .request(
            "POST",
            "/api/inspections",
            Some(json!({ "location": "Site 1", "scheduled_date": "2026-11-01T09:00:00Z" })),
            Some(&pilot),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_customers_only_see_their_own_inspections() {
    let app = TestApp::new();
    let alice = app.customer("alice@x.com").await;
    let bob = app.customer("bob@x.com").await;

    let first = id_of(&app.create_inspection(&alice).await);
    let second = id_of(&app.create_inspection(&alice).await);
    let bobs = id_of(&app.create_inspection(&bob).await);

    let list = app.request("GET", "/api/inspections", None, Some(&alice)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(ids(list.data()), vec![second, first]);

    let response = app
        .request("GET", &format!("/api/inspections/{bobs}"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &format!("/api/inspections/{bobs}/status"),
            Some(json!({ "status": "cancelled" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pilot_sees_open_pool_and_own_work() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;

    let mine = app.scheduled_inspection(&customer, &pilot).await;
    let theirs = app.scheduled_inspection(&customer, &other).await;
    let open = id_of(&app.create_inspection(&customer).await);

    let list = app.request("GET", "/api/inspections", None, Some(&pilot)).await;
    let visible = ids(list.data());
    assert!(visible.contains(&mine));
    assert!(visible.contains(&open));
    assert!(!visible.contains(&theirs));

    let pending = app
        .request("GET", "/api/inspections?status=pending", None, Some(&pilot))
        .await;
    assert_eq!(ids(pending.data()), vec![open.clone()]);

    let response = app
        .request("GET", &format!("/api/inspections/{theirs}"), None, Some(&pilot))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/api/inspections/{open}"), None, Some(&pilot))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_status_filter_rejected() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let response = app
        .request("GET", "/api/inspections?status=flying", None, Some(&customer))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;

    let missing = app
        .request(
            "GET",
            "/api/inspections/0192d3c4-0000-7000-8000-000000000000",
            None,
            Some(&customer),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/inspections/42", None, Some(&customer))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assignment_is_write_once() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;
    let id = id_of(&app.create_inspection(&customer).await);
    let path = format!("/api/inspections/{id}/assign");

    let by_customer = app.request("PATCH", &path, None, Some(&customer)).await;
    assert_eq!(by_customer.status, StatusCode::FORBIDDEN);

    let assigned = app.request("PATCH", &path, None, Some(&pilot)).await;
    assert_eq!(assigned.status, StatusCode::OK);
    assert_eq!(assigned.data()["status"], "scheduled");
    assert!(assigned.data()["assigned_at"].is_string());
    let pilot_id = assigned.data()["pilot_id"].clone();
    assert!(pilot_id.is_string());

    let second = app.request("PATCH", &path, None, Some(&other)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(
        second.body["message"]
            .as_str()
            .unwrap()
            .contains("scheduled")
    );

    let current = app
        .request("GET", &format!("/api/inspections/{id}"), None, Some(&customer))
        .await;
    assert_eq!(current.data()["pilot_id"], pilot_id);
}

#[tokio::test]
async fn test_customer_may_only_cancel() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let id = id_of(&app.create_inspection(&customer).await);
    let path = format!("/api/inspections/{id}/status");

    let completed = app
        .request("PATCH", &path, Some(json!({ "status": "completed" })), Some(&customer))
        .await;
    assert_eq!(completed.status, StatusCode::FORBIDDEN);

    let cancelled = app
        .request("PATCH", &path, Some(json!({ "status": "cancelled" })), Some(&customer))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.data()["status"], "cancelled");

    let again = app
        .request("PATCH", &path, Some(json!({ "status": "cancelled" })), Some(&customer))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_pilot_status_updates() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    let not_assigned = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status?new_status=completed"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(not_assigned.status, StatusCode::FORBIDDEN);

    let bogus = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status?new_status=bogus"),
            None,
            Some(&pilot),
        )
        .await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);

    let revert = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status?new_status=pending"),
            None,
            Some(&pilot),
        )
        .await;
    assert_eq!(revert.status, StatusCode::CONFLICT);

    let completed = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status?new_status=completed"),
            None,
            Some(&pilot),
        )
        .await;
    assert_eq!(completed.status, StatusCode::OK);
    assert_eq!(completed.data()["status"], "completed");
    assert!(completed.data()["completed_at"].is_string());

    let reopen = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status"),
            Some(json!({ "status": "cancelled" })),
            Some(&pilot),
        )
        .await;
    assert_eq!(reopen.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_status_update_requires_target() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let id = id_of(&app.create_inspection(&customer).await);

    let response = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status"),
            None,
            Some(&customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assigned_pilot_uploads_images() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;
    let path = format!("/api/inspections/{id}/upload");

    let files = [
        TestFile {
            name: "north.jpg",
            content_type: "image/jpeg",
            data: b"\xff\xd8\xff\xe0north",
        },
        TestFile {
            name: "south.jpg",
            content_type: "image/jpeg",
            data: b"\xff\xd8\xff\xe0south",
        },
    ];

    let response = app.upload(&path, &files, &pilot).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["file_count"], 2);
    assert_eq!(response.data()["analysis_status"], "processing");
    assert_eq!(
        response.data()["reference"],
        format!("inspections/{id}/raw")
    );

    let inspection = &response.data()["inspection"];
    assert_eq!(inspection["status"], "scheduled");
    assert!(inspection["started_at"].is_string());

    let batches = app.storage.accepted_batches().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].objects.len(), 2);
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;
    let path = format!("/api/inspections/{id}/upload");
    let file = [TestFile {
        name: "a.jpg",
        content_type: "image/jpeg",
        data: b"\xff\xd8",
    }];

    let stranger = app.upload(&path, &file, &other).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let by_customer = app.upload(&path, &file, &customer).await;
    assert_eq!(by_customer.status, StatusCode::FORBIDDEN);

    let empty = app.upload(&path, &[], &pilot).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    assert!(app.storage.accepted_batches().await.is_empty());
}
