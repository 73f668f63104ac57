//! Integration tests for report binding and customer analytics.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, id_of};

#[tokio::test]
async fn test_full_booking_flow() {
    let app = TestApp::new();
    let customer = app.customer("a@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let rival = app.pilot("r@x.com").await;

    let inspection = app.create_inspection(&customer).await;
    assert_eq!(inspection["status"], "pending");
    assert!(inspection["pilot_id"].is_null());
    let id = id_of(&inspection);

    let assigned = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/assign"),
            None,
            Some(&pilot),
        )
        .await;
    assert_eq!(assigned.data()["status"], "scheduled");
    let late = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/assign"),
            None,
            Some(&rival),
        )
        .await;
    assert_eq!(late.status, StatusCode::CONFLICT);

    let report = app.create_report(&id, "Roof survey", &pilot).await;
    assert_eq!(report.status, StatusCode::CREATED, "{:?}", report.body);
    assert_eq!(report.data()["inspection_id"], id.as_str());
    assert_eq!(report.data()["confidence"], 87);

    let after = app
        .request("GET", &format!("/api/inspections/{id}"), None, Some(&customer))
        .await;
    assert_eq!(after.data()["status"], "completed");
    assert!(after.data()["completed_at"].is_string());

    let repeat = app.create_report(&id, "Second attempt", &pilot).await;
    assert_eq!(repeat.status, StatusCode::CONFLICT);

    let reports = app
        .request("GET", "/api/reports/customer/all", None, Some(&customer))
        .await;
    assert_eq!(reports.status, StatusCode::OK);
    let reports = reports.data().as_array().unwrap().clone();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["title"], "Roof survey");

    let analytics = app
        .request("GET", "/api/reports/analytics/me", None, Some(&customer))
        .await;
    assert_eq!(analytics.status, StatusCode::OK);
    assert_eq!(analytics.data()["total_inspections"], 1);
    assert_eq!(analytics.data()["completed_inspections"], 1);
    assert_eq!(analytics.data()["cost_saved"], 500);
    assert!(analytics.data()["next_booking_date"].is_null());
}

#[tokio::test]
async fn test_report_requires_assigned_pilot() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;

    let open = id_of(&app.create_inspection(&customer).await);
    let response = app.create_report(&open, "Too early", &pilot).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let id = app.scheduled_inspection(&customer, &pilot).await;
    let response = app.create_report(&id, "Not mine", &other).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.create_report(&id, "By customer", &customer).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let inspection = app
        .request("GET", &format!("/api/inspections/{id}"), None, Some(&customer))
        .await;
    assert_eq!(inspection.data()["status"], "scheduled");

    let missing = app
        .create_report("0192d3c4-0000-7000-8000-000000000000", "Ghost", &pilot)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_on_cancelled_inspection_conflicts() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    let cancelled = app
        .request(
            "PATCH",
            &format!("/api/inspections/{id}/status"),
            Some(json!({ "status": "cancelled" })),
            Some(&customer),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);

    let response = app.create_report(&id, "Too late", &pilot).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_confidence_bounds() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({ "inspection_id": id, "title": "Roof", "confidence": 101 })),
            Some(&pilot),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_read_access_and_image_resolution() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let stranger = app.customer("s@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let other = app.pilot("o@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    let created = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "inspection_id": id,
                "title": "Facade",
                "image_url": "reports/annotated.png",
            })),
            Some(&pilot),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let path = format!("/api/reports/{id}");
    for token in [&customer, &pilot] {
        let report = app.request("GET", &path, None, Some(token)).await;
        assert_eq!(report.status, StatusCode::OK);
        assert_eq!(
            report.data()["image_reference"],
            "memory://reports/annotated.png?ttl=3600"
        );
    }
    for token in [&stranger, &other] {
        let report = app.request("GET", &path, None, Some(token)).await;
        assert_eq!(report.status, StatusCode::FORBIDDEN);
    }

    let open = id_of(&app.create_inspection(&customer).await);
    let none_yet = app
        .request("GET", &format!("/api/reports/{open}"), None, Some(&customer))
        .await;
    assert_eq!(none_yet.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_external_image_urls_pass_through() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    app.request(
        "POST",
        "/api/reports",
        Some(json!({
            "inspection_id": id,
            "title": "Facade",
            "image_reference": "https://cdn.example.com/annotated.png",
        })),
        Some(&pilot),
    )
    .await;

    let report = app
        .request("GET", &format!("/api/reports/{id}"), None, Some(&customer))
        .await;
    assert_eq!(
        report.data()["image_reference"],
        "https://cdn.example.com/annotated.png"
    );
}

#[tokio::test]
async fn test_analytics_counts_and_next_booking() {
    let app = TestApp::new();
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;

    let empty = app
        .request("GET", "/api/reports/analytics/me", None, Some(&customer))
        .await;
    assert_eq!(empty.data()["total_inspections"], 0);
    assert_eq!(empty.data()["cost_saved"], 0);

    let done = app.scheduled_inspection(&customer, &pilot).await;
    app.create_report(&done, "Roof", &pilot).await;
    let pending = app.create_inspection(&customer).await;

    let analytics = app
        .request("GET", "/api/reports/analytics/me", None, Some(&customer))
        .await;
    assert_eq!(analytics.data()["total_inspections"], 2);
    assert_eq!(analytics.data()["completed_inspections"], 1);
    assert_eq!(analytics.data()["cost_saved"], 500);
    assert_eq!(
        analytics.data()["next_booking_date"],
        pending["scheduled_date"]
    );

    let as_pilot = app
        .request("GET", "/api/reports/analytics/me", None, Some(&pilot))
        .await;
    assert_eq!(as_pilot.status, StatusCode::FORBIDDEN);

    let pilot_reports = app
        .request("GET", "/api/reports/customer/all", None, Some(&pilot))
        .await;
    assert_eq!(pilot_reports.status, StatusCode::FORBIDDEN);
}
