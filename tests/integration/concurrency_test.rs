//! Races on a single inspection: concurrent claims and concurrent reports.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use futures::future::join_all;

use helpers::{TestApp, id_of};

const CONTENDERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_assign_has_one_winner() {
    let app = Arc::new(TestApp::new());
    let customer = app.customer("c@x.com").await;
    let id = id_of(&app.create_inspection(&customer).await);

    let mut pilots = Vec::with_capacity(CONTENDERS);
    for n in 0..CONTENDERS {
        pilots.push(app.pilot(&format!("pilot{n}@x.com")).await);
    }

    let handles = pilots.into_iter().map(|token| {
        let app = Arc::clone(&app);
        let path = format!("/api/inspections/{id}/assign");
        tokio::spawn(async move { app.request("PATCH", &path, None, Some(&token)).await })
    });
    let responses: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners: Vec<_> = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .collect();
    let conflicts = responses
        .iter()
        .filter(|r| r.status == StatusCode::CONFLICT)
        .count();
    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, CONTENDERS - 1);

    let current = app
        .request("GET", &format!("/api/inspections/{id}"), None, Some(&customer))
        .await;
    assert_eq!(current.data()["status"], "scheduled");
    assert_eq!(current.data()["pilot_id"], winners[0].data()["pilot_id"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reports_create_one_row() {
    let app = Arc::new(TestApp::new());
    let customer = app.customer("c@x.com").await;
    let pilot = app.pilot("p@x.com").await;
    let id = app.scheduled_inspection(&customer, &pilot).await;

    let handles = (0..CONTENDERS).map(|n| {
        let app = Arc::clone(&app);
        let id = id.clone();
        let pilot = pilot.clone();
        tokio::spawn(async move {
            app.create_report(&id, &format!("Attempt {n}"), &pilot)
                .await
        })
    });
    let statuses: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().status)
        .collect();

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        CONTENDERS - 1
    );

    let reports = app
        .request("GET", "/api/reports/customer/all", None, Some(&customer))
        .await;
    assert_eq!(reports.data().as_array().unwrap().len(), 1);

    let inspection = app
        .request("GET", &format!("/api/inspections/{id}"), None, Some(&customer))
        .await;
    assert_eq!(inspection.data()["status"], "completed");
}
