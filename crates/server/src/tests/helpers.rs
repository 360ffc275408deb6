// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use reloc_persistence::Persistence;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::routes::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER, REQUEST_ID_HEADER};
use crate::{AppState, build_router};

pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, 3)
}

/// Sends one request as `actor_id` with `role` and returns the status and
/// decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(REQUEST_ID_HEADER, "http-test");
    if let Some((actor_id, role)) = caller {
        builder = builder
            .header(ACTOR_ID_HEADER, actor_id)
            .header(ACTOR_ROLE_HEADER, role);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub const ADMIN: Option<(&str, &str)> = Some(("admin-1", "admin"));
pub const LOGISTICS: Option<(&str, &str)> = Some(("logistics-1", "logistics"));
pub const HR: Option<(&str, &str)> = Some(("hr-1", "hr"));
pub const MEDICINE: Option<(&str, &str)> = Some(("medicine-1", "medicine"));

/// Creates two contracts and one active employee; returns the employee id
/// and the contract ids.
pub async fn seed_directory(app: &Router) -> (i64, i64, i64) {
    let (status, origin) = send(
        app,
        "POST",
        "/contracts",
        ADMIN,
        Some(json!({ "code": "C-100", "name": "North site" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, destination) = send(
        app,
        "POST",
        "/contracts",
        ADMIN,
        Some(json!({ "code": "C-200", "name": "South site" })),
    )
    .await;
    let origin_id: i64 = origin["contract_id"].as_i64().unwrap();
    let destination_id: i64 = destination["contract_id"].as_i64().unwrap();

    let (status, employee) = send(
        app,
        "POST",
        "/employees",
        ADMIN,
        Some(json!({
            "name": "Ana Souza",
            "registration": "R-0001",
            "activation": "ACTIVE",
            "active_contract_id": origin_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        employee["employee_id"].as_i64().unwrap(),
        origin_id,
        destination_id,
    )
}

/// Seeds the directory and opens a transfer; returns the record id.
pub async fn open_transfer(app: &Router, requires_approval: bool) -> i64 {
    let (employee_id, origin_id, destination_id) = seed_directory(app).await;
    let (status, opened) = send(
        app,
        "POST",
        "/requests",
        LOGISTICS,
        Some(json!({
            "request_type": "TRANSFER",
            "origin_contract_id": origin_id,
            "destination_contract_id": destination_id,
            "justification": "Site staffing",
            "requested_on": "2026-03-01",
            "requires_approval": requires_approval,
            "employee_ids": [employee_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    opened["record_ids"][0].as_i64().unwrap()
}
