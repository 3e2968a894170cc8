//! HTTP-level tests for the registry API.
//!
//! Drives the full router (auth, routing, handlers, store) through
//! `tower::ServiceExt::oneshot` without binding a socket.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use vaxtrack_server::config::ServerConfig;
use vaxtrack_server::state::AppState;
use vaxtrack_server::store::Store;

const TEST_TOKEN: &str = "integration-test-token-0123456789";

fn test_app() -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        api_token: SecretString::from(TEST_TOKEN),
    };
    vaxtrack_server::app(AppState::new(config, Store::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"));

    let request = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_person(app: &Router, identification: &str, account_id: i64) -> Value {
    let response = send(
        app,
        "POST",
        "/persons",
        Some(json!({
            "identification": identification,
            "accountId": account_id,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn create_record(app: &Router, person_id: &Value) -> Value {
    let response = send(
        app,
        "POST",
        "/vaccination-records",
        Some(json!({
            "vaccineType": "SPUTNIK",
            "vaccinationDate": "2021-01-01",
            "doses": 1,
            "personId": person_id,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn entity_routes_reject_missing_token() {
    let app = test_app();
    let request = Request::builder()
        .uri("/persons")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn entity_routes_reject_wrong_token() {
    let app = test_app();
    let request = Request::builder()
        .uri("/persons")
        .header(header::AUTHORIZATION, "Bearer wrong-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_person_starts_with_empty_record_set() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "identification": "1234567890",
            "accountId": 1,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let person = json_body(response).await;

    assert_eq!(person["identification"], "1234567890");
    assert_eq!(person["vaccinationIds"], json!([]));
    assert_eq!(
        location.unwrap(),
        format!("/persons/{}", person["id"])
    );
}

#[tokio::test]
async fn create_person_with_preset_id_is_rejected() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "id": 42,
            "identification": "1234567890",
            "accountId": 1,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_identification_conflicts() {
    let app = test_app();
    create_person(&app, "1234567890", 1).await;

    let response = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "identification": "1234567890",
            "accountId": 2,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_account_reference_conflicts() {
    let app = test_app();
    create_person(&app, "1234567890", 1).await;

    let response = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "identification": "0987654321",
            "accountId": 1,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_identification_is_rejected() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "identification": "123",
            "accountId": 1,
        })),
    )
    .await;

    // rejected at deserialization, before any store access
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn creating_a_record_attaches_it_to_its_owner() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    assert_eq!(record["personId"], person["id"]);
    assert_eq!(record["vaccineType"], "SPUTNIK");

    let response = send(
        &app,
        "GET",
        &format!("/persons/{}", person["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let person = json_body(response).await;
    assert_eq!(person["vaccinationIds"], json!([record["id"]]));
}

#[tokio::test]
async fn creating_a_record_for_an_unknown_person_is_rejected() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/vaccination-records",
        Some(json!({
            "vaccineType": "PFIZER",
            "vaccinationDate": "2021-01-01",
            "doses": 1,
            "personId": 99,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_doses_is_rejected() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;

    let response = send(
        &app,
        "POST",
        "/vaccination-records",
        Some(json!({
            "vaccineType": "PFIZER",
            "vaccinationDate": "2021-01-01",
            "doses": 0,
            "personId": person["id"],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_applies_only_explicitly_set_fields() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PATCH",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({
            "id": record["id"],
            "doses": 2,
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let merged = json_body(response).await;
    assert_eq!(merged["vaccineType"], "SPUTNIK");
    assert_eq!(merged["vaccinationDate"], "2021-01-01");
    assert_eq!(merged["doses"], 2);
    assert_eq!(merged["personId"], person["id"]);
}

#[tokio::test]
async fn patch_cannot_move_a_record_between_owners() {
    let app = test_app();
    let first = create_person(&app, "1234567890", 1).await;
    let second = create_person(&app, "0987654321", 2).await;
    let record = create_record(&app, &first["id"]).await;

    // personId is not a patchable field and is silently ignored
    let response = send(
        &app,
        "PATCH",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({
            "id": record["id"],
            "personId": second["id"],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let merged = json_body(response).await;
    assert_eq!(merged["personId"], first["id"]);
}

#[tokio::test]
async fn patch_with_empty_body_requires_an_id() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PATCH",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_with_only_an_id_changes_nothing() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PATCH",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({"id": record["id"]})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, record);
}

#[tokio::test]
async fn patch_unknown_record_is_not_found() {
    let app = test_app();

    let response = send(
        &app,
        "PATCH",
        "/vaccination-records/99",
        Some(json!({"id": 99, "doses": 2})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_with_mismatched_ids_mutates_nothing() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PUT",
        "/vaccination-records/5",
        Some(json!({
            "id": 7,
            "vaccineType": "PFIZER",
            "vaccinationDate": "2022-02-02",
            "doses": 9,
            "personId": person["id"],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "GET",
        &format!("/vaccination-records/{}", record["id"]),
        None,
    )
    .await;
    assert_eq!(json_body(response).await, record);
}

#[tokio::test]
async fn put_without_body_id_is_rejected() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({
            "vaccineType": "PFIZER",
            "vaccinationDate": "2022-02-02",
            "doses": 2,
            "personId": person["id"],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_unknown_record_is_a_bad_request() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;

    let response = send(
        &app,
        "PUT",
        "/vaccination-records/99",
        Some(json!({
            "id": 99,
            "vaccineType": "PFIZER",
            "vaccinationDate": "2022-02-02",
            "doses": 2,
            "personId": person["id"],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_every_field() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({
            "id": record["id"],
            "vaccineType": "ASTRAZENECA",
            "vaccinationDate": "2021-06-15",
            "doses": 2,
            "personId": person["id"],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["vaccineType"], "ASTRAZENECA");
    assert_eq!(updated["vaccinationDate"], "2021-06-15");
    assert_eq!(updated["doses"], 2);
}

#[tokio::test]
async fn put_can_move_a_record_between_owners() {
    let app = test_app();
    let first = create_person(&app, "1234567890", 1).await;
    let second = create_person(&app, "0987654321", 2).await;
    let record = create_record(&app, &first["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/vaccination-records/{}", record["id"]),
        Some(json!({
            "id": record["id"],
            "vaccineType": "SPUTNIK",
            "vaccinationDate": "2021-01-01",
            "doses": 1,
            "personId": second["id"],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let old_owner = json_body(
        send(&app, "GET", &format!("/persons/{}", first["id"]), None).await,
    )
    .await;
    let new_owner = json_body(
        send(&app, "GET", &format!("/persons/{}", second["id"]), None).await,
    )
    .await;
    assert_eq!(old_owner["vaccinationIds"], json!([]));
    assert_eq!(new_owner["vaccinationIds"], json!([record["id"]]));
}

#[tokio::test]
async fn person_put_can_replace_the_owned_record_set() {
    let app = test_app();
    let first = create_person(&app, "1234567890", 1).await;
    let second = create_person(&app, "0987654321", 2).await;
    let record = create_record(&app, &first["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/persons/{}", second["id"]),
        Some(json!({
            "id": second["id"],
            "identification": "0987654321",
            "accountId": 2,
            "vaccinationIds": [record["id"]],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["vaccinationIds"], json!([record["id"]]));

    let record_now = json_body(
        send(
            &app,
            "GET",
            &format!("/vaccination-records/{}", record["id"]),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(record_now["personId"], second["id"]);

    let first_now = json_body(
        send(&app, "GET", &format!("/persons/{}", first["id"]), None).await,
    )
    .await;
    assert_eq!(first_now["vaccinationIds"], json!([]));
}

#[tokio::test]
async fn person_put_refusing_to_orphan_records() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/persons/{}", person["id"]),
        Some(json!({
            "id": person["id"],
            "identification": "1234567890",
            "accountId": 1,
            "vaccinationIds": [],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn person_put_rejects_duplicate_record_ids() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "PUT",
        &format!("/persons/{}", person["id"]),
        Some(json!({
            "id": person["id"],
            "identification": "1234567890",
            "accountId": 1,
            "vaccinationIds": [record["id"], record["id"]],
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn person_patch_merges_only_set_fields() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;

    let response = send(
        &app,
        "PATCH",
        &format!("/persons/{}", person["id"]),
        Some(json!({
            "id": person["id"],
            "address": "42 Main St",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let merged = json_body(response).await;
    assert_eq!(merged["identification"], "1234567890");
    assert_eq!(merged["address"], "42 Main St");
    assert_eq!(merged["accountId"], 1);
}

#[tokio::test]
async fn deleting_a_person_is_blocked_while_they_own_records() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/persons/{}", person["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        "DELETE",
        &format!("/vaccination-records/{}", record["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        "DELETE",
        &format!("/persons/{}", person["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = test_app();
    let person = create_person(&app, "1234567890", 1).await;
    let record = create_record(&app, &person["id"]).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/vaccination-records/{}", record["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        "GET",
        &format!("/vaccination-records/{}", record["id"]),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_endpoints_return_everything_in_id_order() {
    let app = test_app();
    let first = create_person(&app, "1234567890", 1).await;
    let second = create_person(&app, "0987654321", 2).await;
    create_record(&app, &first["id"]).await;
    create_record(&app, &second["id"]).await;

    let persons = json_body(send(&app, "GET", "/persons", None).await).await;
    let records = json_body(send(&app, "GET", "/vaccination-records", None).await).await;

    let persons = persons.as_array().unwrap();
    assert_eq!(persons.len(), 2);
    assert!(persons[0]["id"].as_i64() < persons[1]["id"].as_i64());

    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app();
    let response = send(&app, "GET", "/persons", None).await;

    assert!(response.headers().contains_key("x-request-id"));
}
