//! ACL endpoint tests

use crate::common::assertions::{assert_error_code, subject_ids};
use crate::common::fixtures::{get, post};
use crate::common::{CREATED, NOW, TestState};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use pipeline_acl::server::create_app;
use serde_json::{Value, json};
use tempfile::TempDir;

#[actix_web::test]
async fn test_owner_sees_synthesized_acl() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;

    assert_eq!(acl["resourceId"], "P1");
    assert_eq!(acl["resourceOwner"], "alice");
    assert_eq!(acl["resourceType"], "PIPELINE");
    assert_eq!(acl["resourceCreatedTime"], CREATED);
    assert_eq!(acl["lastModifiedBy"], "alice");
    assert_eq!(acl["lastModifiedOn"], NOW);
    assert_eq!(
        acl["permissions"],
        json!([{
            "resourceId": "P1",
            "subjectId": "alice",
            "subjectType": "USER",
            "actions": ["READ", "WRITE", "EXECUTE"],
            "lastModifiedBy": "alice",
            "lastModifiedOn": CREATED,
        }])
    );
}

#[actix_web::test]
async fn test_non_owner_gets_null_without_stored_acl() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let resp = test::call_service(&app, get("/v1/acl/P1", "bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.is_null());
}

#[actix_web::test]
async fn test_unknown_pipeline_is_not_found() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let resp = test::call_service(&app, get("/v1/acl/nope", "alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_error_code(&body, "NOT_FOUND");

    let resp = test::call_service(&app, get("/v1/acl/nope/permissions", "carol").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_permissions_without_stored_acl() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let alice: Value =
        test::call_and_read_body_json(&app, get("/v1/acl/P1/permissions", "alice").to_request()).await;
    assert_eq!(subject_ids(&alice), vec!["alice"]);
    assert_eq!(alice[0]["actions"], json!(["READ", "WRITE", "EXECUTE"]));

    // Guests may ask for their own permissions
    for user in ["bob", "carol"] {
        let perms: Value =
            test::call_and_read_body_json(&app, get("/v1/acl/P1/permissions", user).to_request()).await;
        assert_eq!(perms, json!([]));
    }
}

#[actix_web::test]
async fn test_owner_shares_pipeline_with_group() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let mut acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
    acl["permissions"]
        .as_array_mut()
        .unwrap()
        .extend([
            json!({"subjectId": "ops", "subjectType": "GROUP", "actions": ["READ", "EXECUTE"]}),
            json!({"subjectId": "dave", "subjectType": "USER", "actions": ["READ"]}),
        ]);

    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let saved: Value = test::read_body_json(resp).await;
    assert_eq!(saved["lastModifiedBy"], "alice");
    assert_eq!(saved["permissions"][1]["resourceId"], "P1");
    assert_eq!(saved["permissions"][1]["lastModifiedBy"], "alice");

    // bob matches through the ops group only
    let bob: Value =
        test::call_and_read_body_json(&app, get("/v1/acl/P1/permissions", "bob").to_request()).await;
    assert_eq!(subject_ids(&bob), vec!["ops"]);

    // carol matches nothing
    let carol: Value =
        test::call_and_read_body_json(&app, get("/v1/acl/P1/permissions", "carol").to_request()).await;
    assert_eq!(carol, json!([]));

    // The stored ACL is now visible to other editors
    let seen: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "bob").to_request()).await;
    assert_eq!(seen, saved);
}

#[actix_web::test]
async fn test_save_without_write_is_forbidden() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let acl = json!({
        "resourceId": "P1",
        "resourceOwner": "bob",
        "permissions": [{"subjectId": "bob", "actions": ["READ", "WRITE", "EXECUTE"]}],
    });
    let resp = test::call_service(&app, post("/v1/acl/P1", "bob", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_error_code(&body, "AUTHORIZATION_ERROR");

    // Nothing was written: bob still sees no ACL
    let seen: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "bob").to_request()).await;
    assert!(seen.is_null());

    // Guests are stopped by the role guard
    let resp = test::call_service(&app, post("/v1/acl/P1", "carol", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_save_pins_owner() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let acl = json!({
        "resourceId": "P1",
        "resourceOwner": "root",
        "permissions": [{"subjectId": "ops", "subjectType": "GROUP", "actions": ["READ"]}],
    });
    let saved: Value =
        test::call_and_read_body_json(&app, post("/v1/acl/P1", "root", &acl).to_request()).await;
    assert_eq!(saved["resourceOwner"], "alice");
    assert_eq!(saved["resourceCreatedTime"], CREATED);
    assert_eq!(saved["lastModifiedBy"], "root");

    // The stored ACL is authoritative, so alice lost her implicit grant
    let alice: Value =
        test::call_and_read_body_json(&app, get("/v1/acl/P1/permissions", "alice").to_request()).await;
    assert_eq!(alice, json!([]));
}

#[actix_web::test]
async fn test_stale_save_conflicts() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Resubmitting the same read loses to the save that already landed,
    // even though the clock has not moved
    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let mut stale = acl.clone();
    stale["lastModifiedOn"] = json!(NOW - 60_000);
    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &stale).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_error_code(&body, "CONCURRENT_MODIFICATION");
}

#[actix_web::test]
async fn test_invalid_acl_payload() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let mut acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
    acl["resourceId"] = json!("P2");
    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_error_code(&body, "VALIDATION_ERROR");

    acl["resourceId"] = json!("P1");
    acl["permissions"][0]["actions"] = json!(["DELETE"]);
    let resp = test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_file_backed_acl_survives_restart() {
    let dir = TempDir::new().unwrap();

    let saved: Value = {
        let app = test::init_service(create_app(web::Data::new(
            TestState::file_backed(dir.path()).await,
        )))
        .await;
        let mut acl: Value =
            test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
        acl["permissions"]
            .as_array_mut()
            .unwrap()
            .push(json!({"subjectId": "bob", "actions": ["READ"]}));
        test::call_and_read_body_json(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await
    };

    let app = test::init_service(create_app(web::Data::new(
        TestState::file_backed(dir.path()).await,
    )))
    .await;
    let seen: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "bob").to_request()).await;
    assert_eq!(seen, saved);
}
