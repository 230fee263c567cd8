//! Pipeline endpoint tests

use crate::common::assertions::assert_error_code;
use crate::common::fixtures::{delete, get, post};
use crate::common::{NOW, TestState};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use pipeline_acl::server::create_app;
use serde_json::{Value, json};

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .map(|items| items.iter().filter_map(|p| p["name"].as_str()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_create_pipeline() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let body = json!({"name": "P2", "title": "Clickstream"});
    let resp = test::call_service(&app, post("/v1/pipelines", "bob", &body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let info: Value = test::read_body_json(resp).await;
    assert_eq!(info["creator"], "bob");
    assert_eq!(info["created"], NOW);

    let resp = test::call_service(&app, post("/v1/pipelines", "alice", &body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = test::read_body_json(resp).await;
    assert_error_code(&err, "CONFLICT");

    let resp = test::call_service(
        &app,
        post("/v1/pipelines", "carol", &json!({"name": "P3"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_new_pipeline_starts_with_owner_default() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;
    let body = json!({"name": "P2"});
    test::call_service(&app, post("/v1/pipelines", "bob", &body).to_request()).await;

    let perms: Value =
        test::call_and_read_body_json(&app, get("/v1/acl/P2/permissions", "bob").to_request()).await;
    assert_eq!(perms[0]["subjectId"], "bob");
    assert_eq!(perms[0]["lastModifiedOn"], NOW);
}

#[actix_web::test]
async fn test_list_is_filtered_by_read() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;
    test::call_service(
        &app,
        post("/v1/pipelines", "bob", &json!({"name": "P2"})).to_request(),
    )
    .await;

    let alice: Value = test::call_and_read_body_json(&app, get("/v1/pipelines", "alice").to_request()).await;
    assert_eq!(names(&alice), vec!["P1"]);

    let carol: Value = test::call_and_read_body_json(&app, get("/v1/pipelines", "carol").to_request()).await;
    assert!(names(&carol).is_empty());

    let root: Value = test::call_and_read_body_json(&app, get("/v1/pipelines", "root").to_request()).await;
    assert_eq!(names(&root), vec!["P1", "P2"]);

    // Share P1 with data-eng; bob is a member
    let mut acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
    acl["permissions"]
        .as_array_mut()
        .unwrap()
        .push(json!({"subjectId": "data-eng", "subjectType": "GROUP", "actions": ["READ"]}));
    test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;

    let bob: Value = test::call_and_read_body_json(&app, get("/v1/pipelines", "bob").to_request()).await;
    assert_eq!(names(&bob), vec!["P1", "P2"]);
}

#[actix_web::test]
async fn test_get_pipeline_requires_read() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let resp = test::call_service(&app, get("/v1/pipelines/P1", "alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let info: Value = test::read_body_json(resp).await;
    assert_eq!(info["title"], "Orders ETL");

    let resp = test::call_service(&app, get("/v1/pipelines/P1", "bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, get("/v1/pipelines/P1", "root").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_delete_pipeline() {
    let app = test::init_service(create_app(web::Data::new(TestState::seeded().await))).await;

    let acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "alice").to_request()).await;
    test::call_service(&app, post("/v1/acl/P1", "alice", &acl).to_request()).await;

    let resp = test::call_service(&app, delete("/v1/pipelines/P1", "bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, delete("/v1/pipelines/P1", "alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, get("/v1/pipelines/P1", "root").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Recreating the name starts from a clean owner default
    test::call_service(
        &app,
        post("/v1/pipelines", "bob", &json!({"name": "P1"})).to_request(),
    )
    .await;
    let acl: Value = test::call_and_read_body_json(&app, get("/v1/acl/P1", "bob").to_request()).await;
    assert_eq!(acl["resourceOwner"], "bob");
    assert_eq!(acl["permissions"][0]["subjectId"], "bob");
}
