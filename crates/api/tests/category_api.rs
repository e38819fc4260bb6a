//! HTTP-level integration tests for the `/categories` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_empty, post_json, put_json, rule_codes};
use serde_json::json;
use sqlx::PgPool;

const URI: &str = "/api/v1/categories";

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_store_returns_201_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, URI, json!({"name": "test"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "test");
    assert_eq!(json["description"], serde_json::Value::Null);
    assert_eq!(json["is_active"], true);
    assert_eq!(json["deleted_at"], serde_json::Value::Null);
    assert!(json["created_at"].is_string());

    let id = json["id"].as_i64().unwrap();
    let response = get(common::build_test_app(pool), &format!("{URI}/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_store_with_all_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        URI,
        json!({"name": "test", "description": "description", "is_active": false}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["description"], "description");
    assert_eq!(json["is_active"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_store_validation_errors(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, URI, json!({})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(rule_codes(&json, "name"), vec!["required"]);
    assert!(json["errors"]["is_active"].is_null());

    let app = common::build_test_app(pool);
    let response = post_json(app, URI, json!({"name": "a".repeat(256), "is_active": "a"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(rule_codes(&json, "name"), vec!["max.string"]);
    assert_eq!(json["errors"]["name"][0]["params"]["max"], 255);
    assert_eq!(rule_codes(&json, "is_active"), vec!["boolean"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_absent_and_clears_empty(pool: PgPool) {
    let id = common::create(
        &pool,
        URI,
        json!({"name": "test", "description": "description", "is_active": false}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("{URI}/{id}"), json!({"name": "renamed"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "renamed");
    assert_eq!(json["description"], "description");
    assert_eq!(json["is_active"], false);

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("{URI}/{id}"),
        json!({"name": "renamed", "description": "", "is_active": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["description"], serde_json::Value::Null);
    assert_eq!(json["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_requires_name(pool: PgPool) {
    let id = common::create(&pool, URI, json!({"name": "test"})).await;
    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("{URI}/{id}"), json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(rule_codes(&body_json(response).await, "name"), vec!["required"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("{URI}/999999"), json!({"name": "x"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_id_with_invalid_body_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("{URI}/424242"), json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let id = common::create(&pool, URI, json!({"name": "gone"})).await;
    delete(common::build_test_app(pool.clone()), &format!("{URI}/{id}")).await;
    let app = common::build_test_app(pool);
    let response = patch_json(app, &format!("{URI}/{id}"), json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_destroy_then_with_trashed_then_restore(pool: PgPool) {
    let id = common::create(&pool, URI, json!({"name": "test"})).await;

    let response = delete(common::build_test_app(pool.clone()), &format!("{URI}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &format!("{URI}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool.clone()), &format!("{URI}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("{URI}/{id}?with_trashed=true"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["deleted_at"].is_string());

    let response = get(common::build_test_app(pool.clone()), URI).await;
    assert_eq!(body_json(response).await, json!([]));

    let response = get(common::build_test_app(pool.clone()), &format!("{URI}?with_trashed=true")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("{URI}/{id}/restore"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted_at"], serde_json::Value::Null);

    let response = get(common::build_test_app(pool), &format!("{URI}/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_index_orders_newest_first_and_paginates(pool: PgPool) {
    let first = common::create(&pool, URI, json!({"name": "first"})).await;
    let second = common::create(&pool, URI, json!({"name": "second"})).await;

    let response = get(common::build_test_app(pool.clone()), URI).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let response = get(common::build_test_app(pool), &format!("{URI}?limit=1&offset=1")).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], first);
}
