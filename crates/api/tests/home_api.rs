//! Integration tests for the landing pages.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, job_form, post_form_auth};

#[tokio::test]
async fn anonymous_home_is_not_admin() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["admin"], false);
    assert!(json["data"]["username"].is_null());
    assert_eq!(json["data"]["jobs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn regular_user_home_is_not_admin() {
    let pool = common::test_pool().await;
    let user = common::create_user(&pool, "user1", false).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/", &common::token_for(&user)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["admin"], false);
    assert_eq!(json["data"]["username"], "user1");
}

#[tokio::test]
async fn admin_home_is_admin() {
    let pool = common::test_pool().await;
    let admin = common::create_user(&pool, "admin1", true).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/", &common::token_for(&admin)).await;

    assert_eq!(body_json(response).await["data"]["admin"], true);
}

#[tokio::test]
async fn home_lists_jobs_with_tile_counts() {
    let pool = common::test_pool().await;
    let admin = common::create_user(&pool, "admin1", true).await;
    let token = common::token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let response = post_form_auth(app, "/job/new", &job_form(), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/").await).await;
    let jobs = json["data"]["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "NewJob");
    assert_eq!(jobs[0]["tile_count"], 9);
}

#[tokio::test]
async fn about_is_public() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/about").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["title"].is_string());
}
