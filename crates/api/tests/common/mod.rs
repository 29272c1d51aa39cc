#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use osmtm_api::auth::jwt::{generate_access_token, JwtConfig};
use osmtm_api::auth::password::hash_password;
use osmtm_api::config::ServerConfig;
use osmtm_api::router::build_app_router;
use osmtm_api::state::AppState;
use osmtm_db::models::user::{CreateUser, User};
use osmtm_db::repositories::UserRepo;
use osmtm_db::DbPool;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// `admin_user` is a bootstrap admin so registration tests can observe the
/// flag being granted.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:6543".to_string()],
        request_timeout_secs: 30,
        bootstrap_admins: vec!["admin_user".to_string()],
        jwt: JwtConfig {
            secret: "test-secret-key-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = osmtm_db::create_in_memory_pool()
        .await
        .expect("in-memory pool should open");
    osmtm_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user directly and return the row.
pub async fn create_user(pool: &DbPool, username: &str, admin: bool) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        admin,
        ..CreateUser::new(username, password_hash)
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint a bearer token for `user` with the test JWT secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.username, &test_config().jwt)
        .expect("token generation should succeed")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should be served")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body built from `fields`.
pub async fn post_form_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(form_body(fields)))
        .unwrap();
    send(app, request).await
}

/// POST with no body, authenticated.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("response should carry a Location header")
}

fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("form fields should encode")
}

/// Form fields of a valid job over a 100 m square at zoom 20 (nine tiles).
pub fn job_form<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", "NewJob"),
        ("description", "SomeDescription"),
        ("geometry", "POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))"),
        ("workflow", "SomeWorkflow"),
        ("imagery", ""),
        ("zoom", "20"),
    ]
}
