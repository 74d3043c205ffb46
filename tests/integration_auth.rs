mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "name": "New User",
                "email": email,
                "password": "password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User register successful");
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["password"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_forces_user_role(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    // A submitted role field is simply ignored
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "name": "Sneaky",
                "email": email,
                "password": "password123",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"]["role"], "user");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email_fails(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "password123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "name": "Copycat",
                "email": email,
                "password": "password456"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "email already exists");

    // No second row was created
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "name": "New User",
                "email": generate_unique_email(),
                "password": "short"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({
                "email": email,
                "password": "testpass123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User login successful");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["token"].as_str().map(|t| !t.is_empty()).unwrap_or(false));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "rightpassword", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({
                "email": email,
                "password": "wrongpassword"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Entered credentials invalid");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({
                "email": generate_unique_email(),
                "password": "whatever123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Entered credentials invalid");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_token_is_usable(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool);

    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({ "email": email, "password": "testpass123" }),
        ))
        .await
        .unwrap();
    let token = response_json(login).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(me.status(), StatusCode::OK);
    let body = response_json(me).await;
    assert_eq!(body["data"]["email"], email);
}
