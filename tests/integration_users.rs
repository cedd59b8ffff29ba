mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use storefront::config::cors::CorsConfig;
use storefront::config::jwt::JwtConfig;
use storefront::config::security::SecurityConfig;
use storefront::config::server::ServerConfig;
use storefront::router::init_router;
use storefront::state::AppState;
use tower::ServiceExt;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        security_config: SecurityConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    };
    init_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
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

async fn login(app: &axum::Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["data"]["access_token"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let email = generate_unique_email();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "Test User",
                "username": "testuser",
                "email": email,
                "password": "securePassword123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["id"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let email = generate_unique_email();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "First User",
                "username": "first",
                "email": email,
                "password": "securePassword123"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same email, everything else different.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "Second User",
                "username": "second",
                "email": email,
                "password": "aCompletelyDifferentPassword",
                "is_admin": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_password(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "Test User",
                "username": "testuser",
                "email": generate_unique_email()
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": email, "password": "testpass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User logged in successfully");
    assert!(body["data"]["access_token"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "correctpass", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": email, "password": "wrongpassword" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_email = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": generate_unique_email(), "password": "correctpass" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = body_json(wrong_password).await;
    let unknown_email = body_json(unknown_email).await;

    // No disclosure of which part was wrong.
    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_resolves_registered_user(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let email = generate_unique_email();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "Profile User",
                "username": "profileuser",
                "email": email,
                "password": "securePassword123"
            }),
        ))
        .await
        .unwrap();
    let registered = body_json(response).await;
    let user_id = registered["data"]["id"].as_str().unwrap().to_string();

    let token = login(&app, &email, "securePassword123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users/profile")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["email"], email.as_str());
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_rejects_garbage_token(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users/profile")
                .header("authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_users_requires_admin(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &email, "testpass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_users_as_admin_excludes_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    create_test_user(&mut tx, &admin_email, "adminpass123", "admin").await;
    create_test_user(&mut tx, &generate_unique_email(), "userpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &admin_email, "adminpass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_id(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &email, "testpass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/users/{}", user.id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_requires_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    let admin = create_test_user(&mut tx, &admin_email, "adminpass123", "admin").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &admin_email, "adminpass123").await;

    let mut request = json_request(
        "PUT",
        &format!("/api/v1/users/{}", admin.id),
        json!({ "name": "Renamed" }),
    );
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {}", token).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_partial_fields(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    create_test_user(&mut tx, &admin_email, "adminpass123", "admin").await;
    let target_email = generate_unique_email();
    let target = create_test_user(&mut tx, &target_email, "userpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &admin_email, "adminpass123").await;

    let mut request = json_request(
        "PUT",
        &format!("/api/v1/users/{}", target.id),
        json!({ "name": "Renamed User", "password": "aBrandNewPassword" }),
    );
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {}", token).parse().unwrap(),
    );

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Renamed User");
    // Absent email is left untouched.
    assert_eq!(body["data"]["email"], target_email.as_str());

    // The password was rehashed: the new one logs in, the old one does not.
    login(&app, &target_email, "aBrandNewPassword").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": target_email, "password": "userpass123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_then_fetch_returns_404(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    create_test_user(&mut tx, &admin_email, "adminpass123", "admin").await;
    let target = create_test_user(&mut tx, &generate_unique_email(), "userpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &admin_email, "adminpass123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{}", target.id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User deleted successfully");
    assert!(body.get("data").is_none());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/users/{}", target.id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admin_delete_performs_no_mutation(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user_email = generate_unique_email();
    create_test_user(&mut tx, &user_email, "userpass123", "user").await;
    let target = create_test_user(&mut tx, &generate_unique_email(), "otherpass123", "user").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &user_email, "userpass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{}", target.id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let still_there =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(target.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(still_there);
}
