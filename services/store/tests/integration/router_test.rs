use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use uuid::Uuid;

use gamestore::infra::blob::HttpBlobStore;
use gamestore::infra::email::HttpEmailSender;
use gamestore::router::build_router;
use gamestore::state::AppState;
use gamestore::usecase::checkout::CustomerLocks;
use gamestore::usecase::token::issue_access_token;
use gamestore_domain::user::UserRole;

use crate::helpers::TEST_JWT_SECRET;

fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: TEST_JWT_SECRET.into(),
        public_url: "http://localhost:3100".into(),
        locks: CustomerLocks::new(),
        mailer: HttpEmailSender::new("http://localhost:9925/send", "store@example.com"),
        blobs: HttpBlobStore::new("http://localhost:9000", "http://localhost:9000"),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond_ok() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let server = test_server();
    let response = server.get("/shopping-cart").await;
    response.assert_status_unauthorized();

    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let server = test_server();
    let response = server
        .get("/orders")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn admin_route_with_user_token_is_403() {
    let server = test_server();
    let token = issue_access_token(Uuid::now_v7(), UserRole::User, TEST_JWT_SECRET).unwrap();
    let response = server
        .get("/admin/users")
        .authorization_bearer(&token)
        .await;
    response.assert_status_forbidden();

    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = test_server();
    let response = server.get("/no-such-route").await;
    response.assert_status_not_found();
}
