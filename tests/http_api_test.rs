mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::TestApp;
use serde_json::{json, Value};
use stockroom_api::{auth::issue_token, entities::user::Role, handlers};
use tower::ServiceExt;

fn router(app: &TestApp) -> Router {
    handlers::api_router().with_state(app.state.clone())
}

async fn token_for(app: &TestApp, username: &str, role: Role) -> String {
    let user = app.seed_user(username, role).await;
    issue_token(
        &app.state.config.jwt_secret,
        app.state.config.jwt_expiration_secs,
        user.user_id,
        username,
        role,
    )
    .unwrap()
}

fn authed(method: Method, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_needs_no_auth() {
    let app = TestApp::new().await;
    let response = router(&app)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_yields_401() {
    let app = TestApp::new().await;
    let response = router(&app)
        .oneshot(Request::get("/api/v1/items").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn item_crud_over_http() {
    let app = TestApp::new().await;
    let token = token_for(&app, "tech", Role::Technician).await;

    let create = authed(
        Method::POST,
        "/api/v1/items",
        &token,
        Some(json!({
            "manufacturer": "HP",
            "model": "LaserJet",
            "part_or_unit": "Part",
            "part_number": "C4127X",
            "location": "A1",
            "quantity": 5,
            "min_quantity": 1,
            "unit_price": "100.00"
        })),
    );
    let response = router(&app).oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = json_body(response).await;
    let id = item["id"].as_str().unwrap().to_string();

    let response = router(&app)
        .oneshot(authed(
            Method::PUT,
            &format!("/api/v1/items/{id}"),
            &token,
            Some(json!({ "quantity": 4 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["quantity"], 4);

    let response = router(&app)
        .oneshot(authed(
            Method::GET,
            &format!("/api/v1/items/{id}/history"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = json_body(response).await;
    assert_eq!(history.as_array().unwrap().len(), 2);

    let response = router(&app)
        .oneshot(authed(
            Method::DELETE,
            &format!("/api/v1/items/{id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn forbidden_mutation_maps_to_403_with_error_payload() {
    let app = TestApp::new().await;
    let token = token_for(&app, "viewer", Role::Viewer).await;

    let response = router(&app)
        .oneshot(authed(
            Method::POST,
            "/api/v1/items",
            &token,
            Some(json!({ "unit_price": "1.00" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Forbidden");
    assert!(body["message"].as_str().unwrap().contains("Viewer"));
}

#[tokio::test]
async fn login_returns_a_usable_token() {
    let app = TestApp::new().await;
    let admin_token = token_for(&app, "admin", Role::Superuser).await;

    // Create an account through the API, then log in as it.
    let response = router(&app)
        .oneshot(authed(
            Method::POST,
            "/api/v1/users",
            &admin_token,
            Some(json!({
                "username": "jsmith",
                "password": "longenoughpw",
                "email": "jsmith@example.com",
                "role": "Technician"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router(&app)
        .oneshot(
            Request::post("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "jsmith", "password": "longenoughpw" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["role"], "Technician");
    let token = body["token"].as_str().unwrap().to_string();

    let response = router(&app)
        .oneshot(authed(Method::GET, "/api/v1/auth/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["username"], "jsmith");
}

#[tokio::test]
async fn bad_credentials_yield_401() {
    let app = TestApp::new().await;
    let response = router(&app)
        .oneshot(
            Request::post("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "ghost", "password": "whatever" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
