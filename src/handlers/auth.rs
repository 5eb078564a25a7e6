use crate::auth::{issue_token, AuthUser};
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub role: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.users.authenticate(&req.username, &req.password).await?;
    let token = issue_token(
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
        user.id,
        &user.username,
        user.role,
    )?;
    Ok(Json(LoginResponse {
        token,
        user_id: user.id.to_string(),
        username: user.username,
        role: user.role.as_str().to_string(),
    }))
}

async fn me(user: AuthUser) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(serde_json::json!({
        "user_id": user.user_id,
        "username": user.username,
        "role": user.role.as_str(),
    })))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
}
