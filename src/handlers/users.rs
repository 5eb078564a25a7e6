use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::services::users::{CreateUserInput, UpdateUserInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.users.create_user(&user, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state.users.get_user(&user, id).await?;
    Ok(Json(found))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
    Json(input): Json<UpdateUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.users.update_user(&user, id, input).await?;
    Ok(Json(updated))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.users.delete_user(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let users = state.users.list_users(&user).await?;
    Ok(Json(users))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}
