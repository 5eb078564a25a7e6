use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

async fn list_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let records = state.history.list_all(&user).await?;
    Ok(Json(records))
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/", get(list_all))
}
