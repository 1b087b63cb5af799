use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{RegisterRequest, RegisterResponse, UpdateUserRequest},
    repo,
    repo_types::UserSummary,
};
use crate::{
    error::ApiError,
    extractors::{Path, Payload},
    response::ApiResponse,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let id = repo::insert(&state.db, &payload.name, &payload.email, &payload.password).await?;

    info!(user_id = id, email = %payload.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let users = repo::list(&state.db).await?;
    Ok(Json(ApiResponse::with_data(
        "Users retrieved successfully",
        users,
    )))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserSummary>>, ApiError> {
    let user = repo::get(&state.db, id).await?;
    Ok(Json(ApiResponse::with_data(
        "User retrieved successfully",
        user,
    )))
}

/// PUT /users/:id. No existence check: a missing id still reports success.
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Payload(payload): Payload<UpdateUserRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    repo::update(
        &state.db,
        id,
        &payload.name,
        &payload.email,
        &payload.password,
    )
    .await?;

    info!(user_id = id, "user updated");
    Ok(Json(ApiResponse::ok("User updated successfully")))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    repo::get(&state.db, id).await?;
    repo::delete(&state.db, id).await?;

    info!(user_id = id, "user deleted");
    Ok(Json(ApiResponse::ok("User deleted successfully")))
}
