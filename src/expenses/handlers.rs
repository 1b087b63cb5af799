use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{ExpenseRequest, UpdateExpenseRequest},
    repo,
    repo_types::{Expense, ExpenseFields, ExpenseSummary},
};
use crate::{
    db::StoreError,
    error::ApiError,
    extractors::{Path, Payload},
    response::ApiResponse,
    state::AppState,
};

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    Payload(payload): Payload<ExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    let fields = ExpenseFields::from(payload);
    let id = repo::insert(&state.db, &fields).await?;

    info!(expense_id = id, user_id = fields.user_id, "expense created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Expense created successfully")),
    ))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExpenseSummary>>>, ApiError> {
    let items = repo::list(&state.db).await?;
    Ok(Json(ApiResponse::with_data(
        "Expenses retrieved successfully",
        items,
    )))
}

#[instrument(skip(state))]
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let expense = repo::get(&state.db, id).await?;
    Ok(Json(ApiResponse::with_data(
        "Expense retrieved successfully",
        expense,
    )))
}

/// PUT /expenses/:id. Store failures map to 400 (constraint) or 500
/// (operational, other database errors).
#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Payload(payload): Payload<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let fields = ExpenseFields::from(payload.0);
    repo::update(&state.db, id, &fields).await?;

    info!(expense_id = id, "expense updated");
    Ok(Json(ApiResponse::ok("Expense updated successfully")))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !repo::exists(&state.db, id).await? {
        return Err(StoreError::not_found("Expense").into());
    }
    repo::delete(&state.db, id).await?;

    info!(expense_id = id, "expense deleted");
    Ok(Json(ApiResponse::ok("Expense deleted successfully")))
}
