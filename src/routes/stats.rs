use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::stats::{Balance, CustomerCount},
    error::AppResult,
    middleware::auth::AuthSession,
    response::ApiResponse,
    services::stats_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/count", axum::routing::get(customer_count))
        .route("/balance", axum::routing::get(global_balance))
        .route("/balance/{customer_id}", axum::routing::get(customer_balance))
}

#[utoipa::path(
    get,
    path = "/api/stats/count",
    responses(
        (status = 200, description = "Number of customers", body = ApiResponse<CustomerCount>),
    ),
    tag = "Stats"
)]
pub async fn customer_count(
    State(state): State<AppState>,
    _session: AuthSession,
) -> AppResult<Json<ApiResponse<CustomerCount>>> {
    let resp = stats_service::customer_count(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stats/balance",
    responses(
        (status = 200, description = "Sum of purchases minus sum of payments", body = ApiResponse<Balance>),
    ),
    tag = "Stats"
)]
pub async fn global_balance(
    State(state): State<AppState>,
    _session: AuthSession,
) -> AppResult<Json<ApiResponse<Balance>>> {
    let resp = stats_service::global_balance(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stats/balance/{customer_id}",
    params(
        ("customer_id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Balance of one customer", body = ApiResponse<Balance>),
    ),
    tag = "Stats"
)]
pub async fn customer_balance(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Balance>>> {
    let resp = stats_service::customer_balance(&state, customer_id).await?;
    Ok(Json(resp))
}
