use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::receipts::{CreateReceiptRequest, ReceiptDeleted, ReceiptList, UpdateReceiptRequest},
    error::AppResult,
    middleware::auth::AuthSession,
    models::Receipt,
    response::ApiResponse,
    services::receipt_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_receipt))
        .route("/{id}", axum::routing::put(edit_receipt))
        .route("/{id}", axum::routing::delete(delete_receipt))
        .route("/customer/{customer_id}", axum::routing::get(list_receipts))
}

#[utoipa::path(
    post,
    path = "/api/receipts",
    request_body = CreateReceiptRequest,
    responses(
        (status = 200, description = "Record a payment", body = ApiResponse<Receipt>),
        (status = 400, description = "Invalid price"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Receipts"
)]
pub async fn create_receipt(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<CreateReceiptRequest>,
) -> AppResult<Json<ApiResponse<Receipt>>> {
    let resp = receipt_service::create_receipt(&state, &session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/receipts/{id}",
    params(
        ("id" = i64, Path, description = "Receipt ID")
    ),
    request_body = UpdateReceiptRequest,
    responses(
        (status = 200, description = "Updated receipt", body = ApiResponse<Receipt>),
        (status = 404, description = "Receipt not found"),
        (status = 409, description = "Price identical to stored row"),
    ),
    tag = "Receipts"
)]
pub async fn edit_receipt(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReceiptRequest>,
) -> AppResult<Json<ApiResponse<Receipt>>> {
    let resp = receipt_service::edit_receipt(&state, &session, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/receipts/{id}",
    params(
        ("id" = i64, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "Deleted receipt", body = ApiResponse<ReceiptDeleted>),
        (status = 404, description = "Receipt not found"),
    ),
    tag = "Receipts"
)]
pub async fn delete_receipt(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ReceiptDeleted>>> {
    let resp = receipt_service::delete_receipt(&state, &session, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/receipts/customer/{customer_id}",
    params(
        ("customer_id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Payments of one customer", body = ApiResponse<ReceiptList>),
    ),
    tag = "Receipts"
)]
pub async fn list_receipts(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<ReceiptList>>> {
    let resp = receipt_service::list_receipts(&state, customer_id).await?;
    Ok(Json(resp))
}
