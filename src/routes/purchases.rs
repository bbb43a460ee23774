use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::purchases::{
        CreatePurchaseRequest, PurchaseDeleted, PurchaseList, UpdatePurchaseRequest,
    },
    error::AppResult,
    middleware::auth::AuthSession,
    models::Purchase,
    response::ApiResponse,
    services::purchase_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_purchase))
        .route("/{id}", axum::routing::put(edit_purchase))
        .route("/{id}", axum::routing::delete(delete_purchase))
        .route("/customer/{customer_id}", axum::routing::get(list_purchases))
}

#[utoipa::path(
    post,
    path = "/api/purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 200, description = "Record a purchase", body = ApiResponse<Purchase>),
        (status = 400, description = "Invalid product name or price"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<CreatePurchaseRequest>,
) -> AppResult<Json<ApiResponse<Purchase>>> {
    let resp = purchase_service::create_purchase(&state, &session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/purchases/{id}",
    params(
        ("id" = i64, Path, description = "Purchase ID")
    ),
    request_body = UpdatePurchaseRequest,
    responses(
        (status = 200, description = "Updated purchase", body = ApiResponse<Purchase>),
        (status = 404, description = "Purchase not found"),
        (status = 409, description = "Values identical to stored row"),
    ),
    tag = "Purchases"
)]
pub async fn edit_purchase(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePurchaseRequest>,
) -> AppResult<Json<ApiResponse<Purchase>>> {
    let resp = purchase_service::edit_purchase(&state, &session, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    params(
        ("id" = i64, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Deleted purchase; reports purged receipts", body = ApiResponse<PurchaseDeleted>),
        (status = 404, description = "Purchase not found"),
    ),
    tag = "Purchases"
)]
pub async fn delete_purchase(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<PurchaseDeleted>>> {
    let resp = purchase_service::delete_purchase(&state, &session, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/purchases/customer/{customer_id}",
    params(
        ("customer_id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Purchases of one customer", body = ApiResponse<PurchaseList>),
    ),
    tag = "Purchases"
)]
pub async fn list_purchases(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<PurchaseList>>> {
    let resp = purchase_service::list_purchases(&state, customer_id).await?;
    Ok(Json(resp))
}
