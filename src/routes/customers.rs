use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerDeleted, CustomerList},
    error::AppResult,
    middleware::auth::AuthSession,
    models::Customer,
    response::ApiResponse,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_customer))
        .route("/", axum::routing::get(list_customers))
        .route("/{id}", axum::routing::delete(delete_customer))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Create customer", body = ApiResponse<Customer>),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Phone already registered"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::create_customer(&state, &session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "Customers, most recently active first", body = ApiResponse<CustomerList>),
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    _session: AuthSession,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::list_customers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer and all dependent rows deleted", body = ApiResponse<CustomerDeleted>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CustomerDeleted>>> {
    let resp = customer_service::delete_customer(&state, &session, id).await?;
    Ok(Json(resp))
}
