use axum::{Json, Router, extract::State, routing::get, routing::post};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::AppResult,
    middleware::auth::AuthSession,
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/check", get(check))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[derive(Serialize, ToSchema)]
pub struct SessionInfo {
    pub subject: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Session is valid", body = ApiResponse<SessionInfo>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Auth"
)]
pub async fn check(session: AuthSession) -> Json<ApiResponse<SessionInfo>> {
    Json(ApiResponse::success(
        "Session valid",
        SessionInfo {
            subject: session.subject,
        },
        Some(Meta::empty()),
    ))
}
