use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("phone number is already registered")]
    DuplicatePhone,

    #[error("not found")]
    NotFound,

    #[error("customer not found")]
    CustomerNotFound,

    #[error("nothing to update, values are unchanged")]
    NoChange,

    #[error("unauthorized")]
    Unauthorized,

    #[error("storage failure")]
    Storage(#[from] sea_orm::DbErr),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-checkable kind, independent of the human message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::DuplicatePhone => "duplicate_phone",
            AppError::NotFound => "not_found",
            AppError::CustomerNotFound => "customer_not_found",
            AppError::NoChange => "no_change",
            AppError::Unauthorized => "unauthorized",
            AppError::Storage(_) => "storage_failure",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicatePhone | AppError::NoChange => StatusCode::CONFLICT,
            AppError::NotFound | AppError::CustomerNotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage(err) = &self {
            tracing::error!(error = %err, "storage failure");
        }
        if let AppError::Internal(err) = &self {
            tracing::error!(error = %err, "internal error");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData { error: self.kind() }),
            meta: Some(Meta::empty()),
        };

        (self.status(), axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
