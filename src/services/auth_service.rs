use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    notifier::{EventKind, LedgerEvent, dispatch},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Token lifetime mirrors the original operator session (three days).
const TOKEN_HOURS: i64 = 72;

/// Single-operator login: credentials come from the environment, not from a
/// user table. Both outcomes are reported to the notifier.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;

    let expected_user = std::env::var("ADMIN_USERNAME")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("ADMIN_USERNAME is not set")))?;
    let expected_hash = std::env::var("ADMIN_PASSWORD_HASH")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("ADMIN_PASSWORD_HASH is not set")))?;

    let parsed_hash = PasswordHash::new(&expected_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("invalid ADMIN_PASSWORD_HASH")))?;

    let authorized = username == expected_user
        && Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::LoginAttempt,
            actor: username.clone(),
            customer: String::new(),
            details: serde_json::json!({ "success": authorized }),
            occurred_at: state.clock.stamp().display,
        },
    );

    if !authorized {
        return Err(AppError::Unauthorized);
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let token = issue_token(&username, &secret)?;
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {token}"),
        },
        Some(Meta::empty()),
    ))
}

pub fn issue_token(subject: &str, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("failed to set expiration")))?;

    let claims = Claims {
        sub: subject.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
