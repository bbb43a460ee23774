use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod customers;
pub mod doc;
pub mod health;
pub mod purchases;
pub mod receipts;
pub mod stats;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/customers", customers::router())
        .nest("/purchases", purchases::router())
        .nest("/receipts", receipts::router())
        .nest("/stats", stats::router())
}
