use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerCount {
    pub count: u64,
}

/// Purchases minus receipts, globally or for one customer.
#[derive(Debug, Serialize, ToSchema)]
pub struct Balance {
    pub balance: f64,
}
