use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Purchase;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePurchaseRequest {
    pub customer_id: i64,
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePurchaseRequest {
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseList {
    pub items: Vec<Purchase>,
}

/// Ack for a purchase delete. `receipts_purged` reports the follow-on rule:
/// when a customer's last purchase goes, all their receipts go with it.
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseDeleted {
    pub id: i64,
    pub receipts_purged: u64,
}
