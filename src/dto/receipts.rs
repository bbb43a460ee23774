use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Receipt;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReceiptRequest {
    pub customer_id: i64,
    pub price: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReceiptRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptList {
    pub items: Vec<Receipt>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptDeleted {
    pub id: i64,
}
