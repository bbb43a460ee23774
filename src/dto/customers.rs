use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Customer;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub family: String,
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerList {
    pub items: Vec<Customer>,
}

/// Ack for a customer delete; the cascade counts make the unit of work
/// visible to the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDeleted {
    pub id: i64,
    pub purchases_removed: u64,
    pub receipts_removed: u64,
}
