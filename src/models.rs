use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity;

/// Timestamps come in two forms everywhere: the raw epoch-millis instant used
/// for ordering and a pre-rendered display string for human consumption.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub family: String,
    pub phone: String,
    pub last_activity_at: i64,
    pub last_activity_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Purchase {
    pub id: i64,
    pub customer_id: i64,
    pub product_name: String,
    pub price: f64,
    pub created_at: i64,
    pub created_at_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Receipt {
    pub id: i64,
    pub customer_id: i64,
    pub price: f64,
    pub created_at: i64,
    pub created_at_display: String,
}

impl From<entity::customers::Model> for Customer {
    fn from(model: entity::customers::Model) -> Self {
        Customer {
            id: model.id,
            name: model.name,
            family: model.family,
            phone: model.phone,
            last_activity_at: model.last_activity_at,
            last_activity_display: model.last_activity_display,
        }
    }
}

impl From<entity::purchases::Model> for Purchase {
    fn from(model: entity::purchases::Model) -> Self {
        Purchase {
            id: model.id,
            customer_id: model.customer_id,
            product_name: model.product_name,
            price: model.price,
            created_at: model.created_at,
            created_at_display: model.created_at_display,
        }
    }
}

impl From<entity::receipts::Model> for Receipt {
    fn from(model: entity::receipts::Model) -> Self {
        Receipt {
            id: model.id,
            customer_id: model.customer_id,
            price: model.price,
            created_at: model.created_at,
            created_at_display: model.created_at_display,
        }
    }
}
