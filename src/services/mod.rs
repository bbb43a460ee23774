use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::{
    clock::Stamp,
    entity::customers::{self, Entity as Customers},
    error::{AppError, AppResult},
};

pub mod auth_service;
pub mod customer_service;
pub mod purchase_service;
pub mod receipt_service;
pub mod stats_service;

/// Trimmed, required text field.
pub(crate) fn require_text(field: &'static str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Prices are finite and non-negative; the sign convention lives in the
/// table the row sits in, not in the number.
pub(crate) fn require_price(price: f64) -> AppResult<f64> {
    if !price.is_finite() {
        return Err(AppError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(AppError::Validation("price must not be negative".into()));
    }
    Ok(price)
}

/// Refresh a customer's last-activity stamp inside the caller's transaction.
/// Fails with `CustomerNotFound` when the owner does not exist, which also
/// guards child inserts against dangling foreign keys.
pub(crate) async fn touch_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i64,
    stamp: &Stamp,
) -> AppResult<customers::Model> {
    let customer = Customers::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

    let mut active: customers::ActiveModel = customer.into();
    active.last_activity_at = Set(stamp.at);
    active.last_activity_display = Set(stamp.display.clone());
    Ok(active.update(conn).await?)
}

pub(crate) fn full_name(customer: &customers::Model) -> String {
    format!("{} {}", customer.name, customer.family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_empty() {
        assert_eq!(require_text("name", "  Ali ").unwrap(), "Ali");
        assert!(matches!(
            require_text("name", "   "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn require_price_rejects_nan_and_negatives() {
        assert_eq!(require_price(0.0).unwrap(), 0.0);
        assert_eq!(require_price(1000.5).unwrap(), 1000.5);
        assert!(matches!(
            require_price(f64::NAN),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            require_price(f64::INFINITY),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            require_price(-1.0),
            Err(AppError::Validation(_))
        ));
    }
}
