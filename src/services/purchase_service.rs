use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    dto::purchases::{
        CreatePurchaseRequest, PurchaseDeleted, PurchaseList, UpdatePurchaseRequest,
    },
    entity::{
        purchases::{self, Column as PurchaseCol, Entity as Purchases},
        receipts::{Column as ReceiptCol, Entity as Receipts},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthSession,
    models::Purchase,
    notifier::{EventKind, LedgerEvent, dispatch},
    response::{ApiResponse, Meta},
    state::AppState,
};

use super::{full_name, require_price, require_text, touch_customer};

pub async fn create_purchase(
    state: &AppState,
    session: &AuthSession,
    payload: CreatePurchaseRequest,
) -> AppResult<ApiResponse<Purchase>> {
    let product_name = require_text("product_name", &payload.product_name)?;
    let price = require_price(payload.price)?;

    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    // Fails with CustomerNotFound before anything is written.
    let customer = touch_customer(&txn, payload.customer_id, &stamp).await?;

    let purchase = purchases::ActiveModel {
        id: NotSet,
        customer_id: Set(customer.id),
        product_name: Set(product_name),
        price: Set(price),
        created_at: Set(stamp.at),
        created_at_display: Set(stamp.display.clone()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::PurchaseAdded,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({
                "id": purchase.id,
                "product_name": purchase.product_name,
                "price": purchase.price,
            }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Purchase recorded",
        purchase.into(),
        Some(Meta::empty()),
    ))
}

pub async fn edit_purchase(
    state: &AppState,
    session: &AuthSession,
    id: i64,
    payload: UpdatePurchaseRequest,
) -> AppResult<ApiResponse<Purchase>> {
    let product_name = require_text("product_name", &payload.product_name)?;
    let price = require_price(payload.price)?;

    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let existing = Purchases::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    // Identical payloads are rejected without writing anything.
    if existing.product_name == product_name && existing.price == price {
        return Err(AppError::NoChange);
    }

    let customer = touch_customer(&txn, existing.customer_id, &stamp).await?;

    let mut active: purchases::ActiveModel = existing.into();
    active.product_name = Set(product_name);
    active.price = Set(price);
    let purchase = active.update(&txn).await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::PurchaseUpdated,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({
                "id": purchase.id,
                "product_name": purchase.product_name,
                "price": purchase.price,
            }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Purchase updated",
        purchase.into(),
        Some(Meta::empty()),
    ))
}

/// Removes one purchase. When that was the customer's last purchase, every
/// receipt of the customer is deleted in the same transaction: a receipt
/// balance is meaningless without at least one purchase.
pub async fn delete_purchase(
    state: &AppState,
    session: &AuthSession,
    id: i64,
) -> AppResult<ApiResponse<PurchaseDeleted>> {
    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let purchase = Purchases::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    Purchases::delete_by_id(id).exec(&txn).await?;

    let remaining = Purchases::find()
        .filter(PurchaseCol::CustomerId.eq(purchase.customer_id))
        .count(&txn)
        .await?;

    let receipts_purged = if remaining == 0 {
        Receipts::delete_many()
            .filter(ReceiptCol::CustomerId.eq(purchase.customer_id))
            .exec(&txn)
            .await?
            .rows_affected
    } else {
        0
    };

    let customer = touch_customer(&txn, purchase.customer_id, &stamp).await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::PurchaseDeleted,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({
                "id": id,
                "product_name": purchase.product_name,
                "receipts_purged": receipts_purged,
            }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Purchase deleted",
        PurchaseDeleted {
            id,
            receipts_purged,
        },
        Some(Meta::empty()),
    ))
}

/// Stable insertion order.
pub async fn list_purchases(
    state: &AppState,
    customer_id: i64,
) -> AppResult<ApiResponse<PurchaseList>> {
    let items: Vec<Purchase> = Purchases::find()
        .filter(PurchaseCol::CustomerId.eq(customer_id))
        .order_by_asc(PurchaseCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Purchase::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Purchases",
        PurchaseList { items },
        Some(Meta::total(total)),
    ))
}
