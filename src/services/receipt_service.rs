use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::receipts::{CreateReceiptRequest, ReceiptDeleted, ReceiptList, UpdateReceiptRequest},
    entity::receipts::{self, Column as ReceiptCol, Entity as Receipts},
    error::{AppError, AppResult},
    middleware::auth::AuthSession,
    models::Receipt,
    notifier::{EventKind, LedgerEvent, dispatch},
    response::{ApiResponse, Meta},
    state::AppState,
};

use super::{full_name, require_price, touch_customer};

pub async fn create_receipt(
    state: &AppState,
    session: &AuthSession,
    payload: CreateReceiptRequest,
) -> AppResult<ApiResponse<Receipt>> {
    let price = require_price(payload.price)?;

    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let customer = touch_customer(&txn, payload.customer_id, &stamp).await?;

    let receipt = receipts::ActiveModel {
        id: NotSet,
        customer_id: Set(customer.id),
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
            kind: EventKind::ReceiptAdded,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({ "id": receipt.id, "price": receipt.price }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Payment recorded",
        receipt.into(),
        Some(Meta::empty()),
    ))
}

pub async fn edit_receipt(
    state: &AppState,
    session: &AuthSession,
    id: i64,
    payload: UpdateReceiptRequest,
) -> AppResult<ApiResponse<Receipt>> {
    let price = require_price(payload.price)?;

    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let existing = Receipts::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if existing.price == price {
        return Err(AppError::NoChange);
    }

    let customer = touch_customer(&txn, existing.customer_id, &stamp).await?;

    let mut active: receipts::ActiveModel = existing.into();
    active.price = Set(price);
    let receipt = active.update(&txn).await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::ReceiptUpdated,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({ "id": receipt.id, "price": receipt.price }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Payment updated",
        receipt.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_receipt(
    state: &AppState,
    session: &AuthSession,
    id: i64,
) -> AppResult<ApiResponse<ReceiptDeleted>> {
    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let receipt = Receipts::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    Receipts::delete_by_id(id).exec(&txn).await?;
    let customer = touch_customer(&txn, receipt.customer_id, &stamp).await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::ReceiptDeleted,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({ "id": id, "price": receipt.price }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Payment deleted",
        ReceiptDeleted { id },
        Some(Meta::empty()),
    ))
}

/// Stable insertion order.
pub async fn list_receipts(
    state: &AppState,
    customer_id: i64,
) -> AppResult<ApiResponse<ReceiptList>> {
    let items: Vec<Receipt> = Receipts::find()
        .filter(ReceiptCol::CustomerId.eq(customer_id))
        .order_by_asc(ReceiptCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Receipt::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Payments",
        ReceiptList { items },
        Some(Meta::total(total)),
    ))
}
