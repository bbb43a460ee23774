use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerDeleted, CustomerList},
    entity::{
        customers::{self, Column as CustomerCol, Entity as Customers},
        purchases::{Column as PurchaseCol, Entity as Purchases},
        receipts::{Column as ReceiptCol, Entity as Receipts},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthSession,
    models::Customer,
    notifier::{EventKind, LedgerEvent, dispatch},
    response::{ApiResponse, Meta},
    state::AppState,
};

use super::{full_name, require_text};

pub async fn create_customer(
    state: &AppState,
    session: &AuthSession,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let name = require_text("name", &payload.name)?;
    let family = require_text("family", &payload.family)?;
    let phone = require_text("phone", &payload.phone)?;

    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    // Checked here for a typed error; the UNIQUE constraint backstops races.
    let taken = Customers::find()
        .filter(CustomerCol::Phone.eq(phone.as_str()))
        .one(&txn)
        .await?;
    if taken.is_some() {
        return Err(AppError::DuplicatePhone);
    }

    let customer = customers::ActiveModel {
        id: NotSet,
        name: Set(name),
        family: Set(family),
        phone: Set(phone),
        last_activity_at: Set(stamp.at),
        last_activity_display: Set(stamp.display.clone()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::CustomerAdded,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({ "id": customer.id, "phone": customer.phone }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Customer created",
        customer.into(),
        Some(Meta::empty()),
    ))
}

/// Most recently touched customers first; the raw instant is the ordering
/// key, with id as a deterministic tie-break.
pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items: Vec<Customer> = Customers::find()
        .order_by_desc(CustomerCol::LastActivityAt)
        .order_by_desc(CustomerCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::total(total)),
    ))
}

/// Deletes the customer row together with every purchase and receipt that
/// belongs to it. All three deletions commit as one unit; a reader never sees
/// a partial cascade.
pub async fn delete_customer(
    state: &AppState,
    session: &AuthSession,
    id: i64,
) -> AppResult<ApiResponse<CustomerDeleted>> {
    let stamp = state.clock.stamp();
    let txn = state.orm.begin().await?;

    let customer = Customers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let purchases_removed = Purchases::delete_many()
        .filter(PurchaseCol::CustomerId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    let receipts_removed = Receipts::delete_many()
        .filter(ReceiptCol::CustomerId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Customers::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    dispatch(
        &state.notifier,
        LedgerEvent {
            kind: EventKind::CustomerDeleted,
            actor: session.subject.clone(),
            customer: full_name(&customer),
            details: serde_json::json!({
                "id": id,
                "purchases_removed": purchases_removed,
                "receipts_removed": receipts_removed,
            }),
            occurred_at: stamp.display,
        },
    );

    Ok(ApiResponse::success(
        "Customer deleted",
        CustomerDeleted {
            id,
            purchases_removed,
            receipts_removed,
        },
        Some(Meta::empty()),
    ))
}
