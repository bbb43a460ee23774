use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

use crate::{
    dto::stats::{Balance, CustomerCount},
    entity::{
        customers::Entity as Customers,
        purchases::{Column as PurchaseCol, Entity as Purchases},
        receipts::{Column as ReceiptCol, Entity as Receipts},
    },
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn customer_count(state: &AppState) -> AppResult<ApiResponse<CustomerCount>> {
    let count = Customers::find().count(&state.orm).await?;
    Ok(ApiResponse::success(
        "Customer count",
        CustomerCount { count },
        Some(Meta::empty()),
    ))
}

/// Sum of all purchases minus sum of all receipts. Both sums run inside one
/// read transaction so no write can land between them. An empty store is a
/// zero balance, not an error.
pub async fn global_balance(state: &AppState) -> AppResult<ApiResponse<Balance>> {
    let txn = state.orm.begin().await?;
    let bought = purchase_total(&txn, None).await?;
    let received = receipt_total(&txn, None).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Global balance",
        Balance {
            balance: bought - received,
        },
        Some(Meta::empty()),
    ))
}

/// Same formula restricted to one customer. An id with no rows on either
/// side yields zero.
pub async fn customer_balance(
    state: &AppState,
    customer_id: i64,
) -> AppResult<ApiResponse<Balance>> {
    let txn = state.orm.begin().await?;
    let bought = purchase_total(&txn, Some(customer_id)).await?;
    let received = receipt_total(&txn, Some(customer_id)).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Customer balance",
        Balance {
            balance: bought - received,
        },
        Some(Meta::empty()),
    ))
}

async fn purchase_total<C: ConnectionTrait>(
    conn: &C,
    customer_id: Option<i64>,
) -> Result<f64, sea_orm::DbErr> {
    let mut query = Purchases::find()
        .select_only()
        .column_as(Expr::col(PurchaseCol::Price).sum(), "total");
    if let Some(id) = customer_id {
        query = query.filter(PurchaseCol::CustomerId.eq(id));
    }
    // SUM over no rows is NULL.
    let total = query.into_tuple::<Option<f64>>().one(conn).await?;
    Ok(total.flatten().unwrap_or(0.0))
}

async fn receipt_total<C: ConnectionTrait>(
    conn: &C,
    customer_id: Option<i64>,
) -> Result<f64, sea_orm::DbErr> {
    let mut query = Receipts::find()
        .select_only()
        .column_as(Expr::col(ReceiptCol::Price).sum(), "total");
    if let Some(id) = customer_id {
        query = query.filter(ReceiptCol::CustomerId.eq(id));
    }
    let total = query.into_tuple::<Option<f64>>().one(conn).await?;
    Ok(total.flatten().unwrap_or(0.0))
}
