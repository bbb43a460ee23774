use std::sync::Arc;

use customer_ledger_api::{
    clock::Clock,
    db::{create_orm_conn, run_migrations},
    dto::{
        customers::CreateCustomerRequest,
        purchases::{CreatePurchaseRequest, UpdatePurchaseRequest},
        receipts::{CreateReceiptRequest, UpdateReceiptRequest},
    },
    error::AppError,
    middleware::auth::AuthSession,
    models::Customer,
    notifier::{EventKind, Notifier, RecordingNotifier},
    services::{customer_service, purchase_service, receipt_service, stats_service},
    state::AppState,
};

async fn setup_state() -> anyhow::Result<(AppState, Arc<RecordingNotifier>)> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;

    let recorder = Arc::new(RecordingNotifier::default());
    let notifier: Arc<dyn Notifier> = recorder.clone();
    let state = AppState {
        orm,
        notifier,
        clock: Clock::system(),
    };
    Ok((state, recorder))
}

fn session() -> AuthSession {
    AuthSession {
        subject: "admin".into(),
    }
}

async fn seed_customer(
    state: &AppState,
    name: &str,
    family: &str,
    phone: &str,
) -> anyhow::Result<Customer> {
    let resp = customer_service::create_customer(
        state,
        &session(),
        CreateCustomerRequest {
            name: name.into(),
            family: family.into(),
            phone: phone.into(),
        },
    )
    .await?;
    Ok(resp.data.expect("customer data"))
}

async fn balance_of(state: &AppState, customer_id: i64) -> anyhow::Result<f64> {
    let resp = stats_service::customer_balance(state, customer_id).await?;
    Ok(resp.data.expect("balance data").balance)
}

// Full ledger walk-through: add customer, purchase, payment, check the
// running balance, reject a no-op edit, then watch the last-purchase cascade
// wipe the receipts.
#[tokio::test]
async fn ledger_scenario_end_to_end() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let customer = seed_customer(&state, "Ali", "Rezai", "09121234567").await?;
    assert_eq!(customer.id, 1);
    assert!(!customer.last_activity_display.is_empty());

    let purchase = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Laptop".into(),
            price: 1000.0,
        },
    )
    .await?
    .data
    .expect("purchase data");
    assert_eq!(purchase.id, 1);
    assert_eq!(purchase.price, 1000.0);

    let receipt = receipt_service::create_receipt(
        &state,
        &auth,
        CreateReceiptRequest {
            customer_id: customer.id,
            price: 400.0,
        },
    )
    .await?
    .data
    .expect("receipt data");
    assert_eq!(receipt.price, 400.0);

    assert_eq!(balance_of(&state, customer.id).await?, 600.0);

    // Re-submitting the stored values is a rejected no-op.
    let unchanged = purchase_service::edit_purchase(
        &state,
        &auth,
        purchase.id,
        UpdatePurchaseRequest {
            product_name: "Laptop".into(),
            price: 1000.0,
        },
    )
    .await;
    assert!(matches!(unchanged, Err(AppError::NoChange)));

    let deleted = purchase_service::delete_purchase(&state, &auth, purchase.id)
        .await?
        .data
        .expect("delete ack");
    assert_eq!(deleted.receipts_purged, 1);

    let receipts = receipt_service::list_receipts(&state, customer.id)
        .await?
        .data
        .expect("receipt list");
    assert!(receipts.items.is_empty());
    assert_eq!(balance_of(&state, customer.id).await?, 0.0);

    Ok(())
}

#[tokio::test]
async fn duplicate_phone_is_rejected() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;

    seed_customer(&state, "Ali", "Rezai", "09121234567").await?;
    let second = customer_service::create_customer(
        &state,
        &session(),
        CreateCustomerRequest {
            name: "Reza".into(),
            family: "Ahmadi".into(),
            phone: "09121234567".into(),
        },
    )
    .await;
    assert!(matches!(second, Err(AppError::DuplicatePhone)));

    let count = stats_service::customer_count(&state)
        .await?
        .data
        .expect("count data");
    assert_eq!(count.count, 1);
    Ok(())
}

#[tokio::test]
async fn delete_customer_cascades_atomically() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let customer = seed_customer(&state, "Sara", "Karimi", "09120000001").await?;
    for (product, price) in [("Monitor", 350.0), ("Keyboard", 80.0)] {
        purchase_service::create_purchase(
            &state,
            &auth,
            CreatePurchaseRequest {
                customer_id: customer.id,
                product_name: product.into(),
                price,
            },
        )
        .await?;
    }
    receipt_service::create_receipt(
        &state,
        &auth,
        CreateReceiptRequest {
            customer_id: customer.id,
            price: 100.0,
        },
    )
    .await?;

    let ack = customer_service::delete_customer(&state, &auth, customer.id)
        .await?
        .data
        .expect("delete ack");
    assert_eq!(ack.purchases_removed, 2);
    assert_eq!(ack.receipts_removed, 1);

    let count = stats_service::customer_count(&state)
        .await?
        .data
        .expect("count data");
    assert_eq!(count.count, 0);

    let purchases = purchase_service::list_purchases(&state, customer.id)
        .await?
        .data
        .expect("purchase list");
    assert!(purchases.items.is_empty());

    let balance = stats_service::global_balance(&state)
        .await?
        .data
        .expect("balance data");
    assert_eq!(balance.balance, 0.0);
    Ok(())
}

// A customer with exactly one purchase and two receipts: removing the last
// purchase must take both receipts with it.
#[tokio::test]
async fn removing_last_purchase_purges_receipts() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let customer = seed_customer(&state, "Nima", "Moradi", "09120000002").await?;
    let purchase = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Phone".into(),
            price: 500.0,
        },
    )
    .await?
    .data
    .expect("purchase data");

    for price in [200.0, 300.0] {
        receipt_service::create_receipt(
            &state,
            &auth,
            CreateReceiptRequest {
                customer_id: customer.id,
                price,
            },
        )
        .await?;
    }

    let ack = purchase_service::delete_purchase(&state, &auth, purchase.id)
        .await?
        .data
        .expect("delete ack");
    assert_eq!(ack.receipts_purged, 2);
    assert_eq!(balance_of(&state, customer.id).await?, 0.0);
    Ok(())
}

#[tokio::test]
async fn receipts_survive_when_purchases_remain() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let customer = seed_customer(&state, "Omid", "Navabi", "09120000003").await?;
    let first = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Tablet".into(),
            price: 700.0,
        },
    )
    .await?
    .data
    .expect("purchase data");
    purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Charger".into(),
            price: 30.0,
        },
    )
    .await?;
    receipt_service::create_receipt(
        &state,
        &auth,
        CreateReceiptRequest {
            customer_id: customer.id,
            price: 100.0,
        },
    )
    .await?;

    let ack = purchase_service::delete_purchase(&state, &auth, first.id)
        .await?
        .data
        .expect("delete ack");
    assert_eq!(ack.receipts_purged, 0);

    let receipts = receipt_service::list_receipts(&state, customer.id)
        .await?
        .data
        .expect("receipt list");
    assert_eq!(receipts.items.len(), 1);
    assert_eq!(balance_of(&state, customer.id).await?, 30.0 - 100.0);
    Ok(())
}

#[tokio::test]
async fn empty_store_aggregates_to_zero() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;

    let count = stats_service::customer_count(&state)
        .await?
        .data
        .expect("count data");
    assert_eq!(count.count, 0);

    let balance = stats_service::global_balance(&state)
        .await?
        .data
        .expect("balance data");
    assert_eq!(balance.balance, 0.0);

    // Unknown customer id: zero, not an error.
    assert_eq!(balance_of(&state, 42).await?, 0.0);
    Ok(())
}

#[tokio::test]
async fn global_balance_is_the_sum_of_customer_balances() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let first = seed_customer(&state, "Ali", "Rezai", "09121234567").await?;
    let second = seed_customer(&state, "Sara", "Karimi", "09120000001").await?;

    for (customer_id, product, price) in [
        (first.id, "Laptop", 1000.0),
        (first.id, "Mouse", 50.0),
        (second.id, "Desk", 400.0),
    ] {
        purchase_service::create_purchase(
            &state,
            &auth,
            CreatePurchaseRequest {
                customer_id,
                product_name: product.into(),
                price,
            },
        )
        .await?;
    }
    for (customer_id, price) in [(first.id, 300.0), (second.id, 150.0)] {
        receipt_service::create_receipt(
            &state,
            &auth,
            CreateReceiptRequest { customer_id, price },
        )
        .await?;
    }

    let first_balance = balance_of(&state, first.id).await?;
    let second_balance = balance_of(&state, second.id).await?;
    assert_eq!(first_balance, 750.0);
    assert_eq!(second_balance, 250.0);

    let global = stats_service::global_balance(&state)
        .await?
        .data
        .expect("balance data");
    assert_eq!(global.balance, first_balance + second_balance);
    Ok(())
}

#[tokio::test]
async fn validation_and_lookup_failures() -> anyhow::Result<()> {
    let (state, _) = setup_state().await?;
    let auth = session();

    let blank_name = customer_service::create_customer(
        &state,
        &auth,
        CreateCustomerRequest {
            name: "   ".into(),
            family: "Rezai".into(),
            phone: "09121234567".into(),
        },
    )
    .await;
    assert!(matches!(blank_name, Err(AppError::Validation(_))));

    let orphan_purchase = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: 99,
            product_name: "Laptop".into(),
            price: 10.0,
        },
    )
    .await;
    assert!(matches!(orphan_purchase, Err(AppError::CustomerNotFound)));

    let orphan_receipt = receipt_service::create_receipt(
        &state,
        &auth,
        CreateReceiptRequest {
            customer_id: 99,
            price: 10.0,
        },
    )
    .await;
    assert!(matches!(orphan_receipt, Err(AppError::CustomerNotFound)));

    let customer = seed_customer(&state, "Ali", "Rezai", "09121234500").await?;
    let bad_price = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Laptop".into(),
            price: f64::NAN,
        },
    )
    .await;
    assert!(matches!(bad_price, Err(AppError::Validation(_))));

    let missing_edit = purchase_service::edit_purchase(
        &state,
        &auth,
        77,
        UpdatePurchaseRequest {
            product_name: "Laptop".into(),
            price: 1.0,
        },
    )
    .await;
    assert!(matches!(missing_edit, Err(AppError::NotFound)));

    let missing_receipt_edit =
        receipt_service::edit_receipt(&state, &auth, 77, UpdateReceiptRequest { price: 1.0 }).await;
    assert!(matches!(missing_receipt_edit, Err(AppError::NotFound)));

    let missing_delete = receipt_service::delete_receipt(&state, &auth, 77).await;
    assert!(matches!(missing_delete, Err(AppError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn customers_list_orders_by_last_activity() -> anyhow::Result<()> {
    let (base, _) = setup_state().await?;

    // Pin successive instants so the ordering key is unambiguous.
    let at = |millis: i64| AppState {
        clock: Clock::fixed(millis),
        ..base.clone()
    };
    let auth = session();

    let first = seed_customer(&at(1_000), "Ali", "Rezai", "09121234567").await?;
    let second = seed_customer(&at(2_000), "Sara", "Karimi", "09120000001").await?;

    let resp = customer_service::list_customers(&base).await?;
    assert_eq!(resp.meta.and_then(|m| m.total), Some(2));
    let listed = resp.data.expect("customer list");
    let ids: Vec<i64> = listed.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    // Touching the older customer through a purchase moves it to the front.
    purchase_service::create_purchase(
        &at(3_000),
        &auth,
        CreatePurchaseRequest {
            customer_id: first.id,
            product_name: "Laptop".into(),
            price: 10.0,
        },
    )
    .await?;

    let listed = customer_service::list_customers(&base)
        .await?
        .data
        .expect("customer list");
    let ids: Vec<i64> = listed.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let refreshed = &listed.items[0];
    assert_eq!(refreshed.last_activity_at, 3_000);
    Ok(())
}

#[tokio::test]
async fn notifier_sees_committed_mutations_only() -> anyhow::Result<()> {
    let (state, recorder) = setup_state().await?;
    let auth = session();

    let customer = seed_customer(&state, "Ali", "Rezai", "09121234567").await?;
    let purchase = purchase_service::create_purchase(
        &state,
        &auth,
        CreatePurchaseRequest {
            customer_id: customer.id,
            product_name: "Laptop".into(),
            price: 1000.0,
        },
    )
    .await?
    .data
    .expect("purchase data");

    // Rejected mutations emit nothing.
    let unchanged = purchase_service::edit_purchase(
        &state,
        &auth,
        purchase.id,
        UpdatePurchaseRequest {
            product_name: "Laptop".into(),
            price: 1000.0,
        },
    )
    .await;
    assert!(matches!(unchanged, Err(AppError::NoChange)));

    purchase_service::edit_purchase(
        &state,
        &auth,
        purchase.id,
        UpdatePurchaseRequest {
            product_name: "Laptop".into(),
            price: 900.0,
        },
    )
    .await?;

    let events = recorder.events();
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::CustomerAdded,
            EventKind::PurchaseAdded,
            EventKind::PurchaseUpdated,
        ]
    );
    assert!(events.iter().all(|e| e.actor == "admin"));
    assert_eq!(events[1].customer, "Ali Rezai");
    Ok(())
}
