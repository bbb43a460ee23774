use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        customers::{CreateCustomerRequest, CustomerDeleted, CustomerList},
        purchases::{CreatePurchaseRequest, PurchaseDeleted, PurchaseList, UpdatePurchaseRequest},
        receipts::{CreateReceiptRequest, ReceiptDeleted, ReceiptList, UpdateReceiptRequest},
        stats::{Balance, CustomerCount},
    },
    models::{Customer, Purchase, Receipt},
    response::{ApiResponse, Meta},
    routes::{auth, customers, health, purchases, receipts, stats},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::check,
        customers::create_customer,
        customers::list_customers,
        customers::delete_customer,
        purchases::create_purchase,
        purchases::edit_purchase,
        purchases::delete_purchase,
        purchases::list_purchases,
        receipts::create_receipt,
        receipts::edit_receipt,
        receipts::delete_receipt,
        receipts::list_receipts,
        stats::customer_count,
        stats::global_balance,
        stats::customer_balance,
    ),
    components(
        schemas(
            Customer,
            Purchase,
            Receipt,
            LoginRequest,
            LoginResponse,
            auth::SessionInfo,
            CreateCustomerRequest,
            CustomerList,
            CustomerDeleted,
            CreatePurchaseRequest,
            UpdatePurchaseRequest,
            PurchaseList,
            PurchaseDeleted,
            CreateReceiptRequest,
            UpdateReceiptRequest,
            ReceiptList,
            ReceiptDeleted,
            CustomerCount,
            Balance,
            Meta,
            ApiResponse<Customer>,
            ApiResponse<CustomerList>,
            ApiResponse<Purchase>,
            ApiResponse<PurchaseList>,
            ApiResponse<Receipt>,
            ApiResponse<ReceiptList>,
            ApiResponse<Balance>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Operator session endpoints"),
        (name = "Customers", description = "Customer ledger endpoints"),
        (name = "Purchases", description = "Purchased product endpoints"),
        (name = "Receipts", description = "Received payment endpoints"),
        (name = "Stats", description = "Counts and balances"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
