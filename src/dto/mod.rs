pub mod auth;
pub mod customers;
pub mod purchases;
pub mod receipts;
pub mod stats;
