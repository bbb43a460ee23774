pub mod customers;
pub mod purchases;
pub mod receipts;
