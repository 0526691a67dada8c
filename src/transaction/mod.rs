//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the JSON body used to create and update it
//! - Database functions for storing, querying, and aggregating transactions
//! - The service that validates transactions and the HTTP handlers on top of it

mod db;
mod domain;
mod handlers;
mod query;
mod service;

pub use db::create_transaction_table;
pub use domain::{MonthlyReport, Transaction, TransactionData, TransactionFields};
pub use handlers::{
    create_transaction_endpoint, delete_transaction_endpoint, get_monthly_report_endpoint,
    get_transaction_endpoint, list_transactions_endpoint, update_transaction_endpoint,
};
pub use query::{TransactionFilter, TransactionQuery};
pub use service::TransactionService;
