//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{database_id::TransactionId, transaction_type::TransactionType};

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always positive when created.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The name of the category the transaction is filed under.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    #[serde(with = "crate::calendar_date")]
    pub date: Date,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The JSON body for creating or replacing a transaction.
///
/// The type is a plain string so that the service can check it before the
/// amount and report it with its own message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "crate::calendar_date")]
    pub date: Date,
}

/// The validated fields of a transaction that are written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    pub date: Date,
}

/// The totals of income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The month formatted as `YYYY-MM`.
    pub month: String,
    /// The sum of the month's income.
    pub total_income: f64,
    /// The sum of the month's expenses.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub net_amount: f64,
}

impl MonthlyReport {
    /// Create a report for `month`, deriving the net amount from the totals.
    pub fn new(month: String, total_income: f64, total_expenses: f64) -> Self {
        Self {
            month,
            total_income,
            total_expenses,
            net_amount: total_income - total_expenses,
        }
    }
}
