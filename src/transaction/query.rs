//! Filters for listing transactions.

use serde::Deserialize;
use time::Date;

use crate::{Error, calendar_date::parse_date, transaction_type::TransactionType};

/// The raw query string for listing transactions, e.g.
/// `?type=income&start_date=2024-01-01&end_date=2024-01-31`.
///
/// Empty values are treated the same as missing values.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Independent, optional constraints on the transactions to list.
///
/// A field set to `None` does not constrain the results.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions with exactly this category name.
    pub category: Option<String>,
    /// Only include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Only include transactions on or before this date.
    pub end_date: Option<Date>,
}

impl TryFrom<TransactionQuery> for TransactionFilter {
    type Error = Error;

    fn try_from(query: TransactionQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_type: non_empty(query.transaction_type)
                .map(|text| text.parse::<TransactionType>())
                .transpose()?,
            category: non_empty(query.category),
            start_date: non_empty(query.start_date)
                .map(|text| parse_date(&text))
                .transpose()?,
            end_date: non_empty(query.end_date)
                .map(|text| parse_date(&text))
                .transpose()?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
