//! Validation and persistence of transactions, and monthly reporting.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    category::category_exists,
    database_id::TransactionId,
    db::lock_connection,
    transaction::{
        MonthlyReport, Transaction, TransactionData, TransactionFields, TransactionFilter,
        db::{
            delete_transaction, insert_transaction, select_monthly_totals, select_transaction,
            select_transactions, update_transaction,
        },
    },
    transaction_type::TransactionType,
};

/// Creates, reads, updates and deletes transactions.
#[derive(Debug, Clone)]
pub struct TransactionService {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionService {
    fn from_ref(state: &AppState) -> Self {
        state.transaction_service.clone()
    }
}

impl TransactionService {
    /// Create a transaction service that uses the shared `db_connection`.
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }

    /// Record a new transaction.
    ///
    /// The type is checked first, then the amount, then that a category with
    /// the given name exists for the type.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransactionType] if the type is not "income" or "expense",
    /// - [Error::NonPositiveAmount] if the amount is zero or less,
    /// - [Error::InvalidCategory] if no category with that name exists for the type,
    /// - or [Error::SqlError] if there is an SQL error.
    pub fn create_transaction(&self, data: TransactionData) -> Result<Transaction, Error> {
        let fields = parse_fields(data)?;

        if fields.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(fields.amount));
        }

        let connection = lock_connection(&self.db_connection)?;

        if !category_exists(&fields.category, fields.transaction_type, &connection)? {
            return Err(Error::InvalidCategory(
                fields.category,
                fields.transaction_type,
            ));
        }

        let transaction = insert_transaction(&fields, OffsetDateTime::now_utc(), &connection)?;
        tracing::debug!("created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Get the transactions matching `filter`, most recent first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let connection = lock_connection(&self.db_connection)?;

        select_transactions(filter, &connection)
    }

    /// Get a single transaction.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a transaction, or
    /// an [Error::SqlError] if there is some other SQL error.
    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = lock_connection(&self.db_connection)?;

        select_transaction(id, &connection)
    }

    /// Replace the amount, type, category, description and date of a
    /// transaction and return the stored result.
    ///
    /// Unlike [TransactionService::create_transaction], the amount and the
    /// category are accepted as given.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransactionType] if the type is not "income" or "expense",
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn update_transaction(
        &self,
        id: TransactionId,
        data: TransactionData,
    ) -> Result<Transaction, Error> {
        let fields = parse_fields(data)?;

        let connection = lock_connection(&self.db_connection)?;
        update_transaction(id, &fields, &connection)?;
        tracing::debug!("updated transaction {id}");

        select_transaction(id, &connection)
    }

    /// Delete a transaction.
    ///
    /// # Errors
    /// Returns an [Error::DeleteMissingTransaction] if `id` does not refer to a
    /// transaction, or an [Error::SqlError] if there is some other SQL error.
    pub fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let connection = lock_connection(&self.db_connection)?;
        delete_transaction(id, &connection)?;
        tracing::debug!("deleted transaction {id}");

        Ok(())
    }

    /// Get the income and expense totals for every month that has
    /// transactions, latest month first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn monthly_report(&self) -> Result<Vec<MonthlyReport>, Error> {
        let connection = lock_connection(&self.db_connection)?;

        select_monthly_totals(&connection)
    }
}

fn parse_fields(data: TransactionData) -> Result<TransactionFields, Error> {
    let transaction_type: TransactionType = data.transaction_type.parse()?;

    Ok(TransactionFields {
        amount: data.amount,
        transaction_type,
        category: data.category,
        description: data.description.unwrap_or_default(),
        date: data.date,
    })
}
