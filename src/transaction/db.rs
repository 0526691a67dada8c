//! Database operations for transactions.

use rusqlite::{Connection, Row, ToSql, params};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{MonthlyReport, Transaction, TransactionFields, TransactionFilter},
};

const TRANSACTION_COLUMNS: &str = "id, amount, type, category, description, date, created_at";

/// Insert a transaction recorded at `created_at` and return the stored row.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn insert_transaction(
    fields: &TransactionFields,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO transactions (amount, type, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                fields.amount,
                fields.transaction_type,
                fields.category,
                fields.description,
                fields.date,
                created_at,
            ],
            map_transaction_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a transaction by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn select_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(|error| error.into())
}

/// Retrieve the transactions matching `filter`, most recent date first.
///
/// Transactions on the same date are ordered by decreasing ID so that the
/// order is stable.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn select_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut conditions = Vec::new();
    let mut parameters: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let Some(transaction_type) = &filter.transaction_type {
        conditions.push("type = :type");
        parameters.push((":type", transaction_type as &dyn ToSql));
    }

    if let Some(category) = &filter.category {
        conditions.push("category = :category");
        parameters.push((":category", category as &dyn ToSql));
    }

    if let Some(start_date) = &filter.start_date {
        conditions.push("date >= :start_date");
        parameters.push((":start_date", start_date as &dyn ToSql));
    }

    if let Some(end_date) = &filter.end_date {
        conditions.push("date <= :end_date");
        parameters.push((":end_date", end_date as &dyn ToSql));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM transactions {where_clause} ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(parameters.as_slice(), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Replace the mutable fields of the transaction with `id`.
///
/// The creation time is left untouched.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    fields: &TransactionFields,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE transactions
        SET \
            amount = ?1, \
            type = ?2, \
            category = ?3, \
            description = ?4, \
            date = ?5 \
        WHERE id = ?6;",
        params![
            fields.amount,
            fields.transaction_type,
            fields.category,
            fields.description,
            fields.date,
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete the transaction with `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Sum income and expenses per calendar month, latest month first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn select_monthly_totals(connection: &Connection) -> Result<Vec<MonthlyReport>, Error> {
    connection
        .prepare(
            "SELECT strftime('%Y-%m', date) AS month, \
                SUM(CASE WHEN type = 'income' THEN amount ELSE 0.0 END) AS total_income, \
                SUM(CASE WHEN type = 'expense' THEN amount ELSE 0.0 END) AS total_expenses \
            FROM transactions \
            GROUP BY month \
            ORDER BY month DESC",
        )?
        .query_map([], |row| {
            Ok(MonthlyReport::new(row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .map(|maybe_report| maybe_report.map_err(Error::SqlError))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns in the order of `TRANSACTION_COLUMNS`.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let transaction_type = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;
    let date = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        category,
        description,
        date,
        created_at,
    })
}
