//! Route handlers for transactions.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::TransactionId,
    extract::{JsonBody, PathParams, QueryParams},
    transaction::{TransactionData, TransactionFilter, TransactionQuery, TransactionService},
};

/// A route handler for creating a transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint(
    State(service): State<TransactionService>,
    JsonBody(data): JsonBody<TransactionData>,
) -> Result<Response, Error> {
    let transaction = service.create_transaction(data)?;

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}

/// A route handler for listing transactions, optionally filtered by type,
/// category and an inclusive date range.
pub async fn list_transactions_endpoint(
    State(service): State<TransactionService>,
    QueryParams(query): QueryParams<TransactionQuery>,
) -> Result<Response, Error> {
    let filter = TransactionFilter::try_from(query)?;
    let transactions = service.list_transactions(&filter)?;

    Ok(Json(transactions).into_response())
}

/// A route handler for getting a single transaction.
pub async fn get_transaction_endpoint(
    State(service): State<TransactionService>,
    PathParams(transaction_id): PathParams<TransactionId>,
) -> Result<Response, Error> {
    let transaction = service.get_transaction(transaction_id)?;

    Ok(Json(transaction).into_response())
}

/// A route handler for replacing a transaction, responds with the updated transaction.
pub async fn update_transaction_endpoint(
    State(service): State<TransactionService>,
    PathParams(transaction_id): PathParams<TransactionId>,
    JsonBody(data): JsonBody<TransactionData>,
) -> Result<Response, Error> {
    let transaction = service.update_transaction(transaction_id, data)?;

    Ok(Json(transaction).into_response())
}

/// A route handler for deleting a transaction, responds with no content.
pub async fn delete_transaction_endpoint(
    State(service): State<TransactionService>,
    PathParams(transaction_id): PathParams<TransactionId>,
) -> Result<Response, Error> {
    service.delete_transaction(transaction_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// A route handler for the income and expense totals of each month.
pub async fn get_monthly_report_endpoint(
    State(service): State<TransactionService>,
) -> Result<Response, Error> {
    let report = service.monthly_report()?;

    Ok(Json(report).into_response())
}
