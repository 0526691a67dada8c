//! A JSON API for tracking personal income and expenses.
//!
//! Transactions are recorded against user-defined categories, each scoped to
//! either income or expenses, and can be listed with filters or summarised
//! into monthly totals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod calendar_date;
mod category;
mod config;
mod database_id;
mod db;
mod endpoints;
mod extract;
mod logging;
mod routing;
mod transaction;
mod transaction_type;

pub use app_state::AppState;
pub use category::{Category, CategoryName, CategoryService};
pub use config::Config;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{MonthlyReport, Transaction, TransactionService};
pub use transaction_type::TransactionType;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction or category type other than "income" or "expense" was given.
    #[error("invalid transaction type \"{0}\", expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A transaction was created with an amount of zero or less.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The category used to create a transaction does not exist for the
    /// transaction's type.
    #[error("invalid category for the transaction type: no {1} category named \"{0}\"")]
    InvalidCategory(String, TransactionType),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A date was not formatted as `YYYY-MM-DD` or an RFC 3339 date-time.
    #[error("invalid date \"{0}\", expected a date formatted as YYYY-MM-DD")]
    InvalidDate(String),

    /// The request path, query string or JSON body could not be parsed.
    ///
    /// Holds the description of the rejection produced by axum.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body is larger than the given number of bytes.
    #[error("request body is larger than {0} bytes")]
    PayloadTooLarge(usize),

    /// A category with the same name and type already exists.
    #[error("the {1} category \"{0}\" already exists")]
    DuplicateCategory(String, TransactionType),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code that the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidTransactionType(_)
            | Error::NonPositiveAmount(_)
            | Error::InvalidCategory(_, _)
            | Error::EmptyCategoryName
            | Error::InvalidDate(_)
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::DuplicateCategory(_, _) => StatusCode::CONFLICT,
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status_code, self.to_string()).into_response()
    }
}
