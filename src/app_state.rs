//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, category::CategoryService, db::initialize, transaction::TransactionService};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Creates and lists categories.
    pub category_service: CategoryService,

    /// Records, queries and summarises transactions.
    pub transaction_service: TransactionService,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// The connection is shared by all services.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            category_service: CategoryService::new(connection.clone()),
            transaction_service: TransactionService::new(connection),
        })
    }
}
