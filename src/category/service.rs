//! Validation and persistence of categories.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        Category, CategoryName,
        db::{insert_category, select_all_categories},
    },
    db::lock_connection,
    transaction_type::TransactionType,
};

/// Lists and creates categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryService {
    fn from_ref(state: &AppState) -> Self {
        state.category_service.clone()
    }
}

impl CategoryService {
    /// Create a category service that uses the shared `db_connection`.
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }

    /// Get every category, ordered by type and then by name.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the query fails.
    pub fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let connection = lock_connection(&self.db_connection)?;

        select_all_categories(&connection)
    }

    /// Create a category.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransactionType] if `category_type` is not "income" or "expense",
    /// - [Error::EmptyCategoryName] if `name` is blank,
    /// - [Error::DuplicateCategory] if the name is already used for the type,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn create_category(&self, name: &str, category_type: &str) -> Result<Category, Error> {
        let category_type: TransactionType = category_type.parse()?;
        let name = CategoryName::new(name)?;

        let connection = lock_connection(&self.db_connection)?;
        let category = insert_category(name, category_type, &connection)?;

        tracing::debug!(
            "created {} category \"{}\" with ID {}",
            category.category_type,
            category.name,
            category.id
        );

        Ok(category)
    }
}
