//! Categories that transactions are filed under.

mod db;
mod domain;
mod handlers;
mod service;

pub use db::{category_exists, create_category_table};
pub use domain::{Category, CategoryData, CategoryName};
pub use handlers::{create_category_endpoint, list_categories_endpoint};
pub use service::CategoryService;

#[cfg(test)]
pub use db::insert_category;
