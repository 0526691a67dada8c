//! Route handlers for categories.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    Error,
    category::{CategoryData, CategoryService},
    extract::JsonBody,
};

/// A route handler for listing all categories.
pub async fn list_categories_endpoint(
    State(service): State<CategoryService>,
) -> Result<impl IntoResponse, Error> {
    let categories = service.list_categories()?;

    Ok(Json(categories))
}

/// A route handler for creating a category, responds with the new category.
pub async fn create_category_endpoint(
    State(service): State<CategoryService>,
    JsonBody(data): JsonBody<CategoryData>,
) -> Result<impl IntoResponse, Error> {
    let category = service.create_category(&data.name, &data.category_type)?;

    Ok((StatusCode::CREATED, Json(category)))
}
