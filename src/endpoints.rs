//! The API endpoints URIs.

/// The route for creating and listing transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for reading, updating and deleting a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for the income and expense totals of each month.
pub const MONTHLY_REPORT: &str = "/transactions/monthly";
/// The route for creating and listing categories.
pub const CATEGORIES: &str = "/categories";

/// Replace the parameter in `endpoint_path`, e.g. '{transaction_id}', with `id`.
///
/// If no parameter is found in `endpoint_path`, it is returned unchanged.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: crate::database_id::DatabaseId) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) => format!(
            "{}{}{}",
            &endpoint_path[..start],
            id,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}
