//! Application router configuration.

use axum::{
    Router,
    http::{HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    AppState, Error,
    category::{create_category_endpoint, list_categories_endpoint},
    endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_monthly_report_endpoint,
        get_transaction_endpoint, list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are accepted from `allowed_origin`, or from any
/// origin if it is `None`.
pub fn build_router(state: AppState, allowed_origin: Option<HeaderValue>) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report_endpoint))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(cors_layer(allowed_origin))
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let allow_origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Method, StatusCode, header};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        AppState, Category, MonthlyReport, Transaction, TransactionType,
        endpoints::{self, format_endpoint},
    };

    use super::build_router;

    fn get_test_server(allowed_origin: Option<HeaderValue>) -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");
        for (name, category_type) in [
            ("Salary", "income"),
            ("Freelance", "income"),
            ("Groceries", "expense"),
            ("Rent", "expense"),
        ] {
            state
                .category_service
                .create_category(name, category_type)
                .expect("Could not create test category");
        }

        TestServer::try_new(build_router(state, allowed_origin))
            .expect("Could not create test server.")
    }

    async fn create_transaction(
        server: &TestServer,
        amount: f64,
        transaction_type: &str,
        category: &str,
        date: &str,
    ) -> Transaction {
        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": amount,
                "type": transaction_type,
                "category": category,
                "description": "test transaction",
                "date": date,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.json::<Transaction>()
    }

    async fn list_transactions(server: &TestServer, query: &str) -> Vec<Transaction> {
        let response = server
            .get(&format!("{}{query}", endpoints::TRANSACTIONS))
            .await;

        response.assert_status_ok();
        response.json::<Vec<Transaction>>()
    }

    #[tokio::test]
    async fn create_transaction_echoes_fields() {
        let server = get_test_server(None);

        let transaction =
            create_transaction(&server, 42.5, "expense", "Groceries", "2024-01-15").await;

        assert!(transaction.id > 0);
        assert_eq!(transaction.amount, 42.5);
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.category, "Groceries");
        assert_eq!(transaction.description, "test transaction");
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
    }

    #[tokio::test]
    async fn create_transaction_accepts_date_time() {
        let server = get_test_server(None);

        let transaction =
            create_transaction(&server, 10.0, "income", "Salary", "2024-03-05T09:15:00Z").await;

        assert_eq!(transaction.date, date!(2024 - 03 - 05));
    }

    #[tokio::test]
    async fn create_transaction_without_description() {
        let server = get_test_server(None);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 5,
                "type": "expense",
                "category": "Rent",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Transaction>().description, "");
    }

    #[tokio::test]
    async fn create_transaction_with_non_positive_amount_fails() {
        let server = get_test_server(None);

        for amount in [0.0, -10.0] {
            let response = server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({
                    "amount": amount,
                    "type": "expense",
                    "category": "Groceries",
                    "date": "2024-01-15",
                }))
                .await;

            response.assert_status_bad_request();
        }

        assert!(list_transactions(&server, "").await.is_empty());
    }

    #[tokio::test]
    async fn create_transaction_with_unknown_category_fails() {
        let server = get_test_server(None);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 100,
                "type": "income",
                "category": "Groceries",
                "date": "2024-01-15",
            }))
            .await;

        response.assert_status_bad_request();
        assert!(list_transactions(&server, "").await.is_empty());
    }

    #[tokio::test]
    async fn create_transaction_with_invalid_type_fails() {
        let server = get_test_server(None);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 100,
                "type": "transfer",
                "category": "Salary",
                "date": "2024-01-15",
            }))
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("transfer"));
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let server = get_test_server(None);

        let bodies = [
            json!({ "type": "income", "category": "Salary", "date": "2024-01-15" }),
            json!({ "amount": "lots", "type": "income", "category": "Salary", "date": "2024-01-15" }),
            json!({ "amount": 1, "type": "income", "category": "Salary", "date": "15/01/2024" }),
        ];

        for body in bodies {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&body)
                .await
                .assert_status_bad_request();
        }

        server
            .post(endpoints::TRANSACTIONS)
            .text("not json")
            .content_type("application/json")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn negative_year_is_bad_request() {
        let server = get_test_server(None);

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 5,
                "type": "expense",
                "category": "Rent",
                "date": "-0001-06-01",
            }))
            .await
            .assert_status_bad_request();
        server
            .get(&format!("{}?start_date=-0001-06-01", endpoints::TRANSACTIONS))
            .await
            .assert_status_bad_request();

        assert!(list_transactions(&server, "").await.is_empty());
        server
            .get(endpoints::MONTHLY_REPORT)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn list_filters_by_type_and_orders_by_date() {
        let server = get_test_server(None);
        create_transaction(&server, 100.0, "income", "Salary", "2024-01-10").await;
        create_transaction(&server, 50.0, "income", "Freelance", "2024-01-20").await;
        create_transaction(&server, 30.0, "expense", "Groceries", "2024-01-15").await;

        let transactions = list_transactions(&server, "?type=income").await;

        assert_eq!(transactions.len(), 2);
        assert!(
            transactions
                .iter()
                .all(|transaction| transaction.transaction_type == TransactionType::Income)
        );
        assert_eq!(transactions[0].date, date!(2024 - 01 - 20));
        assert_eq!(transactions[1].date, date!(2024 - 01 - 10));
    }

    #[tokio::test]
    async fn list_filters_by_inclusive_date_range() {
        let server = get_test_server(None);
        for date in ["2023-12-31", "2024-01-01", "2024-01-31", "2024-02-01"] {
            create_transaction(&server, 10.0, "expense", "Rent", date).await;
        }

        let transactions =
            list_transactions(&server, "?start_date=2024-01-01&end_date=2024-01-31").await;

        let dates: Vec<_> = transactions.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date!(2024 - 01 - 31), date!(2024 - 01 - 01)]);
    }

    #[tokio::test]
    async fn list_filters_by_category_and_ignores_empty_values() {
        let server = get_test_server(None);
        create_transaction(&server, 10.0, "expense", "Rent", "2024-01-01").await;
        create_transaction(&server, 20.0, "expense", "Groceries", "2024-01-02").await;

        let transactions = list_transactions(&server, "?category=Rent&type=&start_date=").await;

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category, "Rent");
    }

    #[tokio::test]
    async fn list_with_invalid_filter_fails() {
        let server = get_test_server(None);

        server
            .get(&format!("{}?type=savings", endpoints::TRANSACTIONS))
            .await
            .assert_status_bad_request();
        server
            .get(&format!("{}?start_date=january", endpoints::TRANSACTIONS))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn get_transaction_by_id() {
        let server = get_test_server(None);
        let created = create_transaction(&server, 10.0, "expense", "Rent", "2024-01-01").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, created.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Transaction>(), created);
    }

    #[tokio::test]
    async fn get_missing_transaction_is_not_found() {
        let server = get_test_server(None);

        server
            .get(&format_endpoint(endpoints::TRANSACTION, 999))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let server = get_test_server(None);

        server
            .get(&format!("{}/abc", endpoints::TRANSACTIONS))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn update_transaction_is_visible_on_get() {
        let server = get_test_server(None);
        let created = create_transaction(&server, 10.0, "expense", "Rent", "2024-01-01").await;
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server
            .put(&path)
            .json(&json!({
                "amount": 75.25,
                "type": "expense",
                "category": "Rent",
                "description": "updated",
                "date": "2024-02-01",
            }))
            .await;

        response.assert_status_ok();
        let got = server.get(&path).await.json::<Transaction>();
        assert_eq!(got.amount, 75.25);
        assert_eq!(got.date, date!(2024 - 02 - 01));
        assert_eq!(got.description, "updated");
        assert_eq!(got.created_at, created.created_at);
        assert_eq!(response.json::<Transaction>(), got);
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let server = get_test_server(None);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&json!({
                "amount": 1,
                "type": "expense",
                "category": "Rent",
                "date": "2024-02-01",
            }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_transaction_then_get_is_not_found() {
        let server = get_test_server(None);
        let created = create_transaction(&server, 10.0, "expense", "Rent", "2024-01-01").await;
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server.delete(&path).await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());
        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = get_test_server(None);

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, 999))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn monthly_report_totals_income_and_expenses() {
        let server = get_test_server(None);
        create_transaction(&server, 100.0, "income", "Salary", "2024-01-05").await;
        create_transaction(&server, 40.0, "expense", "Groceries", "2024-01-20").await;

        let response = server.get(endpoints::MONTHLY_REPORT).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<MonthlyReport>>(),
            vec![MonthlyReport {
                month: "2024-01".to_owned(),
                total_income: 100.0,
                total_expenses: 40.0,
                net_amount: 60.0,
            }]
        );
    }

    #[tokio::test]
    async fn monthly_report_is_empty_without_transactions() {
        let server = get_test_server(None);

        let response = server.get(endpoints::MONTHLY_REPORT).await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn create_and_list_categories() {
        let server = get_test_server(None);

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "Utilities", "type": "expense" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Category>();
        assert_eq!(created.name.as_ref(), "Utilities");
        assert_eq!(created.category_type, TransactionType::Expense);

        let categories = server
            .get(endpoints::CATEGORIES)
            .await
            .json::<Vec<Category>>();
        assert_eq!(categories.len(), 5);
        assert!(categories.contains(&created));
    }

    #[tokio::test]
    async fn duplicate_category_is_conflict() {
        let server = get_test_server(None);

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "Salary", "type": "income" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let salary_count = server
            .get(endpoints::CATEGORIES)
            .await
            .json::<Vec<Category>>()
            .iter()
            .filter(|category| category.name.as_ref() == "Salary")
            .count();
        assert_eq!(salary_count, 1);
    }

    #[tokio::test]
    async fn category_with_invalid_type_or_empty_name_fails() {
        let server = get_test_server(None);

        for body in [
            json!({ "name": "Gifts", "type": "other" }),
            json!({ "name": "  ", "type": "income" }),
            json!({ "name": "Gifts" }),
        ] {
            server
                .post(endpoints::CATEGORIES)
                .json(&body)
                .await
                .assert_status_bad_request();
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server(None);

        server.get("/budgets").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_by_default() {
        let server = get_test_server(None);

        let response = server
            .method(Method::OPTIONS, endpoints::TRANSACTIONS)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:5173"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("missing allow origin header"),
            "*"
        );
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let origin = HeaderValue::from_static("http://localhost:5173");
        let server = get_test_server(Some(origin.clone()));

        let response = server
            .get(endpoints::CATEGORIES)
            .add_header(header::ORIGIN, origin.clone())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("missing allow origin header"),
            &origin
        );
    }
}
