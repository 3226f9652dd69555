use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use super::error::ApiError;
use super::params::{
    parse_order_id, EmailSearchQuery, PageQuery, ProductSearchQuery, RecentOrdersQuery,
};
use crate::db::{queries, Executor};
use crate::metrics::Metrics;
use crate::models::{
    CategorySales, CustomerContact, CustomerSummary, OrderDetailRow, OrderLineRow, OrderSummary,
    ProductMatch, ProductOrderCount, UniqueCustomer,
};

// ============================================================================
// Route Handlers
// ============================================================================
//
// Each handler: check parameters -> build one statement -> run it -> JSON.
// Validation happens before any statement is built, so a rejected request
// never reaches the database.
//
// ============================================================================

/// Shared per-app state: the executor and the metrics registry
pub struct AppState<E: Executor> {
    pub executor: E,
    pub metrics: Arc<Metrics>,
}

impl<E: Executor> AppState<E> {
    pub fn new(executor: E, metrics: Arc<Metrics>) -> Self {
        Self { executor, metrics }
    }

    /// Run a handler body and count the response status it produced
    async fn observe<F>(&self, route: &'static str, body: F) -> Result<HttpResponse, ApiError>
    where
        F: Future<Output = Result<HttpResponse, ApiError>>,
    {
        let result = body.await;
        let status = match &result {
            Ok(response) => response.status(),
            Err(err) => err.status_code(),
        };
        self.metrics.record_response(route, status.as_u16());
        result
    }
}

fn json_rows<T: Serialize>(rows: Vec<T>) -> HttpResponse {
    HttpResponse::Ok().json(rows)
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Database Optimization Lab API"
    }))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// GET /customers?page&limit
///
/// No total count or has-more flag is returned; clients page until a short page.
pub async fn list_customers<E: Executor>(
    state: web::Data<AppState<E>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/customers", async {
            let page = query.validate();
            let rows: Vec<CustomerSummary> = state
                .executor
                .fetch_all(queries::list_customers(page.limit, page.offset()))
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /customers/search?email
pub async fn search_customers<E: Executor>(
    state: web::Data<AppState<E>>,
    query: web::Query<EmailSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/customers/search", async {
            let email = query.validate()?;
            let rows: Vec<CustomerContact> = state
                .executor
                .fetch_all(queries::search_customers_by_email(email))
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /orders/details
pub async fn all_order_details<E: Executor>(
    state: web::Data<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/orders/details", async {
            let rows: Vec<OrderDetailRow> = state
                .executor
                .fetch_all(queries::order_details_all())
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /orders/{id}/details
///
/// One row per order item; an unknown id yields `[]`.
pub async fn order_details<E: Executor>(
    state: web::Data<AppState<E>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/orders/{id}/details", async {
            let order_id = parse_order_id(&path)?;
            let rows: Vec<OrderLineRow> = state
                .executor
                .fetch_all(queries::order_details_by_id(order_id))
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /products/with-orders
pub async fn products_with_orders<E: Executor>(
    state: web::Data<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/products/with-orders", async {
            let rows: Vec<ProductOrderCount> = state
                .executor
                .fetch_all(queries::products_with_order_counts())
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /customers/with-orders
pub async fn customers_with_orders<E: Executor>(
    state: web::Data<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/customers/with-orders", async {
            let rows: Vec<CustomerContact> = state
                .executor
                .fetch_all(queries::customers_with_orders())
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /orders/recent?limit
pub async fn recent_orders<E: Executor>(
    state: web::Data<AppState<E>>,
    query: web::Query<RecentOrdersQuery>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/orders/recent", async {
            let limit = query.validate();
            let rows: Vec<OrderSummary> = state
                .executor
                .fetch_all(queries::recent_orders(limit))
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /products/search?q (or ?term)
pub async fn search_products<E: Executor>(
    state: web::Data<AppState<E>>,
    query: web::Query<ProductSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/products/search", async {
            let term = query.validate()?;
            let rows: Vec<ProductMatch> = state
                .executor
                .fetch_all(queries::search_products(term))
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /sales/by-category
///
/// Only completed orders count towards a category's total.
pub async fn sales_by_category<E: Executor>(
    state: web::Data<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/sales/by-category", async {
            let rows: Vec<CategorySales> = state
                .executor
                .fetch_all(queries::sales_by_category())
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}

/// GET /unique-customers
///
/// One row per customer email, from the customer's most recent order.
pub async fn unique_customers<E: Executor>(
    state: web::Data<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    state
        .observe("/unique-customers", async {
            let rows: Vec<UniqueCustomer> = state
                .executor
                .fetch_all(queries::unique_customers())
                .await?;
            Ok::<_, ApiError>(json_rows(rows))
        })
        .await
}
