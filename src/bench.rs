use std::time::{Duration, Instant};

use crate::db::{queries, Executor, Record, Statement};
use crate::models::{
    CategorySales, CustomerContact, CustomerSummary, OrderDetailRow, OrderLineRow, OrderSummary,
    PlanLine, ProductMatch, ProductOrderCount, UniqueCustomer,
};

// ============================================================================
// Query Timing
// ============================================================================
//
// Runs every endpoint statement with representative parameters: first under
// EXPLAIN ANALYZE (plan lines are logged), then for real with wall-clock
// timing. A failing statement is logged and the run moves on.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Measurement {
    pub label: &'static str,
    pub rows: usize,
    pub elapsed: Duration,
}

pub async fn run<E: Executor>(executor: &E) -> Vec<Measurement> {
    tracing::info!("Running query timing for endpoint statements");

    let results = vec![
        measure::<CustomerSummary, _>(executor, "Customers, first page", queries::list_customers(20, 0)).await,
        measure::<CustomerContact, _>(
            executor,
            "Customer search by email",
            queries::search_customers_by_email("customer500@example.com"),
        )
        .await,
        measure::<OrderDetailRow, _>(executor, "Order details, all orders", queries::order_details_all()).await,
        measure::<OrderLineRow, _>(executor, "Order details, one order", queries::order_details_by_id(1)).await,
        measure::<ProductOrderCount, _>(
            executor,
            "Products with order counts",
            queries::products_with_order_counts(),
        )
        .await,
        measure::<CustomerContact, _>(executor, "Customers with orders", queries::customers_with_orders()).await,
        measure::<OrderSummary, _>(executor, "Recent orders", queries::recent_orders(10)).await,
        measure::<ProductMatch, _>(executor, "Product search", queries::search_products("Product 1")).await,
        measure::<CategorySales, _>(executor, "Sales by category", queries::sales_by_category()).await,
        measure::<UniqueCustomer, _>(executor, "Unique customers", queries::unique_customers()).await,
    ];

    let measurements: Vec<Measurement> = results.into_iter().flatten().collect();
    for m in &measurements {
        tracing::info!(
            label = m.label,
            rows = m.rows,
            elapsed_ms = %format!("{:.2}", m.elapsed.as_secs_f64() * 1000.0),
            "Timing summary"
        );
    }
    measurements
}

async fn measure<T: Record, E: Executor>(
    executor: &E,
    label: &'static str,
    statement: Statement,
) -> Option<Measurement> {
    tracing::info!(label, statement = statement.name, "--- Testing query ---");

    match executor.fetch_all::<PlanLine>(statement.explain_analyze()).await {
        Ok(plan) => {
            for line in plan {
                tracing::info!(label, "{}", line.line);
            }
        }
        Err(e) => tracing::error!(label, error = %e, "Error running EXPLAIN ANALYZE"),
    }

    let start = Instant::now();
    match executor.fetch_all::<T>(statement).await {
        Ok(rows) => {
            let elapsed = start.elapsed();
            tracing::info!(
                label,
                rows = rows.len(),
                elapsed_ms = %format!("{:.2}", elapsed.as_secs_f64() * 1000.0),
                "Execution time"
            );
            Some(Measurement {
                label,
                rows: rows.len(),
                elapsed,
            })
        }
        Err(e) => {
            tracing::error!(label, error = %e, "Error measuring query performance");
            None
        }
    }
}
