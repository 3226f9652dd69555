// ============================================================================
// PostgreSQL-backed tests
// ============================================================================
//
// These recreate the schema in the database named by TEST_DATABASE_URL, so
// they are ignored by default and take SCHEMA_LOCK to run one at a time.
// Run with:
//
//   TEST_DATABASE_URL=postgres://... cargo test -- --ignored
//
// ============================================================================

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{queries, seed, Executor, PgExecutor};
use crate::config::SeedConfig;
use crate::metrics::Metrics;
use crate::models::{
    CategorySales, CustomerContact, CustomerSummary, OrderLineRow, OrderSummary, ProductMatch,
    ProductOrderCount, UniqueCustomer,
};

/// Every test here drops and recreates the same schema
static SCHEMA_LOCK: Mutex<()> = Mutex::const_new(());

async fn connect() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    PgPool::connect(&url).await.unwrap()
}

/// 2 categories, 2 customers, 3 products (10.00, 5.00, 7.50), and two orders:
/// order 1 completed (product1 x2, product2 x1), order 2 pending (product1 x1).
/// Product 3 is never ordered and customer 2 has no orders.
async fn load_fixture(pool: &PgPool) {
    seed::apply_schema(pool).await.unwrap();

    sqlx::raw_sql(
        "INSERT INTO categories (id, name, description) VALUES
             (1, 'Electronics', 'Devices'), (2, 'Books', 'Reading');
         INSERT INTO customers (id, name, email, created_at) VALUES
             (1, 'Alice Example', 'Alice@Example.com', '2024-01-01T00:00:00Z'),
             (2, 'Bob Example', 'bob@example.com', '2024-02-01T00:00:00Z');
         INSERT INTO products (id, name, description, price, stock_quantity, category_id) VALUES
             (1, 'Desk Lamp', 'Bright LAMP', 10.00, 5, 1),
             (2, 'Cable', 'USB cable', 5.00, 50, 1),
             (3, 'Novel', 'Paperback', 7.50, 3, 2);
         INSERT INTO orders (id, customer_id, total_amount, status, created_at) VALUES
             (1, 1, 25.00, 'completed', '2024-03-01T00:00:00Z'),
             (2, 1, 10.00, 'pending', '2024-03-02T00:00:00Z');
         INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES
             (1, 1, 2, 10.00), (1, 2, 1, 5.00), (2, 1, 1, 10.00);",
    )
    .execute(pool)
    .await
    .unwrap();
}

fn executor(pool: &PgPool) -> PgExecutor {
    PgExecutor::new(pool.clone(), Arc::new(Metrics::new().unwrap()))
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_endpoint_statements_against_fixture() {
    let _schema = SCHEMA_LOCK.lock().await;
    let pool = connect().await;
    load_fixture(&pool).await;
    let executor = executor(&pool);

    // Sales by category: completed orders only, 10.00 x 2 + 5.00 x 1
    let sales: Vec<CategorySales> = executor.fetch_all(queries::sales_by_category()).await.unwrap();
    assert_eq!(
        sales,
        vec![CategorySales {
            category: "Electronics".to_string(),
            total_sales: Decimal::new(2500, 2),
        }]
    );
    assert_eq!(serde_json::to_string(&sales).unwrap(), r#"[{"category":"Electronics","total_sales":"25.00"}]"#);

    // Order details: one row per item, joined fields intact
    let lines: Vec<OrderLineRow> = executor.fetch_all(queries::order_details_by_id(1)).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_name, "Desk Lamp");
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].product_name, "Cable");
    assert!(lines.iter().all(|l| l.customer_name == "Alice Example"));

    let none: Vec<OrderLineRow> = executor.fetch_all(queries::order_details_by_id(999)).await.unwrap();
    assert!(none.is_empty());

    // Case-insensitive searches
    let upper: Vec<CustomerContact> = executor
        .fetch_all(queries::search_customers_by_email("ALICE"))
        .await
        .unwrap();
    let lower: Vec<CustomerContact> = executor
        .fetch_all(queries::search_customers_by_email("alice"))
        .await
        .unwrap();
    assert_eq!(upper.len(), 1);
    assert_eq!(upper, lower);

    let missing: Vec<CustomerContact> = executor
        .fetch_all(queries::search_customers_by_email("nobody"))
        .await
        .unwrap();
    assert!(missing.is_empty());

    let lamps: Vec<ProductMatch> = executor.fetch_all(queries::search_products("lamp")).await.unwrap();
    assert_eq!(lamps.len(), 1);
    assert_eq!(lamps[0].id, 1);

    // Customers list: newest first, bounded by limit
    let page: Vec<CustomerSummary> = executor.fetch_all(queries::list_customers(1, 0)).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 2);
    let all: Vec<CustomerSummary> = executor.fetch_all(queries::list_customers(100, 0)).await.unwrap();
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // Products with order counts include never-ordered products
    let counts: Vec<ProductOrderCount> = executor
        .fetch_all(queries::products_with_order_counts())
        .await
        .unwrap();
    let pairs: Vec<(i32, i64)> = counts.iter().map(|p| (p.id, p.order_count)).collect();
    assert_eq!(pairs, vec![(1, 2), (2, 1), (3, 0)]);

    let with_orders: Vec<CustomerContact> = executor.fetch_all(queries::customers_with_orders()).await.unwrap();
    assert_eq!(with_orders.len(), 1);
    assert_eq!(with_orders[0].id, 1);

    // Latest order per email
    let unique: Vec<UniqueCustomer> = executor.fetch_all(queries::unique_customers()).await.unwrap();
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].last_order_at.to_rfc3339(), "2024-03-02T00:00:00+00:00");

    let recent: Vec<OrderSummary> = executor.fetch_all(queries::recent_orders(10)).await.unwrap();
    let ids: Vec<i32> = recent.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 1]);

    // Idempotence
    let again: Vec<CategorySales> = executor.fetch_all(queries::sales_by_category()).await.unwrap();
    assert_eq!(again, sales);

    pool.close().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_seed_keeps_order_totals_consistent() {
    let _schema = SCHEMA_LOCK.lock().await;
    let pool = connect().await;
    let config = SeedConfig {
        categories: 2,
        customers: 5,
        products: 10,
        orders: 20,
    };

    let summary = seed::seed(&pool, &config).await.unwrap();
    assert_eq!(summary.orders, 20);

    let mismatched: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders o
         WHERE o.total_amount <> (SELECT SUM(quantity * unit_price) FROM order_items WHERE order_id = o.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mismatched, 0);

    pool.close().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_sales_keep_same_named_categories_apart() {
    let _schema = SCHEMA_LOCK.lock().await;
    let pool = connect().await;
    load_fixture(&pool).await;

    sqlx::raw_sql(
        "INSERT INTO categories (id, name, description) VALUES (3, 'Electronics', 'Refurbished');
         INSERT INTO products (id, name, description, price, stock_quantity, category_id) VALUES
             (4, 'Mouse', 'Used mouse', 3.00, 1, 3);
         INSERT INTO orders (id, customer_id, total_amount, status, created_at) VALUES
             (3, 2, 3.00, 'completed', '2024-03-03T00:00:00Z');
         INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES (3, 4, 1, 3.00);",
    )
    .execute(&pool)
    .await
    .unwrap();

    let sales: Vec<CategorySales> = executor(&pool).fetch_all(queries::sales_by_category()).await.unwrap();
    assert_eq!(
        sales,
        vec![
            CategorySales {
                category: "Electronics".to_string(),
                total_sales: Decimal::new(2500, 2),
            },
            CategorySales {
                category: "Electronics".to_string(),
                total_sales: Decimal::new(300, 2),
            },
        ]
    );

    pool.close().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_matches_non_ascii_text_as_stored() {
    let _schema = SCHEMA_LOCK.lock().await;
    let pool = connect().await;
    load_fixture(&pool).await;

    sqlx::raw_sql(
        "INSERT INTO customers (id, name, email, created_at) VALUES
             (3, 'Élise Example', 'ÉLISE@example.com', '2024-02-15T00:00:00Z');
         INSERT INTO products (id, name, description, price, stock_quantity, category_id) VALUES
             (4, 'CAFÉ Mug', 'Stoneware', 8.00, 4, 1);",
    )
    .execute(&pool)
    .await
    .unwrap();
    let executor = executor(&pool);

    for term in ["ÉLISE", "LISE", "lise"] {
        let found: Vec<CustomerContact> = executor
            .fetch_all(queries::search_customers_by_email(term))
            .await
            .unwrap();
        let ids: Vec<i32> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3], "search {:?}", term);
    }

    let mugs: Vec<ProductMatch> = executor.fetch_all(queries::search_products("CAFÉ")).await.unwrap();
    assert_eq!(mugs.len(), 1);
    assert_eq!(mugs[0].id, 4);

    pool.close().await;
}
