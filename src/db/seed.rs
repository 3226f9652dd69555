use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::config::SeedConfig;
use crate::models::OrderStatus;

// ============================================================================
// Seeder
// ============================================================================
//
// Offline only. Recreates the schema, then inserts synthetic categories,
// customers, products and orders. Each order and its items are written in
// one transaction, with total_amount set to the sum of its items.
//
// ============================================================================

pub const SCHEMA: &str = include_str!("../../migrations/schema.sql");

const CATEGORY_NAMES: [(&str, &str); 5] = [
    ("Electronics", "Electronic devices and accessories"),
    ("Clothing", "Apparel and fashion items"),
    ("Books", "Books and literature"),
    ("Home", "Home and kitchen items"),
    ("Sports", "Sports equipment and accessories"),
];

const MAX_ITEMS_PER_ORDER: usize = 5;
const MAX_ITEM_QUANTITY: i32 = 5;
const HISTORY_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
}

/// Drop and recreate every table
pub async fn apply_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("applying schema")?;
    tracing::info!("Schema created successfully");
    Ok(())
}

pub async fn seed(pool: &PgPool, config: &SeedConfig) -> Result<SeedSummary> {
    if config.categories == 0 || config.customers == 0 || config.products == 0 {
        bail!("categories, customers and products must each be at least 1");
    }

    let mut rng = StdRng::from_entropy();
    let mut summary = SeedSummary::default();

    apply_schema(pool).await?;

    let mut category_ids = Vec::with_capacity(config.categories);
    for i in 0..config.categories {
        let (name, description) = category_fixture(i);
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;
        category_ids.push(id);
    }
    summary.categories = category_ids.len();
    tracing::info!(count = summary.categories, "Categories inserted");

    let mut customer_ids = Vec::with_capacity(config.customers);
    for i in 1..=config.customers {
        let created_at = Utc::now() - Duration::minutes(rng.gen_range(0..HISTORY_MINUTES));
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO customers (name, email, address, phone, created_at)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(format!("Customer {}", i))
        .bind(format!("customer{}@example.com", i))
        .bind(format!("Address for customer {}", i))
        .bind(format!("+1-555-{:04}", i % 10_000))
        .bind(created_at)
        .fetch_one(pool)
        .await?;
        customer_ids.push(id);
    }
    summary.customers = customer_ids.len();
    tracing::info!(count = summary.customers, "Customers inserted");

    let mut products = Vec::with_capacity(config.products);
    for i in 1..=config.products {
        let price = Decimal::new(rng.gen_range(100..=100_000), 2);
        let category_id = category_ids[rng.gen_range(0..category_ids.len())];
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO products (name, description, price, stock_quantity, category_id)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(format!("Product {}", i))
        .bind(format!("Description for product {}", i))
        .bind(price)
        .bind(rng.gen_range(0..100_i32))
        .bind(category_id)
        .fetch_one(pool)
        .await?;
        products.push((id, price));
    }
    summary.products = products.len();
    tracing::info!(count = summary.products, "Products inserted");

    for i in 1..=config.orders {
        let customer_id = customer_ids[rng.gen_range(0..customer_ids.len())];
        let status = OrderStatus::ALL[rng.gen_range(0..OrderStatus::ALL.len())];
        let created_at = Utc::now() - Duration::minutes(rng.gen_range(0..HISTORY_MINUTES));

        let mut tx = pool.begin().await?;
        let order_id: i32 = sqlx::query_scalar(
            "INSERT INTO orders (customer_id, total_amount, status, created_at)
             VALUES ($1, 0, $2, $3) RETURNING id",
        )
        .bind(customer_id)
        .bind(status)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        let item_count = rng.gen_range(1..=MAX_ITEMS_PER_ORDER);
        let mut total = Decimal::ZERO;
        for _ in 0..item_count {
            let (product_id, unit_price) = products[rng.gen_range(0..products.len())];
            let quantity = rng.gen_range(1..=MAX_ITEM_QUANTITY);

            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order_id)
            .bind(product_id)
            .bind(quantity)
            .bind(unit_price)
            .execute(&mut *tx)
            .await?;

            total += unit_price * Decimal::from(quantity);
        }

        sqlx::query("UPDATE orders SET total_amount = $1 WHERE id = $2")
            .bind(total)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        summary.orders += 1;
        summary.order_items += item_count;
        if i % 100 == 0 {
            tracing::info!(processed = i, total = config.orders, "Orders processed");
        }
    }
    tracing::info!(
        orders = summary.orders,
        order_items = summary.order_items,
        "Orders and order items inserted"
    );

    Ok(summary)
}

/// Name and description for the i-th category; past the fixed list, names are numbered
fn category_fixture(index: usize) -> (String, String) {
    match CATEGORY_NAMES.get(index) {
        Some((name, description)) => (name.to_string(), description.to_string()),
        None => (
            format!("Category {}", index + 1),
            format!("Description for category {}", index + 1),
        ),
    }
}
