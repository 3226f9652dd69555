use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Result Records
// ============================================================================
//
// One record per endpoint projection. Rows are decoded straight into these
// with `sqlx::FromRow`; decimals stay `Decimal` (serialized as strings) and
// timestamps are `TIMESTAMPTZ` columns decoded as `DateTime<Utc>`.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ];
}

/// Row of `GET /customers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomerSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Row of `GET /customers/search` and `GET /customers/with-orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomerContact {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Row of `GET /unique-customers`: one per email, carrying the latest order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UniqueCustomer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub last_order_at: DateTime<Utc>,
}

/// Flattened order item row of `GET /orders/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderDetailRow {
    pub order_id: i32,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product_id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
    pub category_id: i32,
    pub category_name: String,
}

/// Flattened order item row of `GET /orders/{id}/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderLineRow {
    pub order_id: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
    pub customer_name: String,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductOrderCount {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub order_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderSummary {
    pub id: i32,
    pub customer_id: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductMatch {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CategorySales {
    pub category: String,
    pub total_sales: Decimal,
}

/// One line of `EXPLAIN ANALYZE` output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PlanLine {
    #[sqlx(rename = "QUERY PLAN")]
    #[serde(rename = "QUERY PLAN")]
    pub line: String,
}

// ============================================================================
// Unit Tests
// ============================================================================
