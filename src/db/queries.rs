use super::executor::Statement;

// ============================================================================
// Endpoint Statements
// ============================================================================
//
// One builder per endpoint. Every statement carries a total ORDER BY so the
// same parameters over unchanged data always produce the same row order.
//
// ============================================================================

pub const LIST_CUSTOMERS: &str = "SELECT id, name, email, created_at
     FROM customers
     ORDER BY created_at DESC, id DESC
     LIMIT $1 OFFSET $2";

pub const SEARCH_CUSTOMERS_BY_EMAIL: &str = "SELECT id, name, email
     FROM customers
     WHERE LOWER(email) LIKE LOWER($1)
     ORDER BY email, id
     LIMIT 50";

pub const ORDER_DETAILS_ALL: &str = "SELECT o.id AS order_id, o.created_at, o.status,
            c.id AS customer_id, c.name AS customer_name, c.email AS customer_email,
            oi.id AS item_id, oi.quantity, oi.unit_price,
            p.id AS product_id, p.name AS product_name, p.description AS product_description,
            cat.id AS category_id, cat.name AS category_name
     FROM orders o
     JOIN customers c ON c.id = o.customer_id
     JOIN order_items oi ON oi.order_id = o.id
     JOIN products p ON p.id = oi.product_id
     JOIN categories cat ON cat.id = p.category_id
     ORDER BY o.created_at DESC, o.id DESC, oi.id";

pub const ORDER_DETAILS_BY_ID: &str = "SELECT o.id AS order_id, o.total_amount, o.status, o.created_at,
            c.id AS customer_id, c.name AS customer_name,
            oi.product_id, oi.quantity, oi.unit_price,
            p.name AS product_name
     FROM orders o
     JOIN customers c ON c.id = o.customer_id
     JOIN order_items oi ON oi.order_id = o.id
     JOIN products p ON p.id = oi.product_id
     WHERE o.id = $1
     ORDER BY oi.id";

pub const PRODUCTS_WITH_ORDER_COUNTS: &str = "SELECT p.id, p.name, p.price, COUNT(oi.id) AS order_count
     FROM products p
     LEFT JOIN order_items oi ON oi.product_id = p.id
     GROUP BY p.id, p.name, p.price
     ORDER BY p.id";

pub const CUSTOMERS_WITH_ORDERS: &str = "SELECT c.id, c.name, c.email
     FROM customers c
     WHERE EXISTS (SELECT 1 FROM orders o WHERE o.customer_id = c.id)
     ORDER BY c.id";

pub const RECENT_ORDERS: &str = "SELECT id, customer_id, total_amount, status, created_at
     FROM orders
     ORDER BY created_at DESC, id DESC
     LIMIT $1";

pub const SEARCH_PRODUCTS: &str = "SELECT id, name, price, stock_quantity
     FROM products
     WHERE LOWER(name) LIKE LOWER($1)
        OR LOWER(description) LIKE LOWER($1)
     ORDER BY name, id
     LIMIT 50";

pub const SALES_BY_CATEGORY: &str = "SELECT cat.name AS category, SUM(oi.quantity * oi.unit_price) AS total_sales
     FROM order_items oi
     JOIN orders o ON o.id = oi.order_id
     JOIN products p ON p.id = oi.product_id
     JOIN categories cat ON cat.id = p.category_id
     WHERE o.status = 'completed'
     GROUP BY cat.id, cat.name
     ORDER BY total_sales DESC, category, cat.id";

pub const UNIQUE_CUSTOMERS: &str = "SELECT DISTINCT ON (c.email) c.id, c.name, c.email, o.created_at AS last_order_at
     FROM customers c
     JOIN orders o ON o.customer_id = c.id
     ORDER BY c.email, o.created_at DESC, c.id";

pub fn list_customers(limit: i64, offset: i64) -> Statement {
    Statement::new("customers.list", LIST_CUSTOMERS)
        .bind_int(limit)
        .bind_int(offset)
}

pub fn search_customers_by_email(email: &str) -> Statement {
    Statement::new("customers.search", SEARCH_CUSTOMERS_BY_EMAIL).bind_text(contains_pattern(email))
}

pub fn order_details_all() -> Statement {
    Statement::new("orders.details_all", ORDER_DETAILS_ALL)
}

pub fn order_details_by_id(order_id: i32) -> Statement {
    Statement::new("orders.details_by_id", ORDER_DETAILS_BY_ID).bind_int(i64::from(order_id))
}

pub fn products_with_order_counts() -> Statement {
    Statement::new("products.with_orders", PRODUCTS_WITH_ORDER_COUNTS)
}

pub fn customers_with_orders() -> Statement {
    Statement::new("customers.with_orders", CUSTOMERS_WITH_ORDERS)
}

pub fn recent_orders(limit: i64) -> Statement {
    Statement::new("orders.recent", RECENT_ORDERS).bind_int(limit)
}

pub fn search_products(term: &str) -> Statement {
    Statement::new("products.search", SEARCH_PRODUCTS).bind_text(contains_pattern(term))
}

pub fn sales_by_category() -> Statement {
    Statement::new("sales.by_category", SALES_BY_CATEGORY)
}

pub fn unique_customers() -> Statement {
    Statement::new("customers.unique", UNIQUE_CUSTOMERS)
}

/// `%term%` pattern with LIKE wildcards in the term escaped. Case folding
/// happens in SQL, with `LOWER` on both sides of `LIKE`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
