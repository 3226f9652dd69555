use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::Metrics;

// ============================================================================
// Query Executor
// ============================================================================
//
// Runs one named, parameterized statement on a leased pool connection and
// decodes the rows into a typed record. Parameters are always bound
// positionally ($1, $2, ...), never spliced into the SQL text.
//
// No retries: a failed statement is returned to the caller as-is.
//
// ============================================================================

/// Positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
}

/// A named SQL statement plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Stable label used in logs and metrics
    pub name: &'static str,
    pub sql: Cow<'static, str>,
    pub params: Vec<Param>,
}

impl Statement {
    pub fn new(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            sql: Cow::Borrowed(sql),
            params: Vec::new(),
        }
    }

    pub fn bind_int(mut self, value: i64) -> Self {
        self.params.push(Param::Int(value));
        self
    }

    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.params.push(Param::Text(value.into()));
        self
    }

    /// Same statement prefixed with `EXPLAIN ANALYZE`, parameters unchanged
    pub fn explain_analyze(&self) -> Self {
        Self {
            name: self.name,
            sql: Cow::Owned(format!("EXPLAIN ANALYZE {}", self.sql)),
            params: self.params.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("query `{statement}` failed: {source}")]
pub struct QueryError {
    pub statement: &'static str,
    #[source]
    pub source: sqlx::Error,
}

/// A row type every executor can produce: decodable from Postgres rows and
/// from JSON fixtures.
pub trait Record: for<'r> FromRow<'r, PgRow> + DeserializeOwned + Send + Unpin + 'static {}

impl<T> Record for T where T: for<'r> FromRow<'r, PgRow> + DeserializeOwned + Send + Unpin + 'static {}

#[async_trait]
pub trait Executor: Send + Sync + 'static {
    /// Run the statement and return every row, in the order the database produced them
    async fn fetch_all<T: Record>(&self, statement: Statement) -> Result<Vec<T>, QueryError>;
}

#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
    metrics: Arc<Metrics>,
}

impl PgExecutor {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self { pool, metrics }
    }
}

#[async_trait]
impl Executor for PgExecutor {
    async fn fetch_all<T: Record>(&self, statement: Statement) -> Result<Vec<T>, QueryError> {
        let Statement { name, sql, params } = statement;
        let start = Instant::now();

        let mut query = sqlx::query_as::<sqlx::Postgres, T>(&sql);
        for param in params {
            query = match param {
                Param::Int(value) => query.bind(value),
                Param::Text(value) => query.bind(value),
            };
        }

        // The connection is leased for this call only and goes back to the
        // pool whether or not the statement succeeds.
        let result = query.fetch_all(&self.pool).await;
        let elapsed = start.elapsed();
        self.metrics
            .record_query(name, elapsed.as_secs_f64(), result.is_ok());

        match result {
            Ok(rows) => {
                tracing::debug!(
                    statement = name,
                    rows = rows.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query executed"
                );
                Ok(rows)
            }
            Err(source) => {
                tracing::error!(
                    statement = name,
                    error = %source,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query failed"
                );
                Err(QueryError { statement: name, source })
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
