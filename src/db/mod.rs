// ============================================================================
// Database Layer
// ============================================================================
//
// - pool      - Database: the explicitly constructed connection pool
// - executor  - Statement/Param, the Executor seam and its Postgres impl
// - queries   - one statement builder per endpoint
// - seed      - schema provisioning and synthetic data
//
// ============================================================================

mod executor;
mod pool;
pub mod queries;
pub mod seed;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod pg_tests;

pub use executor::{Executor, Param, PgExecutor, QueryError, Record, Statement};
pub use pool::Database;
