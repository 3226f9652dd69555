use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::executor::{Executor, QueryError, Record, Statement};

/// In-memory executor for handler tests: serves canned JSON rows per
/// statement name and records every statement it is asked to run.
#[derive(Default)]
pub struct FakeExecutor {
    rows: HashMap<&'static str, Vec<serde_json::Value>>,
    failing: HashMap<&'static str, String>,
    issued: Mutex<Vec<Statement>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, statement: &'static str, rows: Vec<serde_json::Value>) -> Self {
        self.rows.insert(statement, rows);
        self
    }

    pub fn failing(mut self, statement: &'static str, message: &str) -> Self {
        self.failing.insert(statement, message.to_string());
        self
    }

    pub fn issued(&self) -> Vec<Statement> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn fetch_all<T: Record>(&self, statement: Statement) -> Result<Vec<T>, QueryError> {
        let name = statement.name;
        let is_explain = statement.sql.starts_with("EXPLAIN");
        self.issued.lock().unwrap().push(statement);

        if let Some(message) = self.failing.get(name) {
            return Err(QueryError {
                statement: name,
                source: sqlx::Error::Protocol(message.clone()),
            });
        }

        // Plans are not simulated
        if is_explain {
            return Ok(Vec::new());
        }

        let rows = self.rows.get(name).cloned().unwrap_or_default();
        Ok(rows
            .into_iter()
            .map(|row| serde_json::from_value(row).unwrap())
            .collect())
    }
}
