//! Test doubles for the domain layer.
//!
//! `RecordingGateway` answers every call with a canned response and keeps a
//! log of the statements it was asked to run, so tests can assert both what
//! reached the store and that nothing did.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::Car;

use crate::storage::{CarGateway, Execution, SqlValue, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub statement: String,
    pub params: Vec<SqlValue>,
}

#[derive(Default)]
pub struct RecordingGateway {
    rows: Vec<Car>,
    execution: Execution,
    fail: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingGateway {
    /// Every query returns `rows`
    pub fn with_rows(rows: Vec<Car>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Every execute reports the given counts
    pub fn with_execution(rows_affected: u64, last_insert_id: i64) -> Self {
        Self {
            execution: Execution {
                rows_affected,
                last_insert_id,
            },
            ..Self::default()
        }
    }

    /// Every call fails as if the engine were unreachable
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, statement: &str, params: &[SqlValue]) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(RecordedCall {
            statement: statement.to_string(),
            params: params.to_vec(),
        });
        if self.fail {
            return Err(StoreError::Unavailable("recording gateway set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CarGateway for RecordingGateway {
    async fn query(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Car>, StoreError> {
        self.record(statement, params)?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<Execution, StoreError> {
        self.record(statement, params)?;
        Ok(self.execution)
    }
}
