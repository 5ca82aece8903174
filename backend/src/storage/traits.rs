//! # Storage Traits
//!
//! The persistence gateway the domain layer talks to. It is deliberately
//! narrow: one call for statements that return rows, one call for statements
//! that change rows. Statements are plain SQL with `?` placeholders and the
//! values are bound positionally from a slice of [`SqlValue`].

use async_trait::async_trait;
use shared::Car;

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// What a mutating statement did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Execution {
    /// Number of rows inserted, updated or deleted
    pub rows_affected: u64,
    /// Row id of the last successful insert on the connection that ran the statement
    pub last_insert_id: i64,
}

/// Any failure reported by the underlying engine
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Gateway between the car operations and the storage engine.
///
/// Implementations must be safe to call from many requests at once; callers
/// never assume exclusive access and never retry a failed call.
#[async_trait]
pub trait CarGateway: Send + Sync {
    /// Run a read statement and return every matching car row
    async fn query(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Car>, StoreError>;

    /// Run an insert, update or delete statement
    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<Execution, StoreError>;
}
