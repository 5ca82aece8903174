use anyhow::Result;
use async_trait::async_trait;
use shared::Car;
use sqlx::{
    migrate::MigrateDatabase,
    query::Query,
    sqlite::{SqliteArguments, SqlitePoolOptions, SqliteRow},
    Row, Sqlite, SqlitePool,
};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

use super::traits::{CarGateway, Execution, SqlValue, StoreError};

/// DbConnection owns the SQLite pool shared by every request
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (and create if missing) the database at `url`, then ensure the schema exists
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database, used by tests.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cars (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                brand TEXT NOT NULL,
                model TEXT NOT NULL,
                color TEXT NOT NULL,
                year INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn bind_all<'q>(
    statement: &'q str,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(statement), |query, param| match param {
            SqlValue::Integer(value) => query.bind(*value),
            SqlValue::Text(value) => query.bind(value.as_str()),
            SqlValue::Null => query.bind(None::<i64>),
        })
}

fn car_from_row(row: &SqliteRow) -> Result<Car, sqlx::Error> {
    Ok(Car {
        id: row.try_get("id")?,
        brand: row.try_get("brand")?,
        model: row.try_get("model")?,
        color: row.try_get("color")?,
        year: row.try_get("year")?,
    })
}

#[async_trait]
impl CarGateway for DbConnection {
    async fn query(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Car>, StoreError> {
        debug!("query: {} ({} params)", statement, params.len());
        let rows = bind_all(statement, params).fetch_all(self.pool()).await?;
        let cars = rows
            .iter()
            .map(car_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cars)
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<Execution, StoreError> {
        debug!("execute: {} ({} params)", statement, params.len());
        let result = bind_all(statement, params).execute(self.pool()).await?;
        Ok(Execution {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }
}
