//! # Storage Module
//!
//! Handles persistence of cars. The domain layer only sees the
//! [`CarGateway`] trait; [`DbConnection`] is the SQLite implementation used by
//! the running service, and tests are free to substitute their own.

pub mod connection;
pub mod traits;

pub use connection::DbConnection;
pub use traits::{CarGateway, Execution, SqlValue, StoreError};
