//! Car operations: validate the request, make one gateway call, classify the
//! result. The REST layer turns the classification into a response.

use std::sync::Arc;

use shared::{Car, CarPayload};
use tracing::{debug, info, warn};

use super::validation::{self, ValidationError};
use crate::storage::{CarGateway, SqlValue, StoreError};

const SELECT_ALL: &str = "SELECT id, brand, model, color, year FROM cars ORDER BY id";
const SELECT_ONE: &str = "SELECT id, brand, model, color, year FROM cars WHERE id = ?";
const INSERT: &str = "INSERT INTO cars (brand, model, color, year) VALUES (?, ?, ?, ?)";
const UPDATE: &str = "UPDATE cars SET \
    brand = COALESCE(?, brand), \
    model = COALESCE(?, model), \
    color = COALESCE(?, color), \
    year = COALESCE(?, year) \
    WHERE id = ?";
const DELETE: &str = "DELETE FROM cars WHERE id = ?";

/// Outcome of a lookup by identifier whose gateway call succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Success(T),
    /// The identifier was valid but matched no row
    NotFound,
}

/// Why an operation failed
#[derive(Debug, thiserror::Error)]
pub enum CarServiceError {
    /// Rejected before the store was touched
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The gateway call failed; never inspected or retried here
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CarServiceResult<T> = Result<OperationResult<T>, CarServiceError>;

/// Stateless between requests; the only shared thing is the gateway handle
#[derive(Clone)]
pub struct CarService {
    gateway: Arc<dyn CarGateway>,
}

impl CarService {
    pub fn new(gateway: Arc<dyn CarGateway>) -> Self {
        Self { gateway }
    }

    /// List every stored car; an empty table is an empty list
    pub async fn list_cars(&self) -> Result<Vec<Car>, CarServiceError> {
        let cars = self.gateway.query(SELECT_ALL, &[]).await?;
        info!("Listing {} cars", cars.len());
        Ok(cars)
    }

    /// Fetch one car by its path identifier
    pub async fn get_car(&self, raw_id: Option<&str>) -> CarServiceResult<Car> {
        let id = Self::checked(validation::validate_id(raw_id))?;

        let cars = self.gateway.query(SELECT_ONE, &[id.get().into()]).await?;
        match cars.into_iter().next() {
            Some(car) => Ok(OperationResult::Success(car)),
            None => {
                info!("Car {} not found", id);
                Ok(OperationResult::NotFound)
            }
        }
    }

    /// Insert a new car and return the id the store assigned to it
    pub async fn create_car(&self, payload: &CarPayload) -> Result<i64, CarServiceError> {
        let car = Self::checked(validation::validate_create(payload))?;

        let params = [
            SqlValue::from(car.brand),
            SqlValue::from(car.model),
            SqlValue::from(car.color),
            SqlValue::from(car.year),
        ];
        let execution = self.gateway.execute(INSERT, &params).await?;
        info!("Created car {}", execution.last_insert_id);
        Ok(execution.last_insert_id)
    }

    /// Change the supplied fields of an existing car
    pub async fn update_car(&self, raw_id: Option<&str>, payload: &CarPayload) -> CarServiceResult<()> {
        let id = Self::checked(validation::validate_id(raw_id))?;
        let changes = Self::checked(validation::validate_update(payload))?;

        let params = [
            SqlValue::from(changes.brand),
            SqlValue::from(changes.model),
            SqlValue::from(changes.color),
            SqlValue::from(changes.year),
            SqlValue::from(id.get()),
        ];
        let execution = self.gateway.execute(UPDATE, &params).await?;
        if execution.rows_affected == 0 {
            info!("Car {} not found for update", id);
            return Ok(OperationResult::NotFound);
        }
        info!("Updated car {}", id);
        Ok(OperationResult::Success(()))
    }

    /// Delete a car. Deleting an id that does not exist still succeeds.
    pub async fn delete_car(&self, raw_id: Option<&str>) -> Result<(), CarServiceError> {
        let id = Self::checked(validation::validate_id(raw_id))?;

        let execution = self.gateway.execute(DELETE, &[id.get().into()]).await?;
        debug!("Delete of car {} removed {} rows", id, execution.rows_affected);
        Ok(())
    }

    fn checked<T>(outcome: validation::ValidationOutcome<T>) -> Result<T, CarServiceError> {
        outcome.map_err(|err| {
            warn!("Rejected request: {}", err);
            CarServiceError::Validation(err)
        })
    }
}
