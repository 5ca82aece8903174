//! # Domain Module
//!
//! Validation rules and the car operations built on them. Nothing in here
//! knows about HTTP; handlers in `io::rest` translate the results.

pub mod car_service;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use car_service::{CarService, CarServiceError, CarServiceResult, OperationResult};
pub use validation::{
    validate_create, validate_id, validate_update, CarChanges, CarId, NewCar, ValidationError,
    ValidationKind, ValidationOutcome,
};
