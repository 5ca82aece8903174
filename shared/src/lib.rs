use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A car as stored in the `cars` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Assigned by the store on insert, never changes afterwards
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub color: String,
    /// Model year, never negative once stored
    pub year: i64,
}

/// Request body for creating or updating a car.
///
/// Every field is kept as a raw JSON value so the backend can tell "absent"
/// from "present but the wrong type" and report each case with its own
/// message. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
}

impl CarPayload {
    /// Convenience constructor for a fully populated payload
    pub fn new(brand: &str, model: &str, color: &str, year: i64) -> Self {
        Self {
            brand: Some(Value::from(brand)),
            model: Some(Value::from(model)),
            color: Some(Value::from(color)),
            year: Some(Value::from(year)),
        }
    }
}

/// Body returned by update, delete and every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarCreatedResponse {
    pub message: String,
    /// Identifier the store assigned to the new car
    pub id: i64,
}
