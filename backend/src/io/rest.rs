//! # REST API for Cars
//!
//! Axum handlers for `/api/cars`. Each handler logs the request, hands the
//! raw path id and body to [`CarService`](crate::domain::CarService) and maps
//! the classified result onto a status code and JSON body. Error bodies are
//! always `{"message": ...}`.

use std::any::Any;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{CarCreatedResponse, CarPayload, MessageResponse};
use tracing::{error, info, warn};

use crate::domain::{CarServiceError, OperationResult, ValidationKind};
use crate::AppState;

const NOT_FOUND_MESSAGE: &str = "Car not found";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(text))).into_response()
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

fn status_for(kind: ValidationKind) -> StatusCode {
    match kind {
        ValidationKind::MissingInput | ValidationKind::MalformedInput => StatusCode::BAD_REQUEST,
        ValidationKind::UnprocessableValue => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// The single fault boundary: validation failures keep their status and
/// message, store failures are logged here and reported without detail.
impl IntoResponse for CarServiceError {
    fn into_response(self) -> Response {
        match self {
            CarServiceError::Validation(err) => message(status_for(err.kind), err.message),
            CarServiceError::Store(err) => {
                error!("Store failure: {}", err);
                message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

fn rejected_body(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    message(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// A path segment that is not valid UTF-8 cannot be an integer either
fn rejected_path(rejection: PathRejection) -> Response {
    warn!("Rejected path: {}", rejection.body_text());
    message(StatusCode::BAD_REQUEST, "ID must be a number")
}

/// Axum handler function for GET /api/cars
pub async fn list_cars(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/cars");

    match state.car_service.list_cars().await {
        Ok(cars) => (StatusCode::OK, Json(cars)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for GET /api/cars/:id
pub async fn get_car(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match path {
        Ok(path) => path,
        Err(rejection) => return rejected_path(rejection),
    };
    info!("GET /api/cars/{}", id);

    match state.car_service.get_car(Some(&id)).await {
        Ok(OperationResult::Success(car)) => (StatusCode::OK, Json(car)).into_response(),
        Ok(OperationResult::NotFound) => not_found(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for POST /api/cars
pub async fn create_car(
    State(state): State<AppState>,
    body: Result<Json<CarPayload>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };
    info!("POST /api/cars - request: {:?}", payload);

    match state.car_service.create_car(&payload).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CarCreatedResponse {
                message: "Car created".to_string(),
                id,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for PUT /api/cars/:id
pub async fn update_car(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CarPayload>, JsonRejection>,
) -> impl IntoResponse {
    let Path(id) = match path {
        Ok(path) => path,
        Err(rejection) => return rejected_path(rejection),
    };
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };
    info!("PUT /api/cars/{} - request: {:?}", id, payload);

    match state.car_service.update_car(Some(&id), &payload).await {
        Ok(OperationResult::Success(())) => message(StatusCode::OK, "Car updated"),
        Ok(OperationResult::NotFound) => not_found(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for DELETE /api/cars/:id
pub async fn delete_car(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match path {
        Ok(path) => path,
        Err(rejection) => return rejected_path(rejection),
    };
    info!("DELETE /api/cars/{}", id);

    match state.car_service.delete_car(Some(&id)).await {
        Ok(()) => message(StatusCode::OK, "Car deleted"),
        Err(e) => e.into_response(),
    }
}

/// Fallback for methods a car route does not serve
pub async fn method_not_allowed() -> impl IntoResponse {
    message(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Fallback for paths outside the API
pub async fn route_not_found() -> impl IntoResponse {
    message(StatusCode::NOT_FOUND, "Route not found")
}

/// Turns a panic inside a handler into the same opaque 500 a store failure gets
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!("Handler panicked: {}", detail);
    message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
