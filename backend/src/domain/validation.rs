//! Request validation for the car endpoints.
//!
//! Everything here is pure: a raw identifier or payload goes in, either a
//! typed value or a [`ValidationError`] comes out. Nothing in this module
//! touches the store.

use serde_json::Value;
use shared::CarPayload;

/// How an input was rejected; decides the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Required input absent or empty (400)
    MissingInput,
    /// Input present but of the wrong type or shape (400)
    MalformedInput,
    /// Right type, value not acceptable (422)
    UnprocessableValue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: &'static str,
}

impl ValidationError {
    fn missing(message: &'static str) -> Self {
        Self {
            kind: ValidationKind::MissingInput,
            message,
        }
    }

    fn malformed(message: &'static str) -> Self {
        Self {
            kind: ValidationKind::MalformedInput,
            message,
        }
    }

    fn unprocessable(message: &'static str) -> Self {
        Self {
            kind: ValidationKind::UnprocessableValue,
            message,
        }
    }
}

/// `Ok` carries the validated value, `Err` the rejection
pub type ValidationOutcome<T> = Result<T, ValidationError>;

/// A path identifier that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CarId(i64);

impl CarId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields for a new car, all present and checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i64,
}

/// Fields to change on an existing car; `None` leaves the column as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub year: Option<i64>,
}

/// Validate an identifier taken from the request path.
///
/// The whole string must be an integer; `"12abc"` is rejected rather than
/// read as 12.
pub fn validate_id(raw: Option<&str>) -> ValidationOutcome<CarId> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() && raw != "null" && raw != "undefined" => raw,
        _ => return Err(ValidationError::missing("ID is required")),
    };

    let id: i64 = raw
        .parse()
        .map_err(|_| ValidationError::malformed("ID must be a number"))?;

    if id < 0 {
        return Err(ValidationError::unprocessable("ID must be a positive number"));
    }

    Ok(CarId(id))
}

/// Validate a create payload: every field is required
pub fn validate_create(payload: &CarPayload) -> ValidationOutcome<NewCar> {
    if !supplied_fields(payload).iter().all(|field| is_truthy(*field)) {
        return Err(ValidationError::missing("All fields are required"));
    }

    let brand = text_field(payload.brand.as_ref(), "Brand must be a string")?;
    let model = text_field(payload.model.as_ref(), "Model must be a string")?;
    let color = text_field(payload.color.as_ref(), "Color must be a string")?;
    let year = year_field(payload.year.as_ref())?;

    match (brand, model, color, year) {
        (Some(brand), Some(model), Some(color), Some(year)) => Ok(NewCar {
            brand,
            model,
            color,
            year,
        }),
        _ => Err(ValidationError::missing("All fields are required")),
    }
}

/// Validate an update payload: at least one field is required.
///
/// Year checks only apply when a year was actually sent, so an update that
/// only renames the brand is accepted.
pub fn validate_update(payload: &CarPayload) -> ValidationOutcome<CarChanges> {
    if !supplied_fields(payload).iter().any(|field| is_truthy(*field)) {
        return Err(ValidationError::missing("At least one field is required"));
    }

    Ok(CarChanges {
        brand: text_field(payload.brand.as_ref(), "Brand must be a string")?,
        model: text_field(payload.model.as_ref(), "Model must be a string")?,
        color: text_field(payload.color.as_ref(), "Color must be a string")?,
        year: year_field(payload.year.as_ref())?,
    })
}

fn supplied_fields(payload: &CarPayload) -> [Option<&Value>; 4] {
    [
        payload.brand.as_ref(),
        payload.model.as_ref(),
        payload.color.as_ref(),
        payload.year.as_ref(),
    ]
}

/// JSON truthiness: absent, null, false, 0 and "" count as not supplied
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_field(value: Option<&Value>, type_message: &'static str) -> ValidationOutcome<Option<String>> {
    if !is_truthy(value) {
        return Ok(None);
    }
    match value {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        _ => Err(ValidationError::malformed(type_message)),
    }
}

fn year_field(value: Option<&Value>) -> ValidationOutcome<Option<i64>> {
    if !is_truthy(value) {
        return Ok(None);
    }
    let year = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| whole_number(n.as_f64()?)),
        _ => None,
    }
    .ok_or_else(|| ValidationError::malformed("Year must be a number"))?;
    if year < 0 {
        return Err(ValidationError::unprocessable("Year must be a positive number"));
    }
    Ok(Some(year))
}

/// `2020.0` is the same year as `2020`; a real fraction is not a year
fn whole_number(n: f64) -> Option<i64> {
    let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
    (n.fract() == 0.0 && in_range).then_some(n as i64)
}
