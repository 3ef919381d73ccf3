//! Schema validation of raw JSON request bodies.
//!
//! Every field is checked and all problems are reported together as a map of
//! field name to messages, so a client can fix a request in one round trip.
//! Keys that are not part of a schema are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::DomainError;
use super::order::{OrderDraft, OrderReplacement, OrderSize, OrderStatus, StatusChange};
use super::ports::PayloadValidator;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MIN_QUANTITY: i64 = 1;

const SIZE: &str = "size";
const QUANTITY: &str = "quantity";
const ORDER_STATUS: &str = "order_status";

/// Field-level validation failures, serialised as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validator for the order payload schemas accepted by the HTTP API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl PayloadValidator for SchemaValidator {
    fn order_draft(&self, raw: &Value) -> Result<OrderDraft, ValidationErrors> {
        let body = object(raw)?;
        let mut errors = ValidationErrors::new();

        let size = required(body, SIZE, &mut errors)
            .and_then(|v| choice::<OrderSize>(SIZE, v, &mut errors));
        let quantity =
            required(body, QUANTITY, &mut errors).and_then(|v| quantity(v, &mut errors));

        match (size, quantity) {
            (Some(size), Some(quantity)) if errors.is_empty() => Ok(OrderDraft { size, quantity }),
            _ => Err(errors),
        }
    }

    fn order_replacement(&self, raw: &Value) -> Result<OrderReplacement, ValidationErrors> {
        let body = object(raw)?;
        let mut errors = ValidationErrors::new();

        let size = required(body, SIZE, &mut errors)
            .and_then(|v| choice::<OrderSize>(SIZE, v, &mut errors));
        let quantity =
            required(body, QUANTITY, &mut errors).and_then(|v| quantity(v, &mut errors));
        let status = match optional(body, ORDER_STATUS, &mut errors) {
            Presence::Absent => Some(OrderStatus::default()),
            Presence::Present(v) => choice(ORDER_STATUS, v, &mut errors),
            Presence::Null => None,
        };

        match (size, quantity, status) {
            (Some(size), Some(quantity), Some(status)) if errors.is_empty() => {
                Ok(OrderReplacement {
                    size,
                    quantity,
                    status,
                })
            }
            _ => Err(errors),
        }
    }

    fn status_change(&self, raw: &Value) -> Result<StatusChange, ValidationErrors> {
        let body = object(raw)?;
        let mut errors = ValidationErrors::new();

        let status = required(body, ORDER_STATUS, &mut errors)
            .and_then(|v| choice::<OrderStatus>(ORDER_STATUS, v, &mut errors));

        match status {
            Some(status) if errors.is_empty() => Ok(StatusChange { status }),
            _ => Err(errors),
        }
    }
}

/// Decodes a raw request body. An empty body reads as an empty object, so the
/// validator reports every required field instead of a parse error.
pub fn parse_body(body: &[u8]) -> Result<Value, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| DomainError::MalformedBody(e.to_string()))
}

fn object(raw: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    let kind = match raw {
        Value::Object(map) => return Ok(map),
        Value::Null => {
            return Err(ValidationErrors::single(
                NON_FIELD_ERRORS,
                "No data provided.",
            ))
        }
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
    };
    Err(ValidationErrors::single(
        NON_FIELD_ERRORS,
        format!("Invalid data. Expected an object, but got {kind}."),
    ))
}

enum Presence<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

fn optional<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Presence<'a> {
    match body.get(field) {
        None => Presence::Absent,
        Some(Value::Null) => {
            errors.add(field, "This field may not be null.");
            Presence::Null
        }
        Some(value) => Presence::Present(value),
    }
}

fn required<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match optional(body, field, errors) {
        Presence::Present(value) => Some(value),
        Presence::Absent => {
            errors.add(field, "This field is required.");
            None
        }
        Presence::Null => None,
    }
}

fn choice<T: FromStr>(field: &str, value: &Value, errors: &mut ValidationErrors) -> Option<T> {
    let parsed = match value {
        Value::String(s) => s.parse::<T>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        errors.add(field, format!("\"{shown}\" is not a valid choice."));
    }
    parsed
}

enum Integer {
    Exact(i64),
    AboveRange,
    BelowRange,
}

fn quantity(value: &Value, errors: &mut ValidationErrors) -> Option<i32> {
    let max = i64::from(i32::MAX);
    match integer(value) {
        None => errors.add(QUANTITY, "A valid integer is required."),
        Some(Integer::Exact(n)) if n < MIN_QUANTITY => errors.add(QUANTITY, min_message()),
        Some(Integer::BelowRange) => errors.add(QUANTITY, min_message()),
        Some(Integer::Exact(n)) if n > max => errors.add(QUANTITY, max_message()),
        Some(Integer::AboveRange) => errors.add(QUANTITY, max_message()),
        Some(Integer::Exact(n)) => return i32::try_from(n).ok(),
    }
    None
}

fn min_message() -> String {
    format!("Ensure this value is greater than or equal to {MIN_QUANTITY}.")
}

fn max_message() -> String {
    format!("Ensure this value is less than or equal to {}.", i32::MAX)
}

/// Integers may arrive as JSON numbers, as floats without a fractional part
/// (`3.0`) or as decimal strings (`"3"`).
fn integer(value: &Value) -> Option<Integer> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Integer::Exact(i));
            }
            if n.as_u64().is_some() {
                return Some(Integer::AboveRange);
            }
            float_integer(n.as_f64()?)
        }
        Value::String(s) => string_integer(s.trim()),
        _ => None,
    }
}

fn float_integer(f: f64) -> Option<Integer> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    if f >= i64::MAX as f64 {
        Some(Integer::AboveRange)
    } else if f <= i64::MIN as f64 {
        Some(Integer::BelowRange)
    } else {
        Some(Integer::Exact(f as i64))
    }
}

fn string_integer(s: &str) -> Option<Integer> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    let (negative, digits) = match whole.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, whole),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match whole.parse::<i64>() {
        Ok(n) => Some(Integer::Exact(n)),
        Err(_) if negative => Some(Integer::BelowRange),
        Err(_) => Some(Integer::AboveRange),
    }
}
