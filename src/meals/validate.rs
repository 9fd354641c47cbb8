//! Request validation for meal payloads and path ids.
//!
//! Payload fields are read as raw JSON so every violation can be reported at once,
//! then coerced into a [`MealInput`] that the repository accepts as-is.

use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};
use uuid::Uuid;

use super::repo_types::{from_unix_millis, unix_millis};
use crate::error::{AppError, FieldIssue};

/// Create/update body exactly as received.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub created_at: Option<Value>,
    pub is_on_the_diet: Option<Value>,
}

/// Validated meal fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub is_on_the_diet: bool,
}

pub fn validate_meal(payload: MealPayload) -> Result<MealInput, AppError> {
    let mut issues = Vec::new();

    let name = text_field("name", payload.name, &mut issues);
    let description = text_field("description", payload.description, &mut issues);
    let created_at = match payload.created_at {
        None => {
            issues.push(FieldIssue::new("createdAt", "required"));
            None
        }
        Some(v) => match coerce_timestamp(&v) {
            Ok(t) => Some(t),
            Err(msg) => {
                issues.push(FieldIssue::new("createdAt", msg));
                None
            }
        },
    };
    let is_on_the_diet = match payload.is_on_the_diet {
        Some(Value::Bool(b)) => Some(b),
        None => {
            issues.push(FieldIssue::new("isOnTheDiet", "required"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new("isOnTheDiet", "expected boolean"));
            None
        }
    };

    match (name, description, created_at, is_on_the_diet) {
        (Some(name), Some(description), Some(created_at), Some(is_on_the_diet))
            if issues.is_empty() =>
        {
            Ok(MealInput {
                name,
                description,
                created_at,
                is_on_the_diet,
            })
        }
        _ => Err(AppError::Validation(issues)),
    }
}

fn text_field(field: &str, value: Option<Value>, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::String(_)) => {
            issues.push(FieldIssue::new(field, "must not be empty"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new(field, "expected string"));
            None
        }
        None => {
            issues.push(FieldIssue::new(field, "required"));
            None
        }
    }
}

/// Lenient date coercion: epoch milliseconds (number or digit string), RFC 3339,
/// offset-less date-times and plain dates (both read as UTC). The result is
/// truncated to milliseconds and normalized to UTC.
pub fn coerce_timestamp(value: &Value) -> Result<OffsetDateTime, String> {
    let parsed = match value {
        Value::Number(n) => {
            let ms = n
                .as_f64()
                .filter(|ms| ms.is_finite())
                .ok_or_else(|| "invalid date".to_string())?;
            if ms.abs() > i64::MAX as f64 {
                return Err("invalid date".into());
            }
            from_unix_millis(ms.trunc() as i64).map_err(|_| "date out of range".to_string())?
        }
        Value::String(s) => parse_date_str(s.trim()).ok_or_else(|| "invalid date".to_string())?,
        _ => return Err("expected date string or epoch milliseconds".into()),
    };
    from_unix_millis(unix_millis(parsed)).map_err(|_| "date out of range".to_string())
}

fn parse_date_str(s: &str) -> Option<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(t);
    }
    let with_seconds =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    if let Ok(t) = PrimitiveDateTime::parse(s, with_seconds) {
        return Some(t.assume_utc());
    }
    if let Ok(t) = PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]")) {
        return Some(t.assume_utc());
    }
    if let Ok(d) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(d.midnight().assume_utc());
    }
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(|ms| from_unix_millis(ms).ok());
    }
    None
}

/// Path ids must be hyphenated UUIDs.
pub fn parse_meal_id(raw: &str) -> Result<Uuid, AppError> {
    if raw.len() == 36 {
        if let Ok(id) = Uuid::parse_str(raw) {
            return Ok(id);
        }
    }
    Err(AppError::Validation(vec![FieldIssue::new("id", "invalid uuid")]))
}

pub fn body_rejection(rejection: JsonRejection) -> AppError {
    AppError::Validation(vec![FieldIssue::new("body", rejection.body_text())])
}
