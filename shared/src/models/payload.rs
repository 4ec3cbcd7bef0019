//! Field-by-field decoding of JSON write payloads
//!
//! Decoding never stops at the first problem: every missing or
//! malformed field is recorded so the 400 response can list them all.

use crate::error::AppError;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Collects typed field values and decode problems from a JSON object
#[derive(Debug)]
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    missing: Vec<&'static str>,
    invalid: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Present means: key exists, value is not null and not an empty string
    fn present(&self, name: &str) -> Option<&'a Value> {
        let object: &'a Map<String, Value> = self.object;
        match object.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    /// Non-empty string. JSON numbers are accepted in their JSON rendering.
    pub fn required_string(&mut self, name: &'static str) -> Option<String> {
        let Some(value) = self.present(name) else {
            self.missing.push(name);
            return None;
        };
        self.string_value(name, value)
    }

    /// Optional string; absent, null or empty decode to `None`
    pub fn optional_string(&mut self, name: &'static str) -> Option<String> {
        let value = self.present(name)?;
        self.string_value(name, value)
    }

    fn string_value(&mut self, name: &'static str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.invalid.push(name);
                None
            }
        }
    }

    /// Decimal from a JSON number or a numeric string
    pub fn required_decimal(&mut self, name: &'static str) -> Option<Decimal> {
        let Some(value) = self.present(name) else {
            self.missing.push(name);
            return None;
        };
        let parsed = match value {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };
        if parsed.is_none() {
            self.invalid.push(name);
        }
        parsed
    }

    /// Integer from a JSON integer or a string of digits (optional sign)
    pub fn required_integer(&mut self, name: &'static str) -> Option<i64> {
        let Some(value) = self.present(name) else {
            self.missing.push(name);
            return None;
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.invalid.push(name);
        }
        parsed
    }

    /// True when no field has been reported missing or invalid
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Build the validation error listing every reported field
    pub fn into_error(self) -> AppError {
        let mut names: Vec<&str> = self.missing.clone();
        names.extend(self.invalid.iter().copied());
        let message = if names.is_empty() {
            "Invalid payload".to_string()
        } else {
            format!("Missing or invalid fields: {}", names.join(", "))
        };
        AppError::validation(message)
            .with_detail("missing", self.missing)
            .with_detail("invalid", self.invalid)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
