//! Base product models

use super::payload::FieldReader;
use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Create base product payload
///
/// Per-market price rows are fanned out by the database once the
/// product row exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseProductCreate {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "producto")]
    pub name: String,
    #[serde(rename = "cantidad_caja")]
    pub units_per_case: i64,
    #[serde(rename = "ficha_tecnica")]
    pub technical_sheet: Option<String>,
}

impl BaseProductCreate {
    pub fn from_payload(object: &Map<String, Value>) -> AppResult<Self> {
        let mut fields = FieldReader::new(object);
        let code = fields.required_string("codigo");
        let name = fields.required_string("producto");
        let units_per_case = fields.required_integer("cantidad_caja");
        let technical_sheet = fields.optional_string("ficha_tecnica");

        match (code, name, units_per_case) {
            (Some(code), Some(name), Some(units_per_case)) if fields.is_clean() => Ok(Self {
                code,
                name,
                units_per_case,
                technical_sheet,
            }),
            _ => Err(fields.into_error()),
        }
    }
}

/// Which product a delete addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Database-assigned numeric identity
    Id(u64),
    /// Business code
    Code(String),
}

impl DeleteTarget {
    /// Read `id`, falling back to `codigo`, and classify the identifier
    pub fn from_payload(object: &Map<String, Value>) -> AppResult<Self> {
        let identifier = match identifier_field(object, "id")? {
            Some(id) => id,
            None => identifier_field(object, "codigo")?.ok_or_else(|| {
                AppError::required("id")
                    .with_detail("message", "Provide either 'id' or 'codigo'")
                    .with_detail("fields", vec!["id", "codigo"])
            })?,
        };
        Self::resolve(identifier)
    }

    /// An identifier made only of ASCII digits is an id, anything else a code
    pub fn resolve(identifier: String) -> AppResult<Self> {
        if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::Code(identifier));
        }
        identifier.parse::<u64>().map(Self::Id).map_err(|_| {
            AppError::invalid_format(format!("Identifier out of range: {identifier}"))
                .with_detail("field", "id")
        })
    }
}

impl fmt::Display for DeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

/// String form of an identifier field; null, "" and numeric 0 count as absent
fn identifier_field(object: &Map<String, Value>, name: &str) -> AppResult<Option<String>> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(
            AppError::invalid_format(format!("Field '{name}' must be a string or a number"))
                .with_detail("field", name),
        ),
    }
}
