//! Market price models

use super::payload::FieldReader;
use crate::error::AppResult;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// One row of the market-scoped product listing
///
/// Column names become keys; the set of columns is owned by the
/// listing procedure, not by this service.
pub type PriceRow = Map<String, Value>;

/// Price upsert for a `(market, code)` pair
///
/// Field order matches the positional signature of the upsert procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPriceUpdate {
    #[serde(rename = "mercado")]
    pub market: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "docena")]
    pub dozen: Decimal,
    #[serde(rename = "caja_1")]
    pub case_1: Decimal,
    #[serde(rename = "caja_5")]
    pub case_5: Decimal,
    #[serde(rename = "caja_10")]
    pub case_10: Decimal,
    #[serde(rename = "caja_20")]
    pub case_20: Decimal,
    /// `None` is bound as SQL NULL so the database can default it
    #[serde(rename = "texto_copiar")]
    pub copy_text: Option<String>,
}

impl MarketPriceUpdate {
    pub fn from_payload(object: &Map<String, Value>) -> AppResult<Self> {
        let mut fields = FieldReader::new(object);
        let market = fields.required_string("mercado");
        let code = fields.required_string("codigo");
        let dozen = fields.required_decimal("docena");
        let case_1 = fields.required_decimal("caja_1");
        let case_5 = fields.required_decimal("caja_5");
        let case_10 = fields.required_decimal("caja_10");
        let case_20 = fields.required_decimal("caja_20");
        let copy_text = fields.optional_string("texto_copiar");

        match (market, code, dozen, case_1, case_5, case_10, case_20) {
            (
                Some(market),
                Some(code),
                Some(dozen),
                Some(case_1),
                Some(case_5),
                Some(case_10),
                Some(case_20),
            ) if fields.is_clean() => Ok(Self {
                market,
                code,
                dozen,
                case_1,
                case_5,
                case_10,
                case_20,
                copy_text,
            }),
            _ => Err(fields.into_error()),
        }
    }
}
