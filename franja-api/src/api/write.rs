//! Catalog writer: `POST /?method=<operation>`
//!
//! The discriminator is resolved before the body is decoded, so an
//! unrecognized operation never reaches the database.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use http::StatusCode;
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult};
use shared::models::{BaseProductCreate, DeleteTarget, MarketPriceUpdate};
use shared::response::WriteResult;

use super::operation::WriteOperation;
use super::{QueryPairs, first_param, query_rejection};
use crate::state::AppState;

type WriteResponse = AppResult<(StatusCode, Json<WriteResult>)>;

pub async fn write_catalog(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> WriteResponse {
    let Query(params) = query.map_err(query_rejection)?;
    let operation = first_param(&params, "method")
        .filter(|m| !m.trim().is_empty())
        .map(|m| WriteOperation::parse(&m))
        .ok_or_else(|| AppError::required("method"))?;

    if let WriteOperation::Unknown(name) = &operation {
        return Err(AppError::unsupported_operation(name.as_str())
            .with_detail("supported", WriteOperation::SUPPORTED.to_vec()));
    }

    let body = body.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let payload = decode_object(&body)?;

    match operation {
        WriteOperation::UpdateMarketPrices => update_market_prices(&state, &payload).await,
        WriteOperation::CreateBaseProduct => create_base_product(&state, &payload).await,
        WriteOperation::DeleteProduct => delete_product(&state, &payload).await,
        WriteOperation::Unknown(name) => Err(AppError::unsupported_operation(name)),
    }
}

/// Empty body reads as `{}`; anything but a JSON object is rejected
fn decode_object(body: &[u8]) -> AppResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::invalid_format("Request body must be a JSON object")),
        Err(e) => Err(AppError::invalid_format(format!("Invalid JSON body: {e}"))),
    }
}

async fn update_market_prices(state: &AppState, payload: &Map<String, Value>) -> WriteResponse {
    let update = MarketPriceUpdate::from_payload(payload)?;
    state.catalog.update_market_prices(&update).await?;

    tracing::info!(market = %update.market, code = %update.code, "Market prices updated");
    Ok((StatusCode::OK, Json(WriteResult::ok("Prices updated"))))
}

async fn create_base_product(state: &AppState, payload: &Map<String, Value>) -> WriteResponse {
    let product = BaseProductCreate::from_payload(payload)?;
    let id = state.catalog.create_base_product(&product).await?;

    tracing::info!(id, code = %product.code, "Base product created");
    Ok((
        StatusCode::CREATED,
        Json(WriteResult::created(id, "Product created")),
    ))
}

async fn delete_product(state: &AppState, payload: &Map<String, Value>) -> WriteResponse {
    let target = DeleteTarget::from_payload(payload)?;
    let affected = state.catalog.delete_product(&target).await?;

    if affected == 0 {
        tracing::info!(identifier = %target, "Delete matched no product");
        return Ok((
            StatusCode::NOT_FOUND,
            Json(WriteResult::not_found(format!(
                "No product found with identifier: {target}"
            ))),
        ));
    }

    tracing::info!(identifier = %target, affected, "Product deleted");
    Ok((
        StatusCode::OK,
        Json(WriteResult::ok(format!("Product {target} deleted"))),
    ))
}
