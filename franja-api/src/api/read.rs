//! Catalog reader: `GET /?mercado=<market>`

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::PriceRow;

use super::{QueryPairs, first_param, query_rejection};
use crate::state::AppState;

/// List every product of a market with its prices
///
/// An unknown or empty market yields an empty array, not an error.
pub async fn list_prices(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> AppResult<Json<Vec<PriceRow>>> {
    let Query(params) = query.map_err(query_rejection)?;
    let market = first_param(&params, "mercado")
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::MarketRequired).with_detail("field", "mercado"))?;

    let rows = state.catalog.list_by_market(&market).await?;
    tracing::debug!(market = %market, rows = rows.len(), "Market listing served");
    Ok(Json(rows))
}
