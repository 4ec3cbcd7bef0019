//! Catalog persistence
//!
//! [`CatalogStore`] is the seam between handlers and the database; the
//! production implementation is [`MySqlCatalog`].

pub mod mysql;
pub mod row;

pub use mysql::MySqlCatalog;

use async_trait::async_trait;
use shared::models::{BaseProductCreate, DeleteTarget, MarketPriceUpdate, PriceRow};

use crate::error::ServiceResult;

/// One read or one write per call; nothing is held between calls
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Products listed in a market, with their prices
    async fn list_by_market(&self, market: &str) -> ServiceResult<Vec<PriceRow>>;

    /// Upsert the price row of a `(market, code)` pair
    async fn update_market_prices(&self, update: &MarketPriceUpdate) -> ServiceResult<()>;

    /// Insert a base product, returning its database-assigned id
    async fn create_base_product(&self, product: &BaseProductCreate) -> ServiceResult<u64>;

    /// Delete a product, returning the number of rows removed
    async fn delete_product(&self, target: &DeleteTarget) -> ServiceResult<u64>;
}
