//! MySQL catalog adapter
//!
//! Every call opens its own connection, runs exactly one statement with
//! bound parameters and closes the connection before the result is
//! inspected. Autocommit makes each statement its own transaction.

use async_trait::async_trait;
use shared::models::{BaseProductCreate, DeleteTarget, MarketPriceUpdate, PriceRow};
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};

use super::CatalogStore;
use super::row::row_to_json;
use crate::config::{DatabaseConfig, DbEndpoint};
use crate::error::{ServiceError, ServiceResult};

const LIST_BY_MARKET: &str = "CALL ListarProductosPorMercado(?)";
const UPDATE_MARKET_PRICES: &str = "CALL ActualizarPreciosMercado(?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_BASE_PRODUCT: &str = "INSERT INTO Productos_franja \
     (Codigo, Producto, Cantidad_En_Caja, ficha_tecnica) VALUES (?, ?, ?, ?)";
const DELETE_BY_ID: &str = "DELETE FROM Productos_franja WHERE id = ?";
const DELETE_BY_CODE: &str = "DELETE FROM Productos_franja WHERE Codigo = ?";

/// Catalog backed by a MySQL database
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    options: MySqlConnectOptions,
}

impl MySqlCatalog {
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }

    /// Build connection options without connecting
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = match config {
            DatabaseConfig::Url(url) => url.parse::<MySqlConnectOptions>()?,
            DatabaseConfig::Credentials {
                user,
                password,
                database,
                endpoint,
            } => {
                let options = MySqlConnectOptions::new()
                    .username(user)
                    .password(password)
                    .database(database);
                match endpoint {
                    DbEndpoint::Socket(path) => options.socket(path),
                    DbEndpoint::Tcp { host, port } => options.host(host).port(*port),
                }
            }
        };
        Ok(Self::new(options))
    }

    async fn acquire(&self) -> ServiceResult<MySqlConnection> {
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(ServiceError::from)
    }
}

/// Close the connection; failures are logged and dropped
async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Connection close failed");
    }
}

#[async_trait]
impl CatalogStore for MySqlCatalog {
    async fn list_by_market(&self, market: &str) -> ServiceResult<Vec<PriceRow>> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(LIST_BY_MARKET)
            .bind(market)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        let rows = result?;
        let rows = rows
            .iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    async fn update_market_prices(&self, update: &MarketPriceUpdate) -> ServiceResult<()> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(UPDATE_MARKET_PRICES)
            .bind(&update.market)
            .bind(&update.code)
            .bind(update.dozen)
            .bind(update.case_1)
            .bind(update.case_5)
            .bind(update.case_10)
            .bind(update.case_20)
            .bind(&update.copy_text)
            .execute(&mut conn)
            .await;
        release(conn).await;

        result?;
        Ok(())
    }

    async fn create_base_product(&self, product: &BaseProductCreate) -> ServiceResult<u64> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(INSERT_BASE_PRODUCT)
            .bind(&product.code)
            .bind(&product.name)
            .bind(product.units_per_case)
            .bind(&product.technical_sheet)
            .execute(&mut conn)
            .await;
        release(conn).await;

        Ok(result?.last_insert_id())
    }

    async fn delete_product(&self, target: &DeleteTarget) -> ServiceResult<u64> {
        let query = match target {
            DeleteTarget::Id(id) => sqlx::query(DELETE_BY_ID).bind(*id),
            DeleteTarget::Code(code) => sqlx::query(DELETE_BY_CODE).bind(code),
        };

        let mut conn = self.acquire().await?;
        let result = query.execute(&mut conn).await;
        release(conn).await;

        Ok(result?.rows_affected())
    }
}
