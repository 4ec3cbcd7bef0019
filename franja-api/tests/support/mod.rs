//! In-memory collaborators and request helpers for endpoint tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use franja_api::auth::{AuthVerdict, CredentialVerifier};
use franja_api::db::CatalogStore;
use franja_api::error::{ServiceError, ServiceResult};
use franja_api::{AppState, build_app};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::{BaseProductCreate, DeleteTarget, MarketPriceUpdate, PriceRow};
use tower::ServiceExt;

pub const TOKEN: &str = "Bearer good-token";

#[derive(Debug, Clone)]
struct Product {
    id: u64,
    code: String,
    name: String,
    units_per_case: i64,
}

#[derive(Default)]
struct CatalogData {
    products: Vec<Product>,
    prices: BTreeMap<(String, String), MarketPriceUpdate>,
    next_id: u64,
    fail_with: Option<String>,
}

/// Catalog held in memory; listing joins prices with products
#[derive(Default)]
pub struct FakeCatalog {
    data: Mutex<CatalogData>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails with a database error carrying `message`
    pub fn failing(message: &str) -> Arc<Self> {
        let catalog = Self::default();
        catalog.lock().fail_with = Some(message.to_string());
        Arc::new(catalog)
    }

    pub fn with_product(self: Arc<Self>, code: &str, name: &str) -> Arc<Self> {
        {
            let mut data = self.lock();
            data.next_id += 1;
            let id = data.next_id;
            data.products.push(Product {
                id,
                code: code.to_string(),
                name: name.to_string(),
                units_per_case: 12,
            });
        }
        self
    }

    pub fn with_price(self: Arc<Self>, market: &str, code: &str, dozen: i64) -> Arc<Self> {
        let update = MarketPriceUpdate {
            market: market.to_string(),
            code: code.to_string(),
            dozen: dozen.into(),
            case_1: (dozen * 10).into(),
            case_5: (dozen * 48).into(),
            case_10: (dozen * 95).into(),
            case_20: (dozen * 180).into(),
            copy_text: None,
        };
        self.lock()
            .prices
            .insert((market.to_string(), code.to_string()), update);
        self
    }

    pub fn id_of(&self, code: &str) -> Option<u64> {
        self.lock()
            .products
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.id)
    }

    pub fn price_of(&self, market: &str, code: &str) -> Option<MarketPriceUpdate> {
        self.lock()
            .prices
            .get(&(market.to_string(), code.to_string()))
            .cloned()
    }

    pub fn price_count(&self) -> usize {
        self.lock().prices.len()
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    /// Store calls of any kind
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Store calls that would have modified data
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogData> {
        self.data.lock().unwrap()
    }

    fn enter(&self, write: bool) -> ServiceResult<std::sync::MutexGuard<'_, CatalogData>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if write {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        let data = self.lock();
        match &data.fail_with {
            Some(message) => Err(ServiceError::Db(message.clone().into())),
            None => Ok(data),
        }
    }
}

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn list_by_market(&self, market: &str) -> ServiceResult<Vec<PriceRow>> {
        let data = self.enter(false)?;
        let rows = data
            .products
            .iter()
            .filter_map(|p| {
                let price = data.prices.get(&(market.to_string(), p.code.clone()))?;
                let row = json!({
                    "id": p.id,
                    "Codigo": p.code,
                    "Producto": p.name,
                    "Cantidad_En_Caja": p.units_per_case,
                    "Docena": price.dozen.to_string(),
                    "Caja_1": price.case_1.to_string(),
                    "Caja_5": price.case_5.to_string(),
                    "Caja_10": price.case_10.to_string(),
                    "Caja_20": price.case_20.to_string(),
                    "Texto_Copiar": price.copy_text,
                });
                match row {
                    Value::Object(map) => Some(map),
                    _ => None,
                }
            })
            .collect();
        Ok(rows)
    }

    async fn update_market_prices(&self, update: &MarketPriceUpdate) -> ServiceResult<()> {
        let mut data = self.enter(true)?;
        data.prices
            .insert((update.market.clone(), update.code.clone()), update.clone());
        Ok(())
    }

    async fn create_base_product(&self, product: &BaseProductCreate) -> ServiceResult<u64> {
        let mut data = self.enter(true)?;
        data.next_id += 1;
        let id = data.next_id;
        data.products.push(Product {
            id,
            code: product.code.clone(),
            name: product.name.clone(),
            units_per_case: product.units_per_case,
        });
        Ok(id)
    }

    async fn delete_product(&self, target: &DeleteTarget) -> ServiceResult<u64> {
        let mut data = self.enter(true)?;
        let (removed, kept): (Vec<Product>, Vec<Product>) =
            data.products.drain(..).partition(|p| match target {
                DeleteTarget::Id(id) => p.id == *id,
                DeleteTarget::Code(code) => &p.code == code,
            });
        data.products = kept;
        for product in &removed {
            data.prices.retain(|(_, code), _| code != &product.code);
        }
        Ok(removed.len() as u64)
    }
}

/// Verifier with a fixed answer that records what it was shown
pub struct FakeVerifier {
    verdict: AuthVerdict,
    calls: AtomicUsize,
    last_header: Mutex<Option<String>>,
}

impl FakeVerifier {
    pub fn new(verdict: AuthVerdict) -> Arc<Self> {
        Arc::new(Self {
            verdict,
            calls: AtomicUsize::new(0),
            last_header: Mutex::new(None),
        })
    }

    pub fn accepting() -> Arc<Self> {
        Self::new(AuthVerdict::Authenticated)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_header(&self) -> Option<String> {
        self.last_header.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialVerifier for FakeVerifier {
    async fn verify(&self, authorization: &HeaderValue) -> AuthVerdict {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_header.lock().unwrap() = authorization.to_str().ok().map(str::to_string);
        self.verdict
    }
}

pub fn app(catalog: Arc<FakeCatalog>, verifier: Arc<FakeVerifier>) -> Router {
    build_app(AppState::new(catalog, verifier))
}

/// Collected response
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(AUTHORIZATION, TOKEN)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header(AUTHORIZATION, TOKEN)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub fn bare(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
