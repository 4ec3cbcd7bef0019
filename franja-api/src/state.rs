//! Application state
//!
//! Holds only the two collaborator handles. Neither keeps per-request
//! data, so concurrent requests never share mutable state.

use std::sync::Arc;

use crate::auth::{CredentialVerifier, HttpCredentialVerifier};
use crate::config::Config;
use crate::db::{CatalogStore, MySqlCatalog};
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog database access
    pub catalog: Arc<dyn CatalogStore>,
    /// Token verification service
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            catalog,
            credentials,
        }
    }

    /// Build the production collaborators; no connection is opened here
    pub fn from_config(config: &Config) -> Result<Self, BoxError> {
        let catalog = MySqlCatalog::from_config(&config.database)
            .map_err(|e| format!("invalid database configuration: {e}"))?;
        let credentials = HttpCredentialVerifier::new(
            config.token_verify_url.clone(),
            config.token_verify_timeout,
        )?;
        Ok(Self::new(Arc::new(catalog), Arc::new(credentials)))
    }
}
