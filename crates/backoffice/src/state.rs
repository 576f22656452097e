//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Handlers only see repository trait objects, so the
//! storage backend stays swappable.

use std::sync::Arc;

use axum::extract::FromRef;

use backoffice_core::auth::{StaticTokenVerifier, TokenVerifier};
use backoffice_core::storage::{
    CompetitorRepository, CustomerRepository, HealthCheck, OrderRepository, ProductRepository,
};

use crate::config::Config;
use crate::storage::SqliteRepository;

/// Token verification seam used by the `RequestContext` extractor.
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including repository trait objects for database access.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub competitors: Arc<dyn CompetitorRepository>,
    pub health: Arc<dyn HealthCheck>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Wires every repository to one SQLite store.
    pub fn build(repo: Arc<SqliteRepository>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            orders: repo.clone(),
            products: repo.clone(),
            customers: repo.clone(),
            competitors: repo.clone(),
            health: repo,
            auth: AuthState { verifier },
        }
    }

    /// Opens the database at `config.database_path` and loads the token
    /// table from `config.api_tokens`.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let repo = SqliteRepository::new(&config.database_path).await?;
        let verifier = StaticTokenVerifier::from_table(&config.api_tokens)?;

        if verifier.is_empty() {
            tracing::warn!("API_TOKENS is empty; every admin request will be rejected");
        }

        tracing::info!(
            path = %config.database_path,
            tokens = verifier.len(),
            "Using SQLite storage"
        );

        Ok(Self::build(Arc::new(repo), Arc::new(verifier)))
    }

    /// In-memory database with the given token table.
    #[cfg(test)]
    pub async fn in_memory(verifier: StaticTokenVerifier) -> Self {
        let repo = SqliteRepository::new_in_memory()
            .await
            .expect("in-memory database should open");
        Self::build(Arc::new(repo), Arc::new(verifier))
    }
}
