//! Routing providers.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use turnstep_core::Route;
use turnstep_storage::RouteStore;

use crate::SessionError;

/// Supplies a computed route for a destination.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Resolve `destination` into an ordered route.
    async fn route(&self, destination: &str) -> Result<Route, SessionError>;
}

/// Resolves destinations by name from a route store.
pub struct StoredRouteProvider<S: RouteStore> {
    store: Arc<RwLock<S>>,
}

impl<S: RouteStore> StoredRouteProvider<S> {
    /// Create a provider over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl<S: RouteStore + 'static> RoutingProvider for StoredRouteProvider<S> {
    async fn route(&self, destination: &str) -> Result<Route, SessionError> {
        let store = self.store.read().await;
        let route = store
            .load_route(destination)
            .await?
            .ok_or_else(|| SessionError::RouteNotFound(destination.to_string()))?;

        if route.is_empty() {
            return Err(turnstep_core::NavError::InvalidRoute.into());
        }
        Ok(route)
    }
}
