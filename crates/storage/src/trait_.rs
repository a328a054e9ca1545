//! Route store trait abstraction.

use async_trait::async_trait;
use turnstep_core::{LocationTrace, Route};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Name is not usable as a file stem
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage for named routes and recorded location traces.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait RouteStore: Send + Sync {
    // === Route operations ===

    /// Save a route (create or replace).
    async fn save_route(&mut self, name: &str, route: &Route) -> Result<()>;

    /// Load a route by name.
    async fn load_route(&self, name: &str) -> Result<Option<Route>>;

    /// List stored route names, sorted.
    async fn list_routes(&self) -> Result<Vec<String>>;

    /// Delete a route. Deleting a missing route is an error.
    async fn delete_route(&mut self, name: &str) -> Result<()>;

    // === Trace operations ===

    /// Save a location trace (create or replace).
    async fn save_trace(&mut self, name: &str, trace: &LocationTrace) -> Result<()>;

    /// Load a location trace by name.
    async fn load_trace(&self, name: &str) -> Result<Option<LocationTrace>>;
}

/// Check that `name` is safe to use as a file stem.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("ferry-building_2").is_ok());
        assert!(matches!(validate_name(""), Err(StorageError::InvalidName(_))));
        assert!(validate_name("../etc/passwd").is_err());
        assert!(validate_name("two words").is_err());
    }
}
