//! JSON file route store.
//!
//! Stores routes and traces as pretty-printed JSON files under a root
//! directory: `routes/<name>.json` and `traces/<name>.json`.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use turnstep_core::{LocationTrace, Route};
use super::{validate_name, Result, RouteStore, StorageError};

/// File-based JSON route store.
pub struct JsonRouteStore {
    root: PathBuf,
}

impl JsonRouteStore {
    /// Open a store, creating the `routes/` and `traces/` directories.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("routes")).await?;
        fs::create_dir_all(root.join("traces")).await?;

        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn route_path(&self, name: &str) -> PathBuf {
        self.root.join("routes").join(format!("{}.json", name))
    }

    fn trace_path(&self, name: &str) -> PathBuf {
        self.root.join("traces").join(format!("{}.json", name))
    }

    async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json.as_bytes()).await?;
        Ok(())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        match fs::read_to_string(path).await {
            Ok(s) => Ok(Some(serde_json::from_str(&s)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl RouteStore for JsonRouteStore {
    async fn save_route(&mut self, name: &str, route: &Route) -> Result<()> {
        validate_name(name)?;
        Self::write_json(&self.route_path(name), route).await?;
        debug!("Saved route {} ({} steps)", name, route.steps.len());
        Ok(())
    }

    async fn load_route(&self, name: &str) -> Result<Option<Route>> {
        validate_name(name)?;
        Self::read_json(&self.route_path(name)).await
    }

    async fn list_routes(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(self.root.join("routes")).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn delete_route(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        match fs::remove_file(self.route_path(name)).await {
            Ok(()) => {
                debug!("Deleted route {}", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("route {}", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save_trace(&mut self, name: &str, trace: &LocationTrace) -> Result<()> {
        validate_name(name)?;
        Self::write_json(&self.trace_path(name), trace).await?;
        debug!("Saved trace {} ({} fixes)", name, trace.len());
        Ok(())
    }

    async fn load_trace(&self, name: &str) -> Result<Option<LocationTrace>> {
        validate_name(name)?;
        Self::read_json(&self.trace_path(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstep_core::{Coordinate, RouteStep};

    fn sample_route() -> Route {
        let anchor = |lat: f64| Coordinate::new(lat, -122.0).unwrap();
        Route::new(vec![
            RouteStep::new(500.0, "Turn right", anchor(37.0)),
            RouteStep::new(0.0, "Arrive", anchor(37.01)),
        ])
        .with_name("Ferry Building")
    }

    #[tokio::test]
    async fn test_save_and_load_route() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRouteStore::new(dir.path()).await.unwrap();

        store.save_route("ferry", &sample_route()).await.unwrap();
        let loaded = store.load_route("ferry").await.unwrap();

        assert_eq!(loaded, Some(sample_route()));
        assert!(dir.path().join("routes").join("ferry.json").exists());
    }

    #[tokio::test]
    async fn test_missing_route_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRouteStore::new(dir.path()).await.unwrap();

        assert!(store.load_route("nowhere").await.unwrap().is_none());
        assert!(store.load_trace("nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_delete_routes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRouteStore::new(dir.path()).await.unwrap();

        store.save_route("work", &sample_route()).await.unwrap();
        store.save_route("home", &sample_route()).await.unwrap();
        assert_eq!(store.list_routes().await.unwrap(), vec!["home", "work"]);

        store.delete_route("home").await.unwrap();
        assert_eq!(store.list_routes().await.unwrap(), vec!["work"]);

        let err = store.delete_route("home").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRouteStore::new(dir.path()).await.unwrap();

        let err = store.save_route("../escape", &sample_route()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_trace_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRouteStore::new(dir.path()).await.unwrap();

        let trace = LocationTrace::from_coordinates(vec![
            Coordinate::new(37.0, -122.0).unwrap(),
            Coordinate::new(37.005, -122.0).unwrap(),
        ]);
        store.save_trace("commute", &trace).await.unwrap();

        assert_eq!(store.load_trace("commute").await.unwrap(), Some(trace));
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRouteStore::new(dir.path()).await.unwrap();
        std::fs::write(dir.path().join("routes").join("broken.json"), "{ not json").unwrap();

        let err = store.load_route("broken").await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_route_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRouteStore::new(dir.path()).await.unwrap();
        let bad = r#"{"steps": [{"distance_meters": -500.0, "instruction": "Turn right",
            "anchor": {"latitude": 200.0, "longitude": -999.0}}]}"#;
        std::fs::write(dir.path().join("routes").join("bad.json"), bad).unwrap();

        let err = store.load_route("bad").await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
