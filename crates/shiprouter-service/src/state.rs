//! Shared application state for axum handlers.

use std::path::Path;
use std::sync::Arc;

use shiprouter_lib::{resolve_data_dir, Grid, GridStore, Resolution};

/// Grid store shared by every handler.
///
/// Cheap to clone. The service starts even when the raster is missing so
/// that probes can report why it is not ready; route requests then answer
/// with a 500 problem.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    resolution: Resolution,
    store: Result<GridStore, String>,
}

impl AppState {
    /// Load the grid for `resolution` from the resolved data directory.
    pub fn load(data_dir: Option<&Path>, resolution: Resolution) -> Self {
        let store = resolve_data_dir(data_dir)
            .and_then(|dir| GridStore::load(&dir, resolution))
            .map_err(|err| err.to_string());

        match &store {
            Ok(store) => {
                let (rows, cols) = store.grid().shape();
                tracing::info!(
                    path = %store.path().display(),
                    rows,
                    cols,
                    "grid loaded"
                );
            }
            Err(reason) => {
                tracing::error!(resolution = %resolution, error = %reason, "grid not loaded");
            }
        }

        Self {
            inner: Arc::new(AppStateInner { resolution, store }),
        }
    }

    pub fn from_store(store: GridStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                resolution: store.resolution(),
                store: Ok(store),
            }),
        }
    }

    /// State without a raster; every route request fails with `reason`.
    pub fn unloaded(resolution: Resolution, reason: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                resolution,
                store: Err(reason.into()),
            }),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.inner.resolution
    }

    /// Snapshot of the current grid, or the reason it is unavailable.
    pub fn grid(&self) -> Result<Arc<Grid>, &str> {
        match &self.inner.store {
            Ok(store) => Ok(store.grid()),
            Err(reason) => Err(reason.as_str()),
        }
    }

    pub fn store(&self) -> Option<&GridStore> {
        self.inner.store.as_ref().ok()
    }
}
