use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Resolution;

/// Environment variable that overrides the grid data directory.
pub const DATA_DIR_ENV: &str = "SHIPROUTER_DATA_DIR";

/// Resolve the default grid directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "shiprouter", "shiprouter")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join("grids"))
}

/// Resolve the directory holding `land_water_grid_*.json` files.
///
/// Order: explicit `target`, then `SHIPROUTER_DATA_DIR`, then the platform
/// data directory.
pub fn resolve_data_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = target {
        debug!(path = %path.display(), "using explicit grid directory");
        return Ok(path.to_path_buf());
    }

    if let Some(value) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), "using grid directory from {DATA_DIR_ENV}");
        return Ok(path);
    }

    default_data_dir()
}

/// Full path of the raster file for `resolution` inside `data_dir`.
pub fn grid_file_path(data_dir: &Path, resolution: Resolution) -> PathBuf {
    data_dir.join(resolution.file_name())
}
