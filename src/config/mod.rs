mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File names probed for in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["batch.yml", "batch.yaml"];

/// Locate the batch config file in `dir`.
pub fn locate_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load and parse a batch config file.
pub fn load_config(path: &Path) -> Result<BatchFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let batch: BatchFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(batch)
}
