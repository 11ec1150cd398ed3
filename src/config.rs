use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::ImagesetResult;
use crate::generate::backend::BackendKind;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Store configuration, loadable from a JSON file.
pub struct StoreConfig {
    /// Storage root holding the `originals/` and `datasets/` directories.
    pub root: PathBuf,
    /// Image backend used when a request does not name one.
    pub default_backend: BackendKind,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("storage"),
            default_backend: BackendKind::Gemini,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn from_path(path: &Path) -> ImagesetResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let config = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        Ok(config)
    }
}
