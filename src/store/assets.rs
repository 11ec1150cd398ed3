use crate::foundation::error::{ImagesetError, ImagesetResult};
use crate::store::path::{ASSET_EXT, AssetId, Collection, StoreLayout};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One listing entry: an asset filename plus its caption state.
pub struct AssetEntry {
    /// Filename within the collection directory.
    pub filename: String,
    /// Whether a caption sidecar exists. Only ever `true` for
    /// [`Collection::Datasets`] entries.
    pub has_caption: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of a single best-effort deletion.
pub enum DeleteOutcome {
    /// The asset existed and was unlinked.
    Deleted,
    /// No asset at the resolved path.
    Missing,
    /// The unlink failed at the storage layer.
    Failed,
}

#[derive(Clone, Debug)]
/// Collection-scoped persistence for image assets and caption sidecars.
///
/// Stateless between calls: every operation reflects the filesystem at call
/// time. All paths come from the owned [`StoreLayout`].
pub struct AssetStore {
    layout: StoreLayout,
}

impl AssetStore {
    /// Build a store over the given storage root.
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            layout: StoreLayout::new(root),
        }
    }

    /// Path layout used by this store.
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// List a collection's image assets, sorted by filename.
    ///
    /// A missing collection directory yields an empty list. Caption state is
    /// reported for `datasets` entries; `originals` are never taggable.
    pub fn list(&self, collection: Collection) -> ImagesetResult<Vec<AssetEntry>> {
        let dir = self.layout.collection_dir(collection);
        let Ok(rd) = std::fs::read_dir(&dir) else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            if !ext.eq_ignore_ascii_case(ASSET_EXT) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };

            let id = AssetId::new(collection, filename)?;
            let has_caption =
                collection == Collection::Datasets && self.layout.caption_path(&id).exists();
            entries.push(AssetEntry {
                filename: filename.to_string(),
                has_caption,
            });
        }

        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(entries)
    }

    /// Whether an asset currently exists.
    pub fn exists(&self, id: &AssetId) -> bool {
        self.layout.asset_path(id).exists()
    }

    /// Read an asset's encoded bytes. Fails with `NotFound` when absent.
    pub fn read(&self, id: &AssetId) -> ImagesetResult<Vec<u8>> {
        let path = self.layout.asset_path(id);
        if !path.exists() {
            return Err(ImagesetError::not_found(id.to_string()));
        }
        std::fs::read(&path)
            .map_err(|e| ImagesetError::io(format!("read asset '{}': {e}", path.display())))
    }

    /// Write an asset's encoded bytes, creating the collection directory as
    /// needed. Overwrites silently; callers pick a fresh identity when
    /// overwrite is not intended.
    pub fn write(&self, id: &AssetId, bytes: &[u8]) -> ImagesetResult<()> {
        let path = self.layout.asset_path(id);
        self.ensure_collection_dir(id.collection())?;
        std::fs::write(&path, bytes)
            .map_err(|e| ImagesetError::io(format!("write asset '{}': {e}", path.display())))
    }

    /// Write (or overwrite) an asset's caption sidecar.
    ///
    /// The asset itself is not required to exist.
    pub fn write_caption(&self, id: &AssetId, text: &str) -> ImagesetResult<()> {
        let path = self.layout.caption_path(id);
        self.ensure_collection_dir(id.collection())?;
        std::fs::write(&path, text)
            .map_err(|e| ImagesetError::io(format!("write caption '{}': {e}", path.display())))
    }

    /// Read an asset's caption sidecar, if one exists.
    pub fn read_caption(&self, id: &AssetId) -> ImagesetResult<Option<String>> {
        let path = self.layout.caption_path(id);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ImagesetError::io(format!("read caption '{}': {e}", path.display())))
    }

    /// Best-effort unlink of an asset, reporting the outcome instead of
    /// erroring. Caption sidecars are left in place.
    pub fn delete(&self, id: &AssetId) -> DeleteOutcome {
        let path = self.layout.asset_path(id);
        if !path.exists() {
            return DeleteOutcome::Missing;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to unlink asset");
                DeleteOutcome::Failed
            }
        }
    }

    fn ensure_collection_dir(&self, collection: Collection) -> ImagesetResult<()> {
        let dir = self.layout.collection_dir(collection);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ImagesetError::io(format!("create collection dir '{}': {e}", dir.display())))
    }
}
