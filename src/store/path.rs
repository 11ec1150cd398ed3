use std::path::{Path, PathBuf};

use crate::foundation::error::{ImagesetError, ImagesetResult};

/// File extension used for caption sidecars.
pub const CAPTION_EXT: &str = "txt";

/// File extension used for stored raster assets.
pub const ASSET_EXT: &str = "png";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// One of the two fixed asset partitions.
pub enum Collection {
    /// Immutable outputs of generation; never rewritten in place.
    Originals,
    /// Curated derivatives; annotatable and taggable.
    Datasets,
}

impl Collection {
    /// Both collections, in listing order.
    pub const ALL: [Collection; 2] = [Collection::Originals, Collection::Datasets];

    /// Parse a collection name from the closed set `{originals, datasets}`.
    pub fn parse(name: &str) -> ImagesetResult<Self> {
        match name {
            "originals" => Ok(Self::Originals),
            "datasets" => Ok(Self::Datasets),
            other => Err(ImagesetError::invalid_identifier(format!(
                "unknown collection '{other}'"
            ))),
        }
    }

    /// Directory name of this collection under the storage root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Originals => "originals",
            Self::Datasets => "datasets",
        }
    }

    /// Whether an annotation over a member of this collection writes back in
    /// place instead of deriving a fresh asset.
    ///
    /// `Originals` members are immutable; annotating one always lands the
    /// result in `Datasets` under a new identity.
    pub fn annotates_in_place(self) -> bool {
        matches!(self, Self::Datasets)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for Collection {
    type Err = ImagesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Validated `(collection, filename)` identity of a stored asset.
///
/// The filename is always a single path component: constructors reject
/// separators and directory segments, so an `AssetId` can never resolve
/// outside its collection root.
pub struct AssetId {
    collection: Collection,
    filename: String,
}

impl AssetId {
    /// Build an identity from parts, validating the filename component.
    pub fn new(collection: Collection, filename: impl Into<String>) -> ImagesetResult<Self> {
        let filename = filename.into();
        validate_filename(&filename)?;
        Ok(Self {
            collection,
            filename,
        })
    }

    /// Parse a logical identifier of the form `{collection}/{filename}`.
    ///
    /// Exactly one `/` separator, two non-empty parts, and a recognized
    /// collection name are required.
    pub fn parse(identifier: &str) -> ImagesetResult<Self> {
        let parts: Vec<&str> = identifier.split('/').collect();
        let [collection, filename] = parts.as_slice() else {
            return Err(ImagesetError::invalid_identifier(format!(
                "expected '{{collection}}/{{filename}}', got '{identifier}'"
            )));
        };
        if collection.is_empty() || filename.is_empty() {
            return Err(ImagesetError::invalid_identifier(format!(
                "expected '{{collection}}/{{filename}}', got '{identifier}'"
            )));
        }
        Self::new(Collection::parse(collection)?, *filename)
    }

    /// Mint a fresh identity in `collection` with a globally-unique filename.
    ///
    /// Derived assets always use a fresh identity; source filenames are never
    /// reused.
    pub fn fresh(collection: Collection) -> Self {
        Self {
            collection,
            filename: format!("{}.{ASSET_EXT}", uuid::Uuid::new_v4()),
        }
    }

    /// Collection this asset belongs to.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Filename component within the collection directory.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Sidecar filename for this asset's caption: last extension stripped,
    /// caption extension appended.
    pub fn caption_filename(&self) -> String {
        let stem = self
            .filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.filename);
        format!("{stem}.{CAPTION_EXT}")
    }

    /// Logical path of this asset's caption sidecar.
    pub fn caption_identifier(&self) -> String {
        format!("{}/{}", self.collection, self.caption_filename())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.filename)
    }
}

fn validate_filename(name: &str) -> ImagesetResult<()> {
    if name.is_empty() {
        return Err(ImagesetError::invalid_identifier(
            "filename must be non-empty",
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ImagesetError::invalid_identifier(format!(
            "filename '{name}' must be a single path component"
        )));
    }
    if name == "." || name == ".." {
        return Err(ImagesetError::invalid_identifier(format!(
            "filename '{name}' must not be a directory segment"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug)]
/// Physical layout of the two collection directories under a storage root.
///
/// Every filesystem path in the crate is derived here, which is what keeps
/// the sandboxing guarantee auditable.
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    /// Build a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a collection's assets.
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.dir_name())
    }

    /// Physical path of an asset.
    pub fn asset_path(&self, id: &AssetId) -> PathBuf {
        self.collection_dir(id.collection()).join(id.filename())
    }

    /// Physical path of an asset's caption sidecar.
    pub fn caption_path(&self, id: &AssetId) -> PathBuf {
        self.collection_dir(id.collection())
            .join(id.caption_filename())
    }
}
