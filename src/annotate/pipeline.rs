use crate::foundation::error::ImagesetResult;
use crate::raster::codec::{self, CropRegion};
use crate::raster::draw::{self, ArrowSpec};
use crate::store::assets::{AssetStore, DeleteOutcome};
use crate::store::path::{AssetId, Collection};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Result of a batch deletion. Every input identifier lands in exactly one
/// list, input order preserved within each.
pub struct BatchDeleteReport {
    /// Identifiers whose assets were unlinked.
    pub deleted: Vec<String>,
    /// Identifiers that failed to parse, resolve, or unlink.
    pub failed: Vec<String>,
}

#[derive(Clone, Debug)]
/// The stateful operations available to an operator: crop, tag, arrow
/// overlay, and batch deletion.
///
/// Each operation reads one source asset and persists its result through the
/// store; whether the result overwrites or derives a new asset is decided
/// here and nowhere else.
pub struct AnnotationPipeline {
    store: AssetStore,
}

impl AnnotationPipeline {
    /// Build a pipeline over `store`.
    pub fn new(store: AssetStore) -> Self {
        Self { store }
    }

    /// Store this pipeline persists through.
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Crop a region out of `source` into a fresh `datasets` asset.
    ///
    /// The source must exist and is left untouched; crop never overwrites.
    /// The region is handed to the crop primitive as-is, so its clamping at
    /// the image bounds is inherited. Returns the derived identity.
    #[tracing::instrument(skip(self))]
    pub fn crop(&self, source: &AssetId, region: CropRegion) -> ImagesetResult<AssetId> {
        let bytes = self.store.read(source)?;
        let img = codec::decode_rgba(&bytes)?;
        let cropped = codec::crop_region(&img, region);

        let derived = AssetId::fresh(Collection::Datasets);
        self.store.write(&derived, &codec::encode_png(&cropped)?)?;
        Ok(derived)
    }

    /// Write `text` as `target`'s caption sidecar, replacing any previous
    /// caption. Returns the caption's logical path.
    ///
    /// The target asset is not required to exist; tagging an absent asset
    /// writes an orphan caption.
    pub fn tag(&self, target: &AssetId, text: &str) -> ImagesetResult<String> {
        self.store.write_caption(target, text)?;
        Ok(target.caption_identifier())
    }

    /// Draw a directional arrow over `source` and persist the result as an
    /// opaque PNG.
    ///
    /// Placement follows the source collection: an `originals` source derives
    /// a fresh `datasets` asset (originals stay immutable), a `datasets`
    /// source is overwritten in place. Returns the identity the result
    /// landed under.
    #[tracing::instrument(skip(self))]
    pub fn arrow_overlay(&self, source: &AssetId, arrow: ArrowSpec) -> ImagesetResult<AssetId> {
        let bytes = self.store.read(source)?;
        let mut img = codec::decode_rgba(&bytes)?;
        draw::draw_arrow(&mut img, arrow);
        let encoded = codec::encode_png_opaque(&img)?;

        let target = if source.collection().annotates_in_place() {
            source.clone()
        } else {
            AssetId::fresh(Collection::Datasets)
        };
        tracing::debug!(%source, %target, "arrow overlay placement");
        self.store.write(&target, &encoded)?;
        Ok(target)
    }

    /// Delete every identifier in `identifiers`, best-effort.
    ///
    /// One bad identifier never prevents processing of the rest: parse
    /// failures, missing assets, and unlink failures are all recorded as
    /// failed and the batch continues. Caption sidecars are not removed.
    pub fn delete_batch(&self, identifiers: &[String]) -> BatchDeleteReport {
        let mut report = BatchDeleteReport::default();
        for identifier in identifiers {
            let Ok(id) = AssetId::parse(identifier) else {
                report.failed.push(identifier.clone());
                continue;
            };
            match self.store.delete(&id) {
                DeleteOutcome::Deleted => report.deleted.push(identifier.clone()),
                DeleteOutcome::Missing | DeleteOutcome::Failed => {
                    report.failed.push(identifier.clone())
                }
            }
        }
        report
    }
}
