//! Imageset curates a small image dataset used to train or fine-tune
//! generative models.
//!
//! Assets live in two filesystem collections: `originals` (immutable outputs
//! of generation) and `datasets` (curated, annotatable derivatives with
//! optional caption sidecars). The public surface is built from four parts:
//!
//! 1. **Resolve**: [`AssetId`]/[`StoreLayout`] map validated logical
//!    identifiers (`collection/filename`) to physical paths
//! 2. **Store**: [`AssetStore`] lists, reads, writes, and deletes assets and
//!    captions
//! 3. **Annotate**: [`AnnotationPipeline`] crops, tags, arrow-overlays, and
//!    batch-deletes
//! 4. **Generate**: [`GenerationService`] lands output from injected
//!    [`BackendRegistry`] backends into `originals`
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Path safety by construction**: a filename with separators or
//!   directory segments is unrepresentable in an [`AssetId`], and every
//!   filesystem path is derived by [`StoreLayout`].
//! - **Originals are immutable**: annotation over an `originals` source
//!   always derives a fresh `datasets` asset; only an arrow overlay over a
//!   `datasets` source rewrites in place.
//! - **Filesystem is the source of truth**: no in-memory cache; every call
//!   reflects the filesystem at call time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod annotate;
mod config;
mod foundation;
mod generate;
mod raster;
mod store;

pub use crate::annotate::pipeline::{AnnotationPipeline, BatchDeleteReport};
pub use crate::config::StoreConfig;
pub use crate::foundation::error::{ImagesetError, ImagesetResult};
pub use crate::generate::backend::{
    BackendKind, BackendRegistry, CaptionPrompt, ImageBackend, ImagePrompt, VisionBackend,
};
pub use crate::generate::service::GenerationService;
pub use crate::raster::codec::{
    CropRegion, crop_region, decode_rgba, encode_png, encode_png_opaque,
};
pub use crate::raster::draw::{ArrowSpec, draw_arrow};
pub use crate::store::assets::{AssetEntry, AssetStore, DeleteOutcome};
pub use crate::store::path::{ASSET_EXT, AssetId, CAPTION_EXT, Collection, StoreLayout};
