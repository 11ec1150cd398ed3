use crate::foundation::error::ImagesetResult;
use crate::generate::backend::{BackendKind, BackendRegistry, CaptionPrompt, ImagePrompt};
use crate::raster::codec;
use crate::store::assets::AssetStore;
use crate::store::path::{AssetId, Collection};

/// Lands generation-backend output in the store.
///
/// Backends produce bytes; this service owns where they go: images always
/// land in `originals` under a fresh identity, captions land as sidecars.
#[derive(Debug)]
pub struct GenerationService {
    store: AssetStore,
    backends: BackendRegistry,
}

impl GenerationService {
    /// Build a service over `store` with the injected `backends`.
    pub fn new(store: AssetStore, backends: BackendRegistry) -> Self {
        Self { store, backends }
    }

    /// Configured backend registry.
    pub fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    /// Generate one image via the `kind` backend and persist it to
    /// `originals` under a fresh identity, normalized to PNG.
    #[tracing::instrument(skip(self, prompt))]
    pub fn generate_original(
        &self,
        kind: BackendKind,
        prompt: &ImagePrompt,
    ) -> ImagesetResult<AssetId> {
        let bytes = self.backends.image(kind)?.generate_image(prompt)?;
        let img = codec::decode_rgba(&bytes)?;

        let id = AssetId::fresh(Collection::Originals);
        self.store.write(&id, &codec::encode_png(&img)?)?;
        tracing::debug!(%id, backend = %kind, "generated original landed");
        Ok(id)
    }

    /// Describe the prompt image as caption text via the vision backend.
    ///
    /// When `target` carries a logical identifier, the text is also persisted
    /// as that asset's caption sidecar; an unparseable identifier skips the
    /// sidecar silently and the text is still returned.
    pub fn caption(
        &self,
        prompt: &CaptionPrompt,
        target: Option<&str>,
    ) -> ImagesetResult<String> {
        let text = self.backends.vision()?.describe_image(prompt)?;

        if let Some(identifier) = target {
            match AssetId::parse(identifier) {
                Ok(id) => self.store.write_caption(&id, &text)?,
                Err(e) => {
                    tracing::debug!(identifier, error = %e, "caption sidecar skipped");
                }
            }
        }
        Ok(text)
    }
}
