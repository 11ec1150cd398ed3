use crate::foundation::error::{ImagesetError, ImagesetResult};

#[derive(Clone, Debug, Default)]
/// Prompts for producing one new image.
///
/// With no references this is a text-to-image request; with references it is
/// image-to-image conditioning.
pub struct ImagePrompt {
    /// System prompt given to the backend.
    pub system_prompt: String,
    /// User prompt given to the backend.
    pub user_prompt: String,
    /// Encoded reference images, in request order.
    pub references: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, Default)]
/// Prompts for describing one image as caption text.
pub struct CaptionPrompt {
    /// System prompt given to the backend.
    pub system_prompt: String,
    /// User prompt given to the backend.
    pub user_prompt: String,
    /// Encoded image to describe.
    pub image: Vec<u8>,
}

/// An external provider that turns prompts (and optional reference images)
/// into one encoded image.
///
/// Implementations are long-running, resource-heavy model instances; the
/// core neither queues nor serializes concurrent requests.
pub trait ImageBackend: Send + Sync {
    /// Produce one encoded image from the prompt.
    fn generate_image(&self, prompt: &ImagePrompt) -> ImagesetResult<Vec<u8>>;
}

/// An external provider that turns an image plus prompts into caption text.
pub trait VisionBackend: Send + Sync {
    /// Produce caption text describing the prompt image.
    fn describe_image(&self, prompt: &CaptionPrompt) -> ImagesetResult<String>;
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Closed set of image-backend slots a request can address.
pub enum BackendKind {
    /// Hosted multimodal backend; the default.
    #[default]
    Gemini,
    /// Local diffusion backend.
    Flux,
}

impl BackendKind {
    /// Stable lowercase name of this slot.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Flux => "flux",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ImagesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(Self::Gemini),
            "flux" => Ok(Self::Flux),
            other => Err(ImagesetError::backend(format!(
                "unknown backend '{other}'"
            ))),
        }
    }
}

#[derive(Default)]
/// Explicitly-owned backend instances, injected once at startup.
///
/// Dispatch is a `match` over the [`BackendKind`] slots; addressing an
/// unconfigured slot is an error, never a fallback to another backend.
pub struct BackendRegistry {
    gemini: Option<Box<dyn ImageBackend>>,
    flux: Option<Box<dyn ImageBackend>>,
    vision: Option<Box<dyn VisionBackend>>,
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("gemini", &self.gemini.is_some())
            .field("flux", &self.flux.is_some())
            .field("vision", &self.vision.is_some())
            .finish()
    }
}

impl BackendRegistry {
    /// Empty registry with no backends configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an image backend into the `kind` slot.
    pub fn with_image(mut self, kind: BackendKind, backend: Box<dyn ImageBackend>) -> Self {
        match kind {
            BackendKind::Gemini => self.gemini = Some(backend),
            BackendKind::Flux => self.flux = Some(backend),
        }
        self
    }

    /// Install the vision-to-text backend.
    pub fn with_vision(mut self, backend: Box<dyn VisionBackend>) -> Self {
        self.vision = Some(backend);
        self
    }

    /// Image backend in the `kind` slot.
    pub fn image(&self, kind: BackendKind) -> ImagesetResult<&dyn ImageBackend> {
        let slot = match kind {
            BackendKind::Gemini => &self.gemini,
            BackendKind::Flux => &self.flux,
        };
        slot.as_deref()
            .ok_or_else(|| ImagesetError::backend(format!("no '{kind}' image backend configured")))
    }

    /// The vision-to-text backend.
    pub fn vision(&self) -> ImagesetResult<&dyn VisionBackend> {
        self.vision
            .as_deref()
            .ok_or_else(|| ImagesetError::backend("no vision backend configured"))
    }
}
