use crate::{
    foundation::{
        axes::Axes,
        core::Size,
        error::{RenderError, RenderResult},
    },
    oracle::{BoxId, property::TextAlign},
    render::rollup::SceneState,
};

/// Resolves a background image reference for a box. `None` suppresses the image.
pub trait ImageResolver {
    fn resolve(&mut self, uri: &str, target: BoxId) -> Option<String>;
}

impl<F> ImageResolver for F
where
    F: FnMut(&str, BoxId) -> Option<String>,
{
    fn resolve(&mut self, uri: &str, target: BoxId) -> Option<String> {
        self(uri, target)
    }
}

/// Uses image references as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughImages;

impl ImageResolver for PassthroughImages {
    fn resolve(&mut self, uri: &str, _target: BoxId) -> Option<String> {
        Some(uri.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlerVerdict {
    /// Skip the offending node or value and keep rendering.
    #[default]
    Continue,
    /// Fail the whole render call.
    Abort,
}

/// Receives every non-fatal condition met while rendering.
pub trait ErrorHandler {
    fn error(&mut self, message: &str) -> HandlerVerdict;
}

impl<F> ErrorHandler for F
where
    F: FnMut(&str) -> HandlerVerdict,
{
    fn error(&mut self, message: &str) -> HandlerVerdict {
        self(message)
    }
}

/// Continues past every condition; they are still logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreErrors;

impl ErrorHandler for IgnoreErrors {
    fn error(&mut self, _message: &str) -> HandlerVerdict {
        HandlerVerdict::Continue
    }
}

/// Keeps reported messages and always continues.
#[derive(Clone, Debug, Default)]
pub struct CollectErrors {
    pub messages: Vec<String>,
}

impl ErrorHandler for CollectErrors {
    fn error(&mut self, message: &str) -> HandlerVerdict {
        self.messages.push(message.to_string());
        HandlerVerdict::Continue
    }
}

/// Caller-facing render configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Root container size; `None` uses the oracle's surface size.
    pub dimensions: Option<Size>,
    /// Hide content whose `forcedDisplay` is false.
    pub display_forced_only: bool,
    pub enable_roll_up: bool,
}

/// Line-level effects active for the paragraph being built.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Effects {
    pub line_padding: Option<f64>,
    pub multi_row_align: Option<TextAlign>,
    pub fill_line_gap: bool,
}

impl Effects {
    pub fn is_active(&self) -> bool {
        self.line_padding.is_some() || self.multi_row_align.is_some() || self.fill_line_gap
    }
}

/// Mutable state of one render call.
pub(crate) struct RenderContext<'a> {
    pub width: f64,
    pub height: f64,
    /// Pixel extent of the region being built, recorded by the extent mapping.
    pub region_extent: Option<Size>,
    pub axes: Axes,
    pub effects: Effects,
    pub display_forced_only: bool,
    pub enable_roll_up: bool,
    pub previous: Option<&'a SceneState>,
    pub current: SceneState,
    /// Whether the current region needs paragraph lines for roll-up.
    pub tracks_lines: bool,
    images: &'a mut dyn ImageResolver,
    errors: &'a mut dyn ErrorHandler,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        size: Size,
        options: &RenderOptions,
        previous: Option<&'a SceneState>,
        images: &'a mut dyn ImageResolver,
        errors: &'a mut dyn ErrorHandler,
    ) -> Self {
        Self {
            width: size.width,
            height: size.height,
            region_extent: None,
            axes: Axes::default(),
            effects: Effects::default(),
            display_forced_only: options.display_forced_only,
            enable_roll_up: options.enable_roll_up,
            previous,
            current: SceneState::next(previous),
            tracks_lines: false,
            images,
            errors,
        }
    }

    /// Route a non-fatal condition through the error handler.
    pub fn report(&mut self, message: impl AsRef<str>) -> RenderResult<()> {
        let message = message.as_ref();
        tracing::warn!(message, "render condition reported");
        match self.errors.error(message) {
            HandlerVerdict::Continue => Ok(()),
            HandlerVerdict::Abort => Err(RenderError::aborted(message)),
        }
    }

    pub fn resolve_image(&mut self, uri: &str, target: BoxId) -> Option<String> {
        self.images.resolve(uri, target)
    }

    pub fn to_px(&self, length: crate::foundation::core::Length) -> f64 {
        length.to_px(self.width, self.height)
    }
}
