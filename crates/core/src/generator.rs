//! Front-end state for the input → submit → download flow.
//!
//! Front ends own one `Generator` and forward user events to it; the
//! generator applies the input-layer clamp, validates on submit and calls
//! the shared [`Renderer`] for both preview and download.

use log::{debug, info, warn};
use placeholdr_protocol::RenderTheme;
use thiserror::Error;

use crate::dimensions::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Dimensions, Rejection, clamp_input};
use crate::export::{self, ExportError};
use crate::raster::RenderError;
use crate::render::Renderer;
use crate::surface::RenderedSurface;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A PNG ready to be handed to the host for saving.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Generator {
    renderer: Renderer,
    /// Values currently in the input fields (already clamped to >= 1).
    width: u32,
    height: u32,
    /// Last accepted size; what the preview and downloads show.
    submitted: Dimensions,
    theme: RenderTheme,
    error: Option<String>,
}

impl Generator {
    pub fn new(renderer: Renderer, theme: RenderTheme) -> Self {
        Self {
            renderer,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            submitted: Dimensions::default(),
            theme,
            error: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn submitted(&self) -> Dimensions {
        self.submitted
    }

    pub fn theme(&self) -> RenderTheme {
        self.theme
    }

    /// Message for the most recent failed submit or export, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_width(&mut self, raw: i64) {
        self.width = clamp_input(raw);
        self.error = None;
    }

    pub fn set_height(&mut self, raw: i64) {
        self.height = clamp_input(raw);
        self.error = None;
    }

    pub fn set_theme(&mut self, theme: RenderTheme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Record an error raised by the host (e.g. a failed file write).
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Validate the pending input. On success it becomes the submitted
    /// size; on rejection the previous size stays and the message is kept.
    pub fn submit(&mut self) -> Result<Dimensions, Rejection> {
        match Dimensions::new(self.width, self.height) {
            Ok(dimensions) => {
                debug!("submitted {dimensions}");
                self.submitted = dimensions;
                self.error = None;
                Ok(dimensions)
            }
            Err(rejection) => {
                debug!(
                    "rejected {}x{}: {}",
                    self.width,
                    self.height,
                    rejection.reason()
                );
                self.error = Some(rejection.to_string());
                Err(rejection)
            }
        }
    }

    /// Render the submitted size for on-screen display.
    pub fn preview(&self) -> Result<RenderedSurface, RenderError> {
        self.renderer.render(self.submitted, self.theme)
    }

    /// Render the submitted size onto a fresh surface and encode it.
    pub fn download(&mut self) -> Result<Download, GeneratorError> {
        let result = self.encode_submitted();
        self.record(result)
    }

    fn encode_submitted(&self) -> Result<Download, GeneratorError> {
        let surface = self.renderer.render(self.submitted, self.theme)?;
        let png = export::encode_png(&surface)?;
        let file_name = export::file_name(self.submitted);
        info!("prepared {file_name} ({} bytes)", png.len());
        Ok(Download { file_name, png })
    }

    /// Keep the message of a failed render or export for display.
    fn record<T>(&mut self, result: Result<T, GeneratorError>) -> Result<T, GeneratorError> {
        if let Err(e) = &result {
            warn!("download failed: {e}");
            self.error = Some(e.to_string());
        }
        result
    }
}
