use log::debug;
use placeholdr_protocol::RenderTheme;

use crate::dimensions::Dimensions;
use crate::font::LabelFont;
use crate::raster::{self, RenderError};
use crate::scene;
use crate::surface::RenderedSurface;

/// The single placeholder renderer, shared by preview and export paths.
///
/// Each call builds the scene and paints it onto its own surface; the
/// renderer holds nothing but the label font.
#[derive(Debug, Clone)]
pub struct Renderer {
    font: LabelFont,
}

impl Renderer {
    /// Renderer using the bundled label font.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self::with_font(LabelFont::bundled()?))
    }

    pub fn with_font(font: LabelFont) -> Self {
        Self { font }
    }

    pub fn render(
        &self,
        dimensions: Dimensions,
        theme: RenderTheme,
    ) -> Result<RenderedSurface, RenderError> {
        let commands = scene::build_placeholder(dimensions);
        debug!("rendering {dimensions} placeholder ({theme})");
        raster::rasterize(dimensions, &commands, theme, &self.font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_matches_requested_size() {
        let renderer = Renderer::new().expect("renderer");
        let d = Dimensions::new(130, 45).expect("valid");
        let surface = renderer.render(d, RenderTheme::Light).expect("render");
        assert_eq!((surface.width(), surface.height()), (130, 45));
        assert_eq!(surface.as_rgba().len(), 130 * 45 * 4);
        assert!(surface.as_rgba().chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn themes_differ() {
        let renderer = Renderer::new().expect("renderer");
        let d = Dimensions::new(60, 40).expect("valid");
        let light = renderer.render(d, RenderTheme::Light).expect("render");
        let dark = renderer.render(d, RenderTheme::Dark).expect("render");
        assert_ne!(light, dark);
    }
}
