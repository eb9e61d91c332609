use egui::{ColorImage, TextureHandle, TextureOptions, Vec2};
use placeholdr_core::{Dimensions, Generator, RenderError};
use placeholdr_protocol::RenderTheme;

/// Largest on-screen size of the preview; the image keeps its aspect ratio.
pub const PREVIEW_MAX: Vec2 = Vec2::new(800.0, 600.0);

/// Scale `size` down (never up) so it fits inside `bounds`.
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}

/// GPU copy of the most recent render.
///
/// The surface is re-rendered and re-uploaded only when the submitted
/// dimensions or the theme change.
#[derive(Default)]
pub struct PreviewTexture {
    key: Option<(Dimensions, RenderTheme)>,
    texture: Option<TextureHandle>,
}

impl PreviewTexture {
    pub fn refresh(&mut self, ctx: &egui::Context, generator: &Generator) -> Result<(), RenderError> {
        let key = (generator.submitted(), generator.theme());
        if self.key == Some(key) {
            return Ok(());
        }
        // A failed render is not retried until the key changes.
        self.key = Some(key);
        self.texture = None;

        let surface = generator.preview()?;
        let image = ColorImage::from_rgba_unmultiplied(
            [surface.width() as usize, surface.height() as usize],
            surface.as_rgba(),
        );
        self.texture = Some(ctx.load_texture("placeholder_preview", image, TextureOptions::LINEAR));
        log::debug!("uploaded preview {} ({})", key.0, key.1);
        Ok(())
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}
