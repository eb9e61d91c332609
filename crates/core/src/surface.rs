use image::RgbaImage;
use placeholdr_protocol::Color;

use crate::dimensions::Dimensions;
use crate::raster::RenderError;

/// RGBA8 pixel buffer produced by one render.
///
/// Owned by whoever asked for the render; nothing keeps a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSurface {
    dimensions: Dimensions,
    image: RgbaImage,
}

impl RenderedSurface {
    /// Allocate a transparent surface of exactly `dimensions`.
    ///
    /// Allocation failure is returned as [`RenderError::SurfaceUnavailable`]
    /// rather than aborting the process.
    pub fn allocate(dimensions: Dimensions) -> Result<Self, RenderError> {
        let unavailable = || RenderError::SurfaceUnavailable {
            width: dimensions.width(),
            height: dimensions.height(),
        };
        let len = (dimensions.width() as usize)
            .checked_mul(dimensions.height() as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(unavailable)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| unavailable())?;
        buf.resize(len, 0);
        let image = RgbaImage::from_raw(dimensions.width(), dimensions.height(), buf)
            .ok_or_else(unavailable)?;
        Ok(Self { dimensions, image })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// RGBA8 at `(x, y)`; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.image.into_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            p.0 = color.to_rgba8();
        }
    }

    /// Source-over composite of `color` scaled by `coverage` onto `(x, y)`.
    pub(crate) fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let alpha = color.a * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let Some(p) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let [dr, dg, db, da] = p.0.map(|c| f32::from(c) / 255.0);
        let out_a = alpha + da * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        let mix = |src: f32, dst: f32| (src * alpha + dst * da * (1.0 - alpha)) / out_a;
        p.0 = Color::rgba(
            mix(color.r, dr),
            mix(color.g, dg),
            mix(color.b, db),
            out_a,
        )
        .to_rgba8();
    }
}
