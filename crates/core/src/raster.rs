//! CPU rasterizer: consumes a `RenderCommand` list and paints it onto a
//! freshly allocated [`RenderedSurface`].
//!
//! Every command is composited source-over in list order, so overlapping
//! strokes (grid intersections) accumulate. All arithmetic is done in `f32`
//! with fixed iteration order; identical inputs produce identical bytes.

use log::{debug, warn};
use placeholdr_protocol::{Color, Point, Rect, RenderCommand, RenderTheme, TextShadow};
use thiserror::Error;

use crate::dimensions::Dimensions;
use crate::font::{LabelFont, PlacedGlyph};
use crate::surface::RenderedSurface;

/// Text smaller than this is skipped; it would not cover a single pixel.
const MIN_FONT_PX: f32 = 0.5;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing surface unavailable for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("font: {0}")]
    Font(String),
}

/// Paint `commands` onto a new surface of `dimensions`, resolving theme
/// tokens against `theme`.
pub fn rasterize(
    dimensions: Dimensions,
    commands: &[RenderCommand],
    theme: RenderTheme,
    font: &LabelFont,
) -> Result<RenderedSurface, RenderError> {
    let mut surface = RenderedSurface::allocate(dimensions)?;
    debug!(
        "rasterizing {} commands onto {dimensions} ({theme})",
        commands.len()
    );

    for cmd in commands {
        match cmd {
            RenderCommand::FillLinearGradient {
                rect,
                from,
                to,
                start,
                end,
            } => fill_linear_gradient(
                &mut surface,
                *rect,
                *from,
                *to,
                start.resolve(theme),
                end.resolve(theme),
            ),

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => stroke_line(&mut surface, *from, *to, *width, color.resolve(theme)),

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                baseline,
                shadow,
            } => {
                let px = *font_size as f32;
                if px < MIN_FONT_PX {
                    debug!("skipping {px}px label {text:?}");
                    continue;
                }
                let glyphs = font.layout(
                    text,
                    px,
                    position.x as f32,
                    position.y as f32,
                    *align,
                    *baseline,
                );
                fill_text(
                    &mut surface,
                    &glyphs,
                    color.resolve(theme),
                    shadow.map(|s| (s, s.color.resolve(theme))),
                );
            }
        }
    }

    Ok(surface)
}

/// Fill `rect` with a gradient sampled at each pixel center, projected onto
/// the `from → to` vector and clamped at both ends.
fn fill_linear_gradient(
    surface: &mut RenderedSurface,
    rect: Rect,
    from: Point,
    to: Point,
    start: Color,
    end: Color,
) {
    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        warn!("degenerate gradient at ({}, {}); nothing painted", from.x, from.y);
        return;
    }

    let Some((x0, y0, x1, y1)) = pixel_bounds(surface, rect.x, rect.y, rect.right(), rect.bottom())
    else {
        return;
    };
    for y in y0..y1 {
        let py = y as f32 + 0.5 - from.y as f32;
        for x in x0..x1 {
            let px = x as f32 + 0.5 - from.x as f32;
            let t = (px * dx + py * dy) / len_sq;
            surface.set(x, y, start.lerp(end, t));
        }
    }
}

/// Stroke a segment with butt caps. Coverage is the exact box-filter
/// overlap across the stroke and a one-pixel ramp along it, so a 1-px line
/// on an integer coordinate lands half on each neighbouring pixel.
fn stroke_line(surface: &mut RenderedSurface, from: Point, to: Point, width: f64, color: Color) {
    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    let len = (dx * dx + dy * dy).sqrt();
    let width = width as f32;
    if len <= 0.0 || width <= 0.0 {
        warn!(
            "skipping degenerate stroke ({}, {}) -> ({}, {}) width {width}",
            from.x, from.y, to.x, to.y
        );
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let half = width / 2.0;
    let pad = f64::from(half) + 1.0;

    let Some((x0, y0, x1, y1)) = pixel_bounds(
        surface,
        from.x.min(to.x) - pad,
        from.y.min(to.y) - pad,
        from.x.max(to.x) + pad,
        from.y.max(to.y) + pad,
    ) else {
        return;
    };

    for y in y0..y1 {
        let ry = y as f32 + 0.5 - from.y as f32;
        for x in x0..x1 {
            let rx = x as f32 + 0.5 - from.x as f32;
            let along = rx * ux + ry * uy;
            let across = (ry * ux - rx * uy).abs();
            let cover_across = (half + 0.5 - across).clamp(0.0, 1.0).min(width);
            let cover_along = (along + 0.5).clamp(0.0, 1.0) * (len - along + 0.5).clamp(0.0, 1.0);
            let coverage = cover_across * cover_along;
            if coverage > 0.0 {
                surface.blend(x, y, color, coverage);
            }
        }
    }
}

/// Composite the blurred shadow (if any), then the glyph coverage.
fn fill_text(
    surface: &mut RenderedSurface,
    glyphs: &[PlacedGlyph],
    color: Color,
    shadow: Option<(TextShadow, Color)>,
) {
    let (Some(left), Some(top), Some(right), Some(bottom)) = (
        glyphs.iter().map(|g| g.left).min(),
        glyphs.iter().map(|g| g.top).min(),
        glyphs.iter().map(PlacedGlyph::right).max(),
        glyphs.iter().map(PlacedGlyph::bottom).max(),
    ) else {
        return;
    };

    let sigma = shadow.map_or(0.0, |(s, _)| (s.blur / 2.0) as f32);
    let radius = (sigma * 3.0).ceil() as i32;
    let mut mask = CoverageMask::new(left - radius, top - radius, right + radius, bottom + radius);
    for glyph in glyphs {
        mask.add_glyph(glyph);
    }

    if let Some((_, shadow_color)) = shadow
        && sigma > 0.0
    {
        let blurred = mask.blurred(sigma, radius);
        blurred.composite(surface, shadow_color);
    }
    mask.composite(surface, color);
}

/// Coverage in `0..=1` over a rectangle of surface space that may extend
/// past the surface edges.
struct CoverageMask {
    left: i32,
    top: i32,
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl CoverageMask {
    fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let width = (right - left).max(0) as usize;
        let height = (bottom - top).max(0) as usize;
        Self {
            left,
            top,
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    fn add_glyph(&mut self, glyph: &PlacedGlyph) {
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let c = f32::from(glyph.coverage[gy * glyph.width + gx]) / 255.0;
                let mx = (glyph.left - self.left) as usize + gx;
                let my = (glyph.top - self.top) as usize + gy;
                let slot = &mut self.values[my * self.width + mx];
                *slot = slot.max(c);
            }
        }
    }

    /// Separable Gaussian blur with the given sigma and kernel radius.
    fn blurred(&self, sigma: f32, radius: i32) -> Self {
        let kernel = gaussian_kernel(sigma, radius);
        let mut horizontal = vec![0.0f32; self.values.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = x as i32 + k as i32 - radius;
                    if sx >= 0 && (sx as usize) < self.width {
                        acc += self.values[y * self.width + sx as usize] * weight;
                    }
                }
                horizontal[y * self.width + x] = acc;
            }
        }
        let mut values = vec![0.0f32; self.values.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = y as i32 + k as i32 - radius;
                    if sy >= 0 && (sy as usize) < self.height {
                        acc += horizontal[sy as usize * self.width + x] * weight;
                    }
                }
                values[y * self.width + x] = acc;
            }
        }
        Self {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            values,
        }
    }

    fn composite(&self, surface: &mut RenderedSurface, color: Color) {
        for my in 0..self.height {
            let y = self.top + my as i32;
            if y < 0 || y as u32 >= surface.height() {
                continue;
            }
            for mx in 0..self.width {
                let x = self.left + mx as i32;
                if x < 0 || x as u32 >= surface.width() {
                    continue;
                }
                let coverage = self.values[my * self.width + mx];
                if coverage > 0.0 {
                    surface.blend(x as u32, y as u32, color, coverage);
                }
            }
        }
    }
}

fn gaussian_kernel(sigma: f32, radius: i32) -> Vec<f32> {
    let weights: Vec<f32> = (-radius..=radius)
        .map(|i| {
            let d = i as f32;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Pixel index range `[x0, x1) × [y0, y1)` covering the given extent,
/// clipped to the surface. `None` when nothing is left.
fn pixel_bounds(
    surface: &RenderedSurface,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
) -> Option<(u32, u32, u32, u32)> {
    let clip = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
    let x0 = clip(left.floor(), surface.width());
    let y0 = clip(top.floor(), surface.height());
    let x1 = clip(right.ceil(), surface.width());
    let y1 = clip(bottom.ceil(), surface.height());
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use placeholdr_protocol::ThemeToken;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new(w, h).expect("valid dimensions")
    }

    fn font() -> LabelFont {
        LabelFont::bundled().expect("bundled font parses")
    }

    fn gradient(w: f64, h: f64) -> RenderCommand {
        RenderCommand::FillLinearGradient {
            rect: Rect::new(0.0, 0.0, w, h),
            from: Point::new(0.0, 0.0),
            to: Point::new(w, h),
            start: ThemeToken::GradientStart,
            end: ThemeToken::GradientEnd,
        }
    }

    #[test]
    fn gradient_runs_from_top_left_to_bottom_right() {
        let s = rasterize(dims(200, 100), &[gradient(200.0, 100.0)], RenderTheme::Dark, &font())
            .expect("render");
        let tl = s.pixel(0, 0).expect("in bounds");
        let br = s.pixel(199, 99).expect("in bounds");
        // Within a step of the palette stops, start brighter than end.
        assert!(tl[0].abs_diff(0x1f) <= 1 && tl[2].abs_diff(0x37) <= 1, "tl={tl:?}");
        assert!(br[0].abs_diff(0x11) <= 1 && br[2].abs_diff(0x27) <= 1, "br={br:?}");
        assert_eq!(tl[3], 255);
    }

    #[test]
    fn gradient_is_constant_along_perpendicular() {
        // For a square the gradient vector is the diagonal; anti-diagonal
        // pixels share the same projection.
        let s = rasterize(dims(64, 64), &[gradient(64.0, 64.0)], RenderTheme::Light, &font())
            .expect("render");
        assert_eq!(s.pixel(0, 63), s.pixel(63, 0));
        assert_eq!(s.pixel(10, 53), s.pixel(53, 10));
    }

    #[test]
    fn integer_line_splits_across_two_columns() {
        let commands = [
            gradient(40.0, 10.0),
            RenderCommand::DrawLine {
                from: Point::new(20.0, 0.0),
                to: Point::new(20.0, 10.0),
                color: ThemeToken::GridLine,
                width: 1.0,
            },
        ];
        let base = rasterize(dims(40, 10), &commands[..1], RenderTheme::Dark, &font())
            .expect("render");
        let lined = rasterize(dims(40, 10), &commands, RenderTheme::Dark, &font())
            .expect("render");
        for y in 0..10 {
            assert_ne!(lined.pixel(19, y), base.pixel(19, y));
            assert_ne!(lined.pixel(20, y), base.pixel(20, y));
            assert_eq!(lined.pixel(18, y), base.pixel(18, y));
            assert_eq!(lined.pixel(21, y), base.pixel(21, y));
        }
    }

    #[test]
    fn degenerate_commands_are_skipped() {
        let commands = [
            gradient(8.0, 8.0),
            RenderCommand::DrawLine {
                from: Point::new(3.0, 3.0),
                to: Point::new(3.0, 3.0),
                color: ThemeToken::GridLine,
                width: 1.0,
            },
        ];
        let a = rasterize(dims(8, 8), &commands, RenderTheme::Dark, &font()).expect("render");
        let b = rasterize(dims(8, 8), &commands[..1], RenderTheme::Dark, &font()).expect("render");
        assert_eq!(a, b);
    }

    #[test]
    fn gaussian_kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(2.0, 6);
        assert_eq!(k.len(), 13);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(k[0], k[12]);
        assert!(k[6] > k[5]);
    }

    #[test]
    fn pixel_bounds_clips_to_surface() {
        let s = RenderedSurface::allocate(dims(10, 10)).expect("allocate");
        assert_eq!(pixel_bounds(&s, -5.0, -5.0, 3.2, 20.0), Some((0, 0, 4, 10)));
        assert_eq!(pixel_bounds(&s, 11.0, 0.0, 15.0, 5.0), None);
    }
}
