//! Glyph rasterization for the dimension label.
//!
//! Wraps a `fontdue` face and lays out a single line of text into glyph
//! coverage bitmaps positioned relative to the pen origin and baseline.

use fontdue::{Font, FontSettings};
use placeholdr_protocol::{TextAlign, TextBaseline};

use crate::raster::RenderError;

/// Font used to draw the dimension label.
#[derive(Clone)]
pub struct LabelFont {
    font: Font,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    /// The Ubuntu-Light face shipped with egui's default fonts.
    pub fn bundled() -> Result<Self, RenderError> {
        Self::from_bytes(epaint_default_fonts::UBUNTU_LIGHT)
    }

    /// Load a TrueType/OpenType face from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RenderError> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| RenderError::Font(e.to_owned()))?;
        Ok(Self { font })
    }

    /// Lay out `text` on one line at `px` pixels, anchored at `(x, y)`.
    ///
    /// Glyph origins are snapped to whole pixels so output does not depend
    /// on sub-pixel pen positions.
    pub fn layout(
        &self,
        text: &str,
        px: f32,
        x: f32,
        y: f32,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Vec<PlacedGlyph> {
        let mut advance = 0.0f32;
        let mut pens = Vec::with_capacity(text.len());
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                advance += self.font.horizontal_kern(p, c, px).unwrap_or(0.0);
            }
            pens.push((c, advance));
            advance += self.font.metrics(c, px).advance_width;
            prev = Some(c);
        }

        let start_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - advance / 2.0,
            TextAlign::Right => x - advance,
        };
        let baseline_y = y + self.baseline_offset(px, baseline);

        pens.into_iter()
            .filter_map(|(c, pen)| {
                let (metrics, coverage) = self.font.rasterize(c, px);
                if metrics.width == 0 || metrics.height == 0 {
                    return None;
                }
                let origin_x = (start_x + pen).round() as i32;
                let origin_y = baseline_y.round() as i32;
                Some(PlacedGlyph {
                    left: origin_x + metrics.xmin,
                    top: origin_y - metrics.ymin - metrics.height as i32,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                })
            })
            .collect()
    }

    /// Distance from the anchor point down to the alphabetic baseline.
    fn baseline_offset(&self, px: f32, baseline: TextBaseline) -> f32 {
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(px)
            .map_or((px * 0.8, -px * 0.2), |m| (m.ascent, m.descent));
        match baseline {
            TextBaseline::Top => ascent,
            TextBaseline::Middle => (ascent + descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
        }
    }
}

/// One rasterized glyph in surface coordinates.
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    pub left: i32,
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major 8-bit coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl PlacedGlyph {
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }
}
