use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each placeholder. Renderers
/// consume this list sequentially; each command carries all the data it
/// needs, with colors expressed as theme tokens resolved at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill a rectangle with a two-stop linear gradient. The gradient runs
    /// from `from` (color `start`) to `to` (color `end`) in surface
    /// coordinates and is clamped beyond both ends.
    FillLinearGradient {
        rect: Rect,
        from: Point,
        to: Point,
        start: ThemeToken,
        end: ThemeToken,
    },

    /// Stroke a line segment with butt caps, centered on the segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a single line of text anchored at `position`.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        baseline: TextBaseline,
        shadow: Option<TextShadow>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text line relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

/// Blurred, unoffset shadow painted beneath text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    pub color: ThemeToken,
    /// Blur radius in pixels (Gaussian sigma is half of this).
    pub blur: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_as_tagged_variants() {
        let cmd = RenderCommand::DrawLine {
            from: Point::new(20.0, 0.0),
            to: Point::new(20.0, 100.0),
            color: ThemeToken::GridLine,
            width: 1.0,
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.starts_with(r#"{"DrawLine""#), "json={json}");
        let back: RenderCommand = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cmd);
    }
}
