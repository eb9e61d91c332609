use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Color;

/// Light/dark color mode applied to a generated image.
///
/// Always passed explicitly to renderers; nothing in the render path reads
/// it from ambient UI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTheme {
    #[default]
    Light,
    Dark,
}

impl RenderTheme {
    pub fn toggled(self) -> Self {
        match self {
            RenderTheme::Light => RenderTheme::Dark,
            RenderTheme::Dark => RenderTheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderTheme::Light => "light",
            RenderTheme::Dark => "dark",
        }
    }
}

impl fmt::Display for RenderTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?} (expected \"light\" or \"dark\")")]
pub struct UnknownTheme(pub String);

impl FromStr for RenderTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(RenderTheme::Light),
            "dark" => Ok(RenderTheme::Dark),
            _ => Err(UnknownTheme(s.to_owned())),
        }
    }
}

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    GradientStart,
    GradientEnd,
    GridLine,
    LabelText,
    LabelShadow,
}

impl ThemeToken {
    pub fn resolve(self, theme: RenderTheme) -> Color {
        match theme {
            RenderTheme::Dark => resolve_dark(self),
            RenderTheme::Light => resolve_light(self),
        }
    }
}

fn resolve_dark(token: ThemeToken) -> Color {
    use ThemeToken::*;
    match token {
        GradientStart => Color::rgb8(0x1f, 0x29, 0x37), // gray-800
        GradientEnd => Color::rgb8(0x11, 0x18, 0x27),   // gray-900
        GridLine => Color::rgba(1.0, 1.0, 1.0, 0.1),
        LabelText => Color::rgb8(0xe5, 0xe7, 0xeb), // gray-200
        LabelShadow => Color::rgba(0.0, 0.0, 0.0, 0.8),
    }
}

fn resolve_light(token: ThemeToken) -> Color {
    use ThemeToken::*;
    match token {
        GradientStart => Color::rgb8(0xf3, 0xf4, 0xf6), // gray-100
        GradientEnd => Color::rgb8(0xe5, 0xe7, 0xeb),   // gray-200
        // Nearly invisible against the light gradient; kept as shipped.
        GridLine => Color::rgba(1.0, 1.0, 1.0, 0.8),
        LabelText => Color::rgb8(0x37, 0x41, 0x51), // gray-700
        LabelShadow => Color::rgba(1.0, 1.0, 1.0, 0.8),
    }
}
