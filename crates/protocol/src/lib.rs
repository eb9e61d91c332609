pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign, TextBaseline, TextShadow};
pub use theme::{RenderTheme, ThemeToken, UnknownTheme};
pub use types::{Color, Point, Rect};
