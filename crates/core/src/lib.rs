//! Placeholder image generation: dimension validation, scene building,
//! rasterization and PNG export.
//!
//! ```no_run
//! use placeholdr_core::{Dimensions, Renderer, export};
//! use placeholdr_protocol::RenderTheme;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dimensions = Dimensions::new(800, 600)?;
//! let surface = Renderer::new()?.render(dimensions, RenderTheme::Dark)?;
//! let path = export::write_png(&surface, std::path::Path::new("."))?;
//! assert!(path.ends_with("placeholder_800x600.png"));
//! # Ok(())
//! # }
//! ```

pub mod dimensions;
pub mod export;
pub mod font;
pub mod generator;
pub mod raster;
pub mod render;
pub mod scene;
pub mod surface;

pub use dimensions::{Dimensions, DimensionsParseError, Rejection};
pub use export::ExportError;
pub use font::LabelFont;
pub use generator::{Download, Generator, GeneratorError};
pub use raster::RenderError;
pub use render::Renderer;
pub use surface::RenderedSurface;
