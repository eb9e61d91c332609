//! PNG serialization of rendered surfaces.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError};
use log::debug;
use thiserror::Error;

use crate::dimensions::Dimensions;
use crate::surface::RenderedSurface;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] ImageError),
    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// `placeholder_{width}x{height}.png`
pub fn file_name(dimensions: Dimensions) -> String {
    format!(
        "placeholder_{}x{}.png",
        dimensions.width(),
        dimensions.height()
    )
}

/// Encode the surface as an 8-bit RGBA PNG byte stream.
pub fn encode_png(surface: &RenderedSurface) -> Result<Vec<u8>, ExportError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        surface.as_rgba(),
        surface.width(),
        surface.height(),
        ExtendedColorType::Rgba8,
    )?;
    debug!(
        "encoded {} placeholder as {} PNG bytes",
        surface.dimensions(),
        png.len()
    );
    Ok(png)
}

/// Encode and write to `dir/placeholder_{w}x{h}.png`, returning the path.
pub fn write_png(surface: &RenderedSurface, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name(surface.dimensions()));
    write_png_to(surface, &path)?;
    Ok(path)
}

/// Encode and write to an explicit path.
pub fn write_png_to(surface: &RenderedSurface, path: &Path) -> Result<(), ExportError> {
    let png = encode_png(surface)?;
    fs::write(path, &png).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_pattern() {
        let d = Dimensions::new(400, 300).expect("valid");
        assert_eq!(file_name(d), "placeholder_400x300.png");
        let d = Dimensions::new(1, 2000).expect("valid");
        assert_eq!(file_name(d), "placeholder_1x2000.png");
    }

    #[test]
    fn encodes_png_signature() {
        let d = Dimensions::new(3, 2).expect("valid");
        let surface = RenderedSurface::allocate(d).expect("allocate");
        let png = encode_png(&surface).expect("encode");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn write_reports_missing_directory() {
        let d = Dimensions::new(2, 2).expect("valid");
        let surface = RenderedSurface::allocate(d).expect("allocate");
        let dir = std::env::temp_dir().join("placeholdr-missing-dir-for-test/nested");
        let err = write_png(&surface, &dir).expect_err("directory does not exist");
        assert!(matches!(err, ExportError::Io { .. }), "err={err}");
    }
}
