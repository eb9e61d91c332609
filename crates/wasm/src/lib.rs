//! Browser bindings: validation, rendering and export as plain functions.
//!
//! Sizes arrive as JS numbers; fractional parts are truncated and NaN
//! reads as 0 before validation.

use std::sync::Mutex;

use placeholdr_core::{Dimensions, RenderedSurface, Renderer, export, scene};
use placeholdr_protocol::RenderTheme;
use wasm_bindgen::prelude::*;

static RENDERER: Mutex<Option<Renderer>> = Mutex::new(None);

fn dimensions(width: f64, height: f64) -> Result<Dimensions, String> {
    Dimensions::validate(width as i64, height as i64).map_err(|e| e.to_string())
}

fn theme(name: &str) -> Result<RenderTheme, String> {
    name.parse().map_err(|e: placeholdr_protocol::UnknownTheme| e.to_string())
}

fn render(width: f64, height: f64, theme_name: &str) -> Result<RenderedSurface, String> {
    let dimensions = dimensions(width, height)?;
    let theme = theme(theme_name)?;
    let mut renderer = RENDERER.lock().unwrap_or_else(|e| e.into_inner());
    if renderer.is_none() {
        *renderer = Some(Renderer::new().map_err(|e| e.to_string())?);
    }
    let renderer = renderer.as_ref().ok_or("renderer unavailable")?;
    renderer.render(dimensions, theme).map_err(|e| e.to_string())
}

fn png(width: f64, height: f64, theme_name: &str) -> Result<Vec<u8>, String> {
    let surface = render(width, height, theme_name)?;
    export::encode_png(&surface).map_err(|e| e.to_string())
}

fn commands_json(width: f64, height: f64) -> Result<String, String> {
    let commands = scene::build_placeholder(dimensions(width, height)?);
    serde_json::to_string(&commands).map_err(|e| e.to_string())
}

fn js(message: String) -> JsError {
    JsError::new(&message)
}

/// Check a size; the error carries the message to show the user.
#[wasm_bindgen]
pub fn validate_dimensions(width: f64, height: f64) -> Result<(), JsError> {
    dimensions(width, height).map(drop).map_err(js)
}

/// Render and return row-major RGBA8 pixels (`width * height * 4` bytes).
#[wasm_bindgen]
pub fn render_rgba(width: f64, height: f64, theme: &str) -> Result<Vec<u8>, JsError> {
    render(width, height, theme).map(|s| s.into_rgba()).map_err(js)
}

/// Render and encode as PNG.
#[wasm_bindgen]
pub fn render_png(width: f64, height: f64, theme: &str) -> Result<Vec<u8>, JsError> {
    png(width, height, theme).map_err(js)
}

#[wasm_bindgen]
pub fn export_file_name(width: f64, height: f64) -> Result<String, JsError> {
    dimensions(width, height).map(export::file_name).map_err(js)
}

/// Render commands as JSON; colors are theme tokens.
#[wasm_bindgen]
pub fn render_commands(width: f64, height: f64) -> Result<String, JsError> {
    commands_json(width, height).map_err(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_sizes_truncate() {
        let d = dimensions(800.9, 600.2).expect("valid");
        assert_eq!(d.to_string(), "800x600");
        assert_eq!(
            dimensions(f64::NAN, 10.0),
            Err("Width and height must be at least 1 pixel".to_owned())
        );
        assert_eq!(
            dimensions(3000.5, 2001.0),
            Err("Maximum dimensions are 3000x2000 pixels".to_owned())
        );
    }

    #[test]
    fn unknown_theme_is_reported() {
        assert!(render(10.0, 10.0, "sepia").is_err());
        assert_eq!(theme("dark"), Ok(RenderTheme::Dark));
    }

    #[test]
    fn png_and_rgba_agree() {
        let rgba = render(30.0, 20.0, "light").expect("render").into_rgba();
        assert_eq!(rgba.len(), 30 * 20 * 4);
        let encoded = png(30.0, 20.0, "light").expect("png");
        let decoded = image::load_from_memory(&encoded).expect("decode").into_rgba8();
        assert_eq!(decoded.into_raw(), rgba);
    }

    #[test]
    fn commands_serialize_with_tokens() {
        let json = commands_json(40.0, 20.0).expect("json");
        assert!(json.contains("GradientStart"));
        assert!(json.contains("40 × 20"));
    }
}
