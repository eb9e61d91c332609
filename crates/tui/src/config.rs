use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use placeholdr_core::{LabelFont, Renderer};
use placeholdr_protocol::RenderTheme;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "placeholdr.json";

/// Optional settings read from a JSON config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub theme: Option<RenderTheme>,
    pub out_dir: Option<PathBuf>,
    pub font: Option<PathBuf>,
}

impl FileConfig {
    /// Load `explicit` if given (it must exist), else `placeholdr.json` if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub theme: Option<RenderTheme>,
    pub out_dir: Option<PathBuf>,
    pub font: Option<PathBuf>,
}

/// Effective settings: flags, then config file, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: RenderTheme,
    pub out_dir: PathBuf,
    pub font: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            theme: overrides.theme.or(file.theme).unwrap_or_default(),
            out_dir: overrides
                .out_dir
                .or(file.out_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            font: overrides.font.or(file.font),
        }
    }

    /// Renderer with the configured font, or the bundled one.
    pub fn renderer(&self) -> Result<Renderer> {
        let font = match &self.font {
            Some(path) => {
                let bytes = fs::read(path)
                    .with_context(|| format!("failed to read font {}", path.display()))?;
                LabelFont::from_bytes(&bytes)
                    .with_context(|| format!("unusable font {}", path.display()))?
            }
            None => LabelFont::bundled().context("bundled font failed to load")?,
        };
        Ok(Renderer::with_font(font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let cfg = FileConfig::from_json(r#"{ "theme": "dark" }"#).expect("parse");
        assert_eq!(cfg.theme, Some(RenderTheme::Dark));
        assert_eq!(cfg.out_dir, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FileConfig::from_json(r#"{ "colour": "dark" }"#).is_err());
        assert!(FileConfig::from_json(r#"{ "theme": "sepia" }"#).is_err());
    }

    #[test]
    fn flags_override_file_and_defaults_fill_gaps() {
        let file = FileConfig {
            theme: Some(RenderTheme::Dark),
            out_dir: Some(PathBuf::from("renders")),
            font: None,
        };
        let flags = Overrides {
            theme: Some(RenderTheme::Light),
            ..Default::default()
        };
        let s = Settings::resolve(file, flags);
        assert_eq!(s.theme, RenderTheme::Light);
        assert_eq!(s.out_dir, PathBuf::from("renders"));
        assert_eq!(s.font, None);

        let s = Settings::resolve(FileConfig::default(), Overrides::default());
        assert_eq!(s.theme, RenderTheme::Light);
        assert_eq!(s.out_dir, PathBuf::from("."));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let path = Path::new("definitely/not/here/placeholdr.json");
        assert!(FileConfig::load(Some(path)).is_err());
    }
}
