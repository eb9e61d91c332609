//! Placeholder dimensions and their validation.
//!
//! Raw input from text fields is first clamped to at least one pixel
//! ([`clamp_input`], [`parse_input`]); the clamped pair is then checked
//! against the fixed ceiling by [`Dimensions::validate`] on submit.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

pub const MIN_DIMENSION: u32 = 1;
pub const MAX_WIDTH: u32 = 3000;
pub const MAX_HEIGHT: u32 = 2000;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Why a candidate size was refused.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Width and height must be at least 1 pixel")]
    BelowMinimum,
    #[error("Maximum dimensions are 3000x2000 pixels")]
    AboveMaximum,
}

impl Rejection {
    /// Short machine-friendly reason.
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::BelowMinimum => "below minimum",
            Rejection::AboveMaximum => "above maximum",
        }
    }
}

/// A validated `(width, height)` pair: `1..=3000` by `1..=2000`.
///
/// The only way to obtain one is through validation, so every holder can
/// render it without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Check a candidate pair. The minimum is checked before the maximum.
    pub fn validate(width: i64, height: i64) -> Result<Self, Rejection> {
        let min = i64::from(MIN_DIMENSION);
        if width < min || height < min {
            return Err(Rejection::BelowMinimum);
        }
        if width > i64::from(MAX_WIDTH) || height > i64::from(MAX_HEIGHT) {
            return Err(Rejection::AboveMaximum);
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn new(width: u32, height: u32) -> Result<Self, Rejection> {
        Self::validate(i64::from(width), i64::from(height))
    }

    /// Parse `"800x600"`. `X` and `×` are accepted as separators and
    /// whitespace around either number is ignored.
    pub fn parse(s: &str) -> Result<Self, DimensionsParseError> {
        let (w, h) = s
            .split_once(['x', 'X', '×'])
            .ok_or_else(|| DimensionsParseError::Malformed(s.to_owned()))?;
        let width = parse_component(w)?;
        let height = parse_component(h)?;
        Ok(Self::validate(width, height)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Error)]
pub enum DimensionsParseError {
    #[error("expected WIDTHxHEIGHT, got {0:?}")]
    Malformed(String),
    #[error("invalid number {value:?}: {source}")]
    InvalidNumber {
        value: String,
        source: ParseIntError,
    },
    #[error(transparent)]
    OutOfRange(#[from] Rejection),
}

fn parse_component(s: &str) -> Result<i64, DimensionsParseError> {
    let s = s.trim();
    s.parse::<i64>()
        .map_err(|source| DimensionsParseError::InvalidNumber {
            value: s.to_owned(),
            source,
        })
}

/// Input-layer clamp: anything below one pixel becomes one pixel.
pub fn clamp_input(value: i64) -> u32 {
    value.clamp(i64::from(MIN_DIMENSION), i64::from(u32::MAX)) as u32
}

/// Interpret the contents of a numeric text field and clamp it.
///
/// Decimals are truncated toward zero; empty or non-numeric text counts as
/// zero and therefore clamps to one.
pub fn parse_input(text: &str) -> u32 {
    let text = text.trim();
    let value = text
        .parse::<i64>()
        .ok()
        .or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        })
        .unwrap_or(0);
    clamp_input(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range_corners() {
        for (w, h) in [(1, 1), (3000, 1), (1, 2000), (3000, 2000), (400, 300)] {
            let d = Dimensions::validate(w, h).expect("in range");
            assert_eq!((i64::from(d.width()), i64::from(d.height())), (w, h));
        }
    }

    #[test]
    fn rejects_above_maximum_on_either_axis() {
        assert_eq!(
            Dimensions::validate(3001, 2000),
            Err(Rejection::AboveMaximum)
        );
        assert_eq!(
            Dimensions::validate(3000, 2001),
            Err(Rejection::AboveMaximum)
        );
        assert_eq!(Rejection::AboveMaximum.reason(), "above maximum");
    }

    #[test]
    fn minimum_is_checked_before_maximum() {
        assert_eq!(Dimensions::validate(0, 5000), Err(Rejection::BelowMinimum));
        assert_eq!(Dimensions::validate(-4, 10), Err(Rejection::BelowMinimum));
        assert_eq!(Rejection::BelowMinimum.reason(), "below minimum");
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert_eq!(
            Rejection::BelowMinimum.to_string(),
            "Width and height must be at least 1 pixel"
        );
        assert_eq!(
            Rejection::AboveMaximum.to_string(),
            "Maximum dimensions are 3000x2000 pixels"
        );
    }

    #[test]
    fn input_layer_clamps_to_one() {
        assert_eq!(clamp_input(0), 1);
        assert_eq!(clamp_input(-20), 1);
        assert_eq!(clamp_input(640), 640);
        assert_eq!(parse_input(""), 1);
        assert_eq!(parse_input("abc"), 1);
        assert_eq!(parse_input("0"), 1);
        assert_eq!(parse_input(" 12.9 "), 12);
        assert_eq!(parse_input("-3.5"), 1);
        assert_eq!(parse_input("800"), 800);
    }

    #[test]
    fn clamped_zero_is_always_accepted() {
        let w = clamp_input(0);
        let h = clamp_input(0);
        assert!(Dimensions::new(w, h).is_ok());
    }

    #[test]
    fn parses_width_by_height() {
        let d = Dimensions::parse("800x600").expect("parse");
        assert_eq!((d.width(), d.height()), (800, 600));
        let d: Dimensions = " 32 × 16 ".parse().expect("parse");
        assert_eq!(d.to_string(), "32x16");
        assert!(matches!(
            Dimensions::parse("800"),
            Err(DimensionsParseError::Malformed(_))
        ));
        assert!(matches!(
            Dimensions::parse("wide x 3"),
            Err(DimensionsParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Dimensions::parse("4000x10"),
            Err(DimensionsParseError::OutOfRange(Rejection::AboveMaximum))
        ));
    }

    #[test]
    fn default_is_four_hundred_by_three_hundred() {
        assert_eq!(Dimensions::default().to_string(), "400x300");
    }
}
