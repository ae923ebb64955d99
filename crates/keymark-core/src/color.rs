//! Span color normalization and highlight detection
//!
//! Answer keys mark correct options by rendering the option number in a
//! green-dominant color. The thresholds below were tuned against one
//! renderer's green and are configuration, not a law of nature.

use serde::{Deserialize, Serialize};

/// Default minimum green channel for a highlight
pub const DEFAULT_MIN_GREEN: i32 = 120;

/// Default amount by which green must exceed both red and blue
pub const DEFAULT_HIGHLIGHT_MARGIN: i32 = 30;

/// Color attribute as delivered by a document provider
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// Packed `0xRRGGBB` integer
    Packed(i64),
    /// Component sequence, either normalized to [0,1] or in [0,255]
    Components(Vec<f64>),
}

/// Normalized 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Normalize any supported color encoding to RGB8.
///
/// Absent or undecodable values classify as black; this never fails.
pub fn classify(color: Option<&ColorValue>) -> Rgb8 {
    match color {
        Some(ColorValue::Packed(value)) => Rgb8 {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        },
        Some(ColorValue::Components(components)) if components.len() >= 3 => {
            let rgb = &components[..3];
            let scale = if rgb.iter().all(|c| (0.0..=1.0).contains(c)) {
                255.0
            } else {
                1.0
            };
            // `as u8` truncates toward zero and saturates out-of-range values
            Rgb8 {
                r: (rgb[0] * scale) as u8,
                g: (rgb[1] * scale) as u8,
                b: (rgb[2] * scale) as u8,
            }
        }
        _ => Rgb8::BLACK,
    }
}

/// Thresholds for the green-dominance highlight heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Green must be strictly above this value
    #[serde(default = "default_min_green")]
    pub min_green: i32,
    /// Green must exceed red and blue by strictly more than this value
    #[serde(default = "default_margin")]
    pub margin: i32,
}

impl Default for HighlightRule {
    fn default() -> Self {
        Self {
            min_green: DEFAULT_MIN_GREEN,
            margin: DEFAULT_HIGHLIGHT_MARGIN,
        }
    }
}

impl HighlightRule {
    pub fn is_highlight(&self, rgb: Rgb8) -> bool {
        let (r, g, b) = (i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
        g > self.min_green && g > r + self.margin && g > b + self.margin
    }

    /// Classify a raw color value and test it in one step
    pub fn matches(&self, color: Option<&ColorValue>) -> bool {
        self.is_highlight(classify(color))
    }
}

fn default_min_green() -> i32 {
    DEFAULT_MIN_GREEN
}

fn default_margin() -> i32 {
    DEFAULT_HIGHLIGHT_MARGIN
}
