//! Chart colours
//!
//! Colours are injected per chart through a [`Palette`] carried in the chart
//! configuration; nothing here is process-wide.

use crate::error::{ChartError, ChartResult};
use scales::{ScaleResult, ThresholdScale};
use serde::{Deserialize, Serialize};

/// RGBA color representation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to CSS color string
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    /// The same colour at `opacity` (0..=1) of its current alpha
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Linear blend toward `other`; `ratio` 0 keeps `self`, 1 gives `other`
    pub fn blend(self, other: Color, ratio: f64) -> Color {
        let t = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Predefined color schemes for charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    /// General purpose categorical colours
    #[default]
    Categorical,
    /// Sequential blues, light to dark, for threshold-coloured cells
    SequentialBlue,
}

impl ColorScheme {
    /// Get the colors for this scheme
    pub fn colors(&self) -> Vec<Color> {
        match self {
            ColorScheme::Categorical => vec![
                Color::rgb(79, 129, 189),   // Blue
                Color::rgb(192, 80, 77),    // Red
                Color::rgb(155, 187, 89),   // Green
                Color::rgb(128, 100, 162),  // Purple
                Color::rgb(75, 172, 198),   // Teal
                Color::rgb(247, 150, 70),   // Orange
                Color::rgb(119, 146, 60),   // Olive
                Color::rgb(166, 166, 166),  // Gray
            ],
            ColorScheme::SequentialBlue => vec![
                Color::rgb(198, 219, 239),
                Color::rgb(158, 202, 225),
                Color::rgb(107, 174, 214),
                Color::rgb(66, 146, 198),
                Color::rgb(33, 113, 181),
                Color::rgb(8, 81, 156),
                Color::rgb(8, 48, 107),
            ],
        }
    }
}

/// Ordered colours handed to one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_scheme(ColorScheme::default())
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn from_scheme(scheme: ColorScheme) -> Self {
        Self::new(scheme.colors())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for the `index`-th series or group, cycling through the palette
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::GRAY;
        }
        self.colors[index % self.colors.len()]
    }

    /// The first `count` colours, cycling when the palette is shorter
    pub fn take(&self, count: usize) -> Vec<Color> {
        (0..count).map(|i| self.color(i)).collect()
    }
}

/// Two-variable colour lookup for bivariate choropleths.
///
/// Each variable is bucketed by its own threshold scale; the bucket pair
/// selects a cell of the colour grid (`grid[y_bucket][x_bucket]`).
#[derive(Debug, Clone, PartialEq)]
pub struct BivariateColorScale {
    x: ThresholdScale<usize>,
    y: ThresholdScale<usize>,
    grid: Vec<Vec<Color>>,
}

fn bucket_scale(breakpoints: Vec<f64>) -> ScaleResult<ThresholdScale<usize>> {
    let outputs = (0..=breakpoints.len()).collect();
    scales::make_threshold_scale(breakpoints, outputs)
}

impl BivariateColorScale {
    /// Build from breakpoints on each variable and an explicit colour grid
    pub fn new(
        x_breakpoints: Vec<f64>,
        y_breakpoints: Vec<f64>,
        grid: Vec<Vec<Color>>,
    ) -> ChartResult<Self> {
        let columns = x_breakpoints.len() + 1;
        let rows = y_breakpoints.len() + 1;
        if grid.len() != rows || grid.iter().any(|row| row.len() != columns) {
            return Err(ChartError::InvalidConfig(format!(
                "bivariate grid must be {rows} rows of {columns} colours"
            )));
        }
        Ok(Self {
            x: bucket_scale(x_breakpoints)?,
            y: bucket_scale(y_breakpoints)?,
            grid,
        })
    }

    /// Build a grid by blending four corner colours.
    ///
    /// `corners` is (low x low y, high x low y, low x high y, high x high y).
    pub fn from_corners(
        x_breakpoints: Vec<f64>,
        y_breakpoints: Vec<f64>,
        corners: [Color; 4],
    ) -> ChartResult<Self> {
        let columns = x_breakpoints.len() + 1;
        let rows = y_breakpoints.len() + 1;
        let fraction = |i: usize, n: usize| if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        let [low_low, high_low, low_high, high_high] = corners;

        let grid = (0..rows)
            .map(|row| {
                let ty = fraction(row, rows);
                let left = low_low.blend(low_high, ty);
                let right = high_low.blend(high_high, ty);
                (0..columns)
                    .map(|column| left.blend(right, fraction(column, columns)))
                    .collect()
            })
            .collect();
        Self::new(x_breakpoints, y_breakpoints, grid)
    }

    /// Colour for a pair of values; `None` when either is NaN
    pub fn color(&self, x: f64, y: f64) -> Option<Color> {
        let column = *self.x.map(x)?;
        let row = *self.y.map(y)?;
        Some(self.grid[row][column])
    }

    pub fn grid(&self) -> &[Vec<Color>] {
        &self.grid
    }
}
