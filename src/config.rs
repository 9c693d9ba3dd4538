// Centralized configuration for the lab: parameter defaults, control ranges,
// trend sweep defaults and the scene layout.

use serde::{Deserialize, Serialize};

// ====================
// Parameter Defaults
// ====================
pub const DEFAULT_SURFACE_CHARGE_DENSITY: f64 = 1.5e-7; // C/m^2
pub const DEFAULT_PRIMARY_CHARGE: f64 = 8.1e-8; // C, from the textbook problem
pub const DEFAULT_MASS: f64 = 1.0e-3; // 1 gram
pub const DEFAULT_STRING_LENGTH: f64 = 0.5; // 50 cm
pub const DEFAULT_SECOND_BALL_ENABLED: bool = false;
pub const DEFAULT_SECONDARY_CHARGE: f64 = -8.1e-8;

// ====================
// Control Ranges (display units)
// ====================
/// Range of a slider control, in the unit it is displayed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRange {
    pub min: f64,
    pub max: f64,
}

impl ControlRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// σ in units of 10⁻⁷ C/m²
pub const SIGMA_RANGE: ControlRange = ControlRange { min: 0.5, max: 10.0 };
/// q1 and q2 in units of 10⁻⁸ C
pub const CHARGE_RANGE: ControlRange = ControlRange { min: -20.0, max: 20.0 };
/// Mass in grams
pub const MASS_RANGE: ControlRange = ControlRange { min: 0.1, max: 5.0 };

// ====================
// Trend Sweep
// ====================
/// Default trend sweeps σ from 1.0 to 10.0 (×10⁻⁷ C/m²)
pub const TREND_START: f64 = 1.0;
pub const TREND_END: f64 = 10.0;
pub const TREND_STEP: f64 = 0.5;
/// Slack when counting samples so that `end` survives float division error
pub const SWEEP_COUNT_EPSILON: f64 = 1e-9;
/// Decimal places the chart shows for each axis
pub const CHART_X_DECIMALS: usize = 1;
pub const CHART_Y_DECIMALS: usize = 4;
/// r² above which a trend is reported as linear
pub const LINEAR_TREND_R_SQUARED: f64 = 0.999_999;

// ====================
// Scene Layout (pixels)
// ====================
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 450.0;
pub const CEILING_Y: f32 = 50.0;
pub const SHEET_MARGIN: f32 = 50.0;
/// Horizontal distance from the sheet to each string anchor
pub const ANCHOR_OFFSET: f32 = 100.0;
pub const PIXELS_PER_METRE: f32 = 300.0;
/// Gravity arrow length; the other arrows are scaled relative to it
pub const GRAVITY_ARROW_LENGTH: f32 = 60.0;
pub const BALL_RADIUS: f32 = 15.0;

// ====================
// Explanation
// ====================
pub const DEFAULT_EXPLAIN_LANGUAGE: &str = "Hebrew";
pub const DEFAULT_EXPLAIN_TIMEOUT_MS: u64 = 15_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ceiling_y: f32,
    pub sheet_margin: f32,
    pub anchor_offset: f32,
    /// Screen length of one metre of string
    pub pixels_per_metre: f32,
    pub gravity_arrow_length: f32,
    pub ball_radius: f32,
}

impl LayoutConfig {
    /// X coordinate of the sheet, drawn down the middle of the canvas.
    pub fn sheet_x(&self) -> f32 {
        self.canvas_width / 2.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ceiling_y: CEILING_Y,
            sheet_margin: SHEET_MARGIN,
            anchor_offset: ANCHOR_OFFSET,
            pixels_per_metre: PIXELS_PER_METRE,
            gravity_arrow_length: GRAVITY_ARROW_LENGTH,
            ball_radius: BALL_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Language the commentary is requested in
    pub language: String,
    /// Applied by the caller; the explanation task itself never times out
    pub timeout_ms: u64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_EXPLAIN_LANGUAGE.to_string(),
            timeout_ms: DEFAULT_EXPLAIN_TIMEOUT_MS,
        }
    }
}
