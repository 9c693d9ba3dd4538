//! Physical constants and display-unit scales.
//!
//! All quantities in the model are SI:
//! - Charge: coulomb (C)
//! - Surface charge density: C/m²
//! - Mass: kilogram (kg)
//! - Length: metre (m)
//! - Force: newton (N)

/// Vacuum permittivity ε₀ in F/m.
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Standard gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Surface charge density is shown to learners in units of 10⁻⁷ C/m².
pub const SIGMA_DISPLAY_EXPONENT: i32 = -7;
pub const SIGMA_DISPLAY_SCALE: f64 = 1.0e-7;
/// Ball charges are shown in units of 10⁻⁸ C.
pub const CHARGE_DISPLAY_EXPONENT: i32 = -8;
pub const CHARGE_DISPLAY_SCALE: f64 = 1.0e-8;
/// Mass is entered in grams.
pub const GRAM: f64 = 1.0e-3;

/// Convert a value given in display units back to SI.
pub fn from_display(value: f64, scale: f64) -> f64 {
    value * scale
}

/// Convert an SI value to display units.
pub fn to_display(value: f64, scale: f64) -> f64 {
    value / scale
}
