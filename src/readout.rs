// readout.rs
// Dashboard cards and control labels for the current parameter set

use std::fmt;

use serde::Serialize;

use crate::format::{format_scaled, format_scientific};
use crate::parameters::ParameterSet;
use crate::physics::ResultSet;
use crate::units;

/// Text shown to the learner for one solved parameter set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    /// E, e.g. `8.47e+3 N/C`
    pub electric_field: String,
    /// α in degrees with two decimals
    pub deflection_angle: String,
    /// tan(α) with three decimals
    pub tan_deflection_angle: String,
    pub electric_force: String,
    pub gravity_force: String,
    pub tension_force: String,
}

impl Readout {
    pub fn new(results: &ResultSet) -> Self {
        Self {
            electric_field: format!("{} N/C", format_scientific(results.electric_field, 2)),
            deflection_angle: format!("{:.2}°", results.deflection_degrees()),
            tan_deflection_angle: format!("{:.3}", results.tan_deflection_angle),
            electric_force: format!("{} N", format_scientific(results.electric_force, 2)),
            gravity_force: format!("{} N", format_scientific(results.gravity_force, 2)),
            tension_force: format!("{} N", format_scientific(results.tension_force, 2)),
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Electric field (E)    {}", self.electric_field)?;
        writeln!(f, "Deflection angle (α)  {}", self.deflection_angle)?;
        writeln!(f, "tan(α)                {}", self.tan_deflection_angle)?;
        writeln!(f, "Electric force (Fe)   {}", self.electric_force)?;
        writeln!(f, "Gravity (Fg)          {}", self.gravity_force)?;
        write!(f, "Tension (T)           {}", self.tension_force)
    }
}

/// Labels next to the parameter controls, in their display units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlLabels {
    pub surface_charge_density: String,
    pub primary_charge: String,
    pub mass: String,
    pub secondary_charge: Option<String>,
}

impl ControlLabels {
    pub fn new(params: &ParameterSet) -> Self {
        let charge = |q: f64| format!("{} C", format_scaled(q, units::CHARGE_DISPLAY_EXPONENT, 2));
        Self {
            surface_charge_density: format!(
                "{} C/m²",
                format_scaled(params.surface_charge_density, units::SIGMA_DISPLAY_EXPONENT, 2)
            ),
            primary_charge: charge(params.primary_charge),
            mass: format!("{:.1} g", units::to_display(params.mass, units::GRAM)),
            secondary_charge: params.second_ball_enabled.then(|| charge(params.secondary_charge)),
        }
    }
}

impl fmt::Display for ControlLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "σ   {}", self.surface_charge_density)?;
        writeln!(f, "q1  {}", self.primary_charge)?;
        write!(f, "m   {}", self.mass)?;
        if let Some(q2) = &self.secondary_charge {
            write!(f, "\nq2  {}", q2)?;
        }
        Ok(())
    }
}
