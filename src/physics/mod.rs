//! Static equilibrium of a charged ball hanging next to an infinite charged sheet.
//!
//! Three forces act on the ball: gravity (down), the electric force of the
//! sheet (horizontal) and the string tension. At equilibrium the tension is
//! the resultant of the other two, so the string angle follows from
//! `tan(α) = Fe / Fg`. The sheet field `E = σ / (2ε₀)` does not depend on the
//! distance to the sheet, which makes `tan(α)` linear in σ.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LabError, Result};
use crate::parameters::{Ball, ParameterSet};
use crate::units::{STANDARD_GRAVITY, VACUUM_PERMITTIVITY};

#[cfg(test)]
mod tests;

/// Forces and angle for one ball. Built only by [`compute`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// α in radians, in [0, π/2)
    pub deflection_angle: f64,
    /// Fe / Fg
    pub tan_deflection_angle: f64,
    /// |qE|, N
    pub electric_force: f64,
    /// mg, N
    pub gravity_force: f64,
    /// sqrt(Fe² + Fg²), N
    pub tension_force: f64,
    /// Signed sheet field, N/C
    pub electric_field: f64,
}

impl ResultSet {
    pub fn deflection_degrees(&self) -> f64 {
        self.deflection_angle.to_degrees()
    }
}

/// Field of an infinite uniformly charged sheet, N/C.
pub fn electric_field(surface_charge_density: f64) -> f64 {
    surface_charge_density / (2.0 * VACUUM_PERMITTIVITY)
}

/// Solve the equilibrium for `charge` hanging in the field described by `params`.
///
/// Fails with [`LabError::InvalidParameter`] when the mass is not positive (or
/// any input is not finite); nothing is divided before that check.
pub fn compute(params: &ParameterSet, charge: f64) -> Result<ResultSet> {
    params.validate()?;
    if !charge.is_finite() {
        return Err(LabError::InvalidParameter {
            name: "charge",
            value: charge,
            reason: "must be finite",
        });
    }

    let electric_field = electric_field(params.surface_charge_density);
    let electric_force = (charge * electric_field).abs();
    let gravity_force = params.mass * STANDARD_GRAVITY;

    let tan_deflection_angle = electric_force / gravity_force;
    let deflection_angle = tan_deflection_angle.atan();
    let tension_force = electric_force.hypot(gravity_force);

    debug!(
        sigma = params.surface_charge_density,
        charge,
        mass = params.mass,
        tan_alpha = tan_deflection_angle,
        "computed equilibrium"
    );

    Ok(ResultSet {
        deflection_angle,
        tan_deflection_angle,
        electric_force,
        gravity_force,
        tension_force,
        electric_field,
    })
}

/// [`compute`] for one of the balls described by `params`.
pub fn compute_ball(params: &ParameterSet, ball: Ball) -> Result<ResultSet> {
    compute(params, params.charge(ball))
}
