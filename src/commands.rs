// commands.rs
// Parameter edits coming from the controls. Each edit produces a new
// ParameterSet; the previous one is never modified.

use tracing::debug;

use crate::config::{self, ControlRange};
use crate::error::{LabError, Result};
use crate::parameters::{Field, ParameterSet};
use crate::physics::{self, ResultSet};
use crate::plotting::{self, SweepPoint};
use crate::projection::Scene;
use crate::units;

/// A single control edit, in the unit the control displays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamCommand {
    /// σ in units of 10⁻⁷ C/m²
    SetSurfaceChargeDensity { value: f64 },
    /// q1 in units of 10⁻⁸ C
    SetPrimaryCharge { value: f64 },
    SetMass { grams: f64 },
    SetStringLength { metres: f64 },
    SetSecondBallEnabled { enabled: bool },
    /// q2 in units of 10⁻⁸ C
    SetSecondaryCharge { value: f64 },
    Reset,
}

/// Apply `cmd` to `current` and return the replacement set.
pub fn process_command(cmd: ParamCommand, current: &ParameterSet) -> Result<ParameterSet> {
    let next = match cmd {
        ParamCommand::SetSurfaceChargeDensity { value } => handle_scaled(
            current,
            Field::SurfaceChargeDensity,
            value,
            &config::SIGMA_RANGE,
            units::SIGMA_DISPLAY_SCALE,
        )?,
        ParamCommand::SetPrimaryCharge { value } => handle_scaled(
            current,
            Field::PrimaryCharge,
            value,
            &config::CHARGE_RANGE,
            units::CHARGE_DISPLAY_SCALE,
        )?,
        ParamCommand::SetMass { grams } => {
            handle_scaled(current, Field::Mass, grams, &config::MASS_RANGE, units::GRAM)?
        }
        ParamCommand::SetStringLength { metres } => current.with_field(Field::StringLength, metres),
        ParamCommand::SetSecondBallEnabled { enabled } => ParameterSet {
            second_ball_enabled: enabled,
            ..*current
        },
        ParamCommand::SetSecondaryCharge { value } => handle_scaled(
            current,
            Field::SecondaryCharge,
            value,
            &config::CHARGE_RANGE,
            units::CHARGE_DISPLAY_SCALE,
        )?,
        ParamCommand::Reset => ParameterSet::default(),
    };
    next.validate()?;
    debug!(?cmd, "parameters replaced");
    Ok(next)
}

/// Out-of-range input is refused rather than clamped.
fn handle_scaled(
    current: &ParameterSet,
    field: Field,
    display_value: f64,
    range: &ControlRange,
    scale: f64,
) -> Result<ParameterSet> {
    if !range.contains(display_value) {
        return Err(LabError::InvalidParameter {
            name: field.name(),
            value: display_value,
            reason: "outside control range",
        });
    }
    Ok(current.with_field(field, units::from_display(display_value, scale)))
}

/// The caller-side holder of the current parameter set. Every derived value is
/// recomputed from the set on request.
#[derive(Clone, Debug, Default)]
pub struct LabState {
    params: ParameterSet,
    pub layout: config::LayoutConfig,
}

impl LabState {
    pub fn new(params: ParameterSet, layout: config::LayoutConfig) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, layout })
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Apply an edit. A rejected edit leaves the current set in place.
    pub fn apply(&mut self, cmd: ParamCommand) -> Result<&ParameterSet> {
        self.params = process_command(cmd, &self.params)?;
        Ok(&self.params)
    }

    pub fn results(&self) -> Result<ResultSet> {
        physics::compute(&self.params, self.params.primary_charge)
    }

    pub fn trend(&self) -> Result<Vec<SweepPoint>> {
        plotting::trend(&self.params)
    }

    pub fn scene(&self) -> Result<Scene> {
        Scene::build(&self.params, &self.layout)
    }
}
