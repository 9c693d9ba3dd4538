//! The parameter set shared by the model and all of its consumers.
//!
//! A `ParameterSet` is a plain value. Edits never mutate a set the model is
//! looking at; they produce a new one (see [`ParameterSet::with_field`] and
//! `commands`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{LabError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// σ, C/m². The sign flips the field but not the drawn deflection.
    pub surface_charge_density: f64,
    /// q1, C
    pub primary_charge: f64,
    /// kg, must be positive
    pub mass: f64,
    /// m, only used for layout
    pub string_length: f64,
    pub second_ball_enabled: bool,
    /// q2, C
    pub secondary_charge: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            surface_charge_density: config::DEFAULT_SURFACE_CHARGE_DENSITY,
            primary_charge: config::DEFAULT_PRIMARY_CHARGE,
            mass: config::DEFAULT_MASS,
            string_length: config::DEFAULT_STRING_LENGTH,
            second_ball_enabled: config::DEFAULT_SECOND_BALL_ENABLED,
            secondary_charge: config::DEFAULT_SECONDARY_CHARGE,
        }
    }
}

/// A numeric field of [`ParameterSet`] that can be swept or edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SurfaceChargeDensity,
    PrimaryCharge,
    Mass,
    StringLength,
    SecondaryCharge,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::SurfaceChargeDensity,
        Field::PrimaryCharge,
        Field::Mass,
        Field::StringLength,
        Field::SecondaryCharge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::SurfaceChargeDensity => "surface_charge_density",
            Field::PrimaryCharge => "primary_charge",
            Field::Mass => "mass",
            Field::StringLength => "string_length",
            Field::SecondaryCharge => "secondary_charge",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::SurfaceChargeDensity => "C/m²",
            Field::PrimaryCharge | Field::SecondaryCharge => "C",
            Field::Mass => "kg",
            Field::StringLength => "m",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "surface_charge_density" | "sigma" => Ok(Field::SurfaceChargeDensity),
            "primary_charge" | "q1" => Ok(Field::PrimaryCharge),
            "mass" | "m1" => Ok(Field::Mass),
            "string_length" | "length" | "L" => Ok(Field::StringLength),
            "secondary_charge" | "q2" => Ok(Field::SecondaryCharge),
            _ => Err(LabError::UnknownField(s.to_string())),
        }
    }
}

/// Which suspended ball a computation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ball {
    Primary,
    Secondary,
}

impl Ball {
    pub fn label(self) -> &'static str {
        match self {
            Ball::Primary => "q1",
            Ball::Secondary => "q2",
        }
    }
}

impl ParameterSet {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::SurfaceChargeDensity => self.surface_charge_density,
            Field::PrimaryCharge => self.primary_charge,
            Field::Mass => self.mass,
            Field::StringLength => self.string_length,
            Field::SecondaryCharge => self.secondary_charge,
        }
    }

    /// Copy of `self` with exactly one field replaced.
    #[must_use]
    pub fn with_field(&self, field: Field, value: f64) -> Self {
        let mut next = *self;
        match field {
            Field::SurfaceChargeDensity => next.surface_charge_density = value,
            Field::PrimaryCharge => next.primary_charge = value,
            Field::Mass => next.mass = value,
            Field::StringLength => next.string_length = value,
            Field::SecondaryCharge => next.secondary_charge = value,
        }
        next
    }

    pub fn charge(&self, ball: Ball) -> f64 {
        match ball {
            Ball::Primary => self.primary_charge,
            Ball::Secondary => self.secondary_charge,
        }
    }

    /// Balls that are modelled and drawn for this set, primary first.
    pub fn balls(&self) -> impl Iterator<Item = Ball> {
        let second = self.second_ball_enabled.then_some(Ball::Secondary);
        std::iter::once(Ball::Primary).chain(second)
    }

    /// Reject sets the model cannot evaluate. Mass is never clamped.
    pub fn validate(&self) -> Result<()> {
        for field in Field::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(LabError::InvalidParameter {
                    name: field.name(),
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.mass <= 0.0 {
            return Err(LabError::InvalidParameter {
                name: Field::Mass.name(),
                value: self.mass,
                reason: "must be positive",
            });
        }
        if self.string_length <= 0.0 {
            return Err(LabError::InvalidParameter {
                name: Field::StringLength.name(),
                value: self.string_length,
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_textbook_problem() {
        let p = ParameterSet::default();
        assert_eq!(p.surface_charge_density, 1.5e-7);
        assert_eq!(p.primary_charge, 8.1e-8);
        assert_eq!(p.mass, 1e-3);
        assert_eq!(p.string_length, 0.5);
        assert!(!p.second_ball_enabled);
        assert_eq!(p.secondary_charge, -8.1e-8);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn with_field_replaces_only_that_field() {
        let p = ParameterSet::default();
        let q = p.with_field(Field::Mass, 2e-3);
        assert_eq!(q.mass, 2e-3);
        assert_eq!(q.with_field(Field::Mass, p.mass), p);
        assert_eq!(p.mass, 1e-3, "original is untouched");
    }

    #[test]
    fn zero_and_negative_mass_are_rejected() {
        for mass in [0.0, -1e-3] {
            let err = ParameterSet::default().with_field(Field::Mass, mass).validate();
            assert!(matches!(err, Err(LabError::InvalidParameter { name: "mass", .. })));
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let p = ParameterSet::default().with_field(Field::SurfaceChargeDensity, f64::NAN);
        assert!(p.validate().is_err());
    }

    #[test]
    fn field_names_parse_including_short_aliases() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert_eq!("sigma".parse::<Field>().unwrap(), Field::SurfaceChargeDensity);
        assert_eq!("q2".parse::<Field>().unwrap(), Field::SecondaryCharge);
        assert!(matches!("volume".parse::<Field>(), Err(LabError::UnknownField(_))));
    }

    #[test]
    fn second_ball_is_listed_only_when_enabled() {
        let p = ParameterSet::default();
        assert_eq!(p.balls().collect::<Vec<_>>(), vec![Ball::Primary]);
        let p = ParameterSet { second_ball_enabled: true, ..p };
        assert_eq!(p.balls().collect::<Vec<_>>(), vec![Ball::Primary, Ball::Secondary]);
        assert_eq!(p.charge(Ball::Secondary), p.secondary_charge);
    }
}
