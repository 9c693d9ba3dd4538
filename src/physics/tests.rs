// physics/tests.rs
// Equilibrium invariants and the textbook values

use super::*;
use crate::parameters::Field;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

fn textbook() -> ParameterSet {
    ParameterSet {
        surface_charge_density: 1.5e-7,
        primary_charge: 8.1e-8,
        mass: 1e-3,
        ..ParameterSet::default()
    }
}

#[test]
fn textbook_values() {
    let r = compute(&textbook(), 8.1e-8).unwrap();
    assert_relative_eq!(
        r.electric_field,
        1.5e-7 / (2.0 * 8.8541878128e-12),
        max_relative = 1e-12
    );
    assert_relative_eq!(r.electric_field, 8470.4, max_relative = 1e-4);
    assert_relative_eq!(r.gravity_force, 9.80665e-3, max_relative = 1e-12);
    assert_relative_eq!(r.electric_force, 8.1e-8 * r.electric_field, max_relative = 1e-12);
    // About 4 degrees for the problem as stated
    assert!(r.deflection_degrees() > 3.9 && r.deflection_degrees() < 4.1);
}

#[test]
fn force_balance_holds_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let params = ParameterSet {
            surface_charge_density: rng.random_range(-1e-5..1e-5),
            mass: rng.random_range(1e-5..1.0),
            ..ParameterSet::default()
        };
        let charge = rng.random_range(-1e-6..1e-6);
        let r = compute(&params, charge).unwrap();

        let lhs = r.tension_force * r.tension_force;
        let rhs = r.electric_force * r.electric_force + r.gravity_force * r.gravity_force;
        assert_relative_eq!(lhs, rhs, max_relative = 1e-9);
        assert_relative_eq!(
            r.tan_deflection_angle,
            r.electric_force / r.gravity_force,
            max_relative = 1e-12
        );
        assert_eq!(r.deflection_angle, r.tan_deflection_angle.atan());
        assert!(r.deflection_angle >= 0.0 && r.deflection_angle < FRAC_PI_2);
        assert!(r.electric_force >= 0.0);
        assert!(r.gravity_force > 0.0);
        assert!(r.tension_force > 0.0);
    }
}

#[test]
fn doubling_sigma_doubles_force_and_tan() {
    let base = compute(&textbook(), 8.1e-8).unwrap();
    let doubled =
        compute(&textbook().with_field(Field::SurfaceChargeDensity, 3.0e-7), 8.1e-8).unwrap();
    assert_relative_eq!(doubled.electric_force, 2.0 * base.electric_force, max_relative = 1e-12);
    assert_relative_eq!(
        doubled.tan_deflection_angle,
        2.0 * base.tan_deflection_angle,
        max_relative = 1e-12
    );
    assert_eq!(doubled.gravity_force, base.gravity_force);
}

#[test]
fn zero_charge_hangs_straight() {
    let r = compute(&textbook(), 0.0).unwrap();
    assert_eq!(r.electric_force, 0.0);
    assert_eq!(r.tan_deflection_angle, 0.0);
    assert_eq!(r.deflection_angle, 0.0);
    assert_eq!(r.tension_force, r.gravity_force);
}

#[test]
fn force_magnitude_ignores_signs() {
    let p = textbook();
    let pos = compute(&p, 8.1e-8).unwrap();
    let neg = compute(&p, -8.1e-8).unwrap();
    let flipped = compute(&p.with_field(Field::SurfaceChargeDensity, -1.5e-7), 8.1e-8).unwrap();
    assert_eq!(pos.electric_force, neg.electric_force);
    assert_eq!(pos.electric_force, flipped.electric_force);
    assert!(flipped.electric_field < 0.0);
}

#[test]
fn non_positive_mass_is_an_error() {
    for mass in [0.0, -2e-3] {
        let err = compute(&textbook().with_field(Field::Mass, mass), 8.1e-8).unwrap_err();
        assert!(matches!(err, LabError::InvalidParameter { name: "mass", .. }), "{err}");
    }
}

#[test]
fn non_finite_charge_is_an_error() {
    assert!(compute(&textbook(), f64::INFINITY).is_err());
}

#[test]
fn compute_ball_uses_the_matching_charge() {
    let p = ParameterSet { second_ball_enabled: true, secondary_charge: 4.0e-8, ..textbook() };
    let first = compute_ball(&p, Ball::Primary).unwrap();
    let second = compute_ball(&p, Ball::Secondary).unwrap();
    assert_relative_eq!(
        first.tan_deflection_angle,
        second.tan_deflection_angle * 8.1e-8 / 4.0e-8,
        max_relative = 1e-12
    );
    assert_abs_diff_eq!(first.gravity_force, second.gravity_force);
}

#[test]
fn string_length_does_not_change_forces() {
    let a = compute(&textbook(), 8.1e-8).unwrap();
    let b = compute(&textbook().with_field(Field::StringLength, 2.0), 8.1e-8).unwrap();
    assert_eq!(a, b);
}
