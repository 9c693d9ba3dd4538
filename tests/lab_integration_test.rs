//! End-to-end checks through the public API: lab file, edits, solve, trend, scene.

use approx::assert_relative_eq;
use sheet_lab::commands::{LabState, ParamCommand};
use sheet_lab::format::format_scientific;
use sheet_lab::init_config::LabFile;
use sheet_lab::plotting::analysis::{classify, Trend};
use sheet_lab::plotting::export::{export_series, ExportFormat};
use sheet_lab::plotting::SweepSeries;
use sheet_lab::projection::ForceKind;
use sheet_lab::readout::Readout;
use sheet_lab::{compute, sweep, Field, LabError, ParameterSet, SweepSpec};

const LAB: &str = r#"
[parameters]
surface_charge_density = 1.5e-7
primary_charge = 8.1e-8
mass = 1e-3
string_length = 0.5
second_ball_enabled = true
secondary_charge = -8.1e-8
"#;

fn lab_state() -> LabState {
    let file = LabFile::from_toml_str(LAB).expect("lab file parses");
    LabState::new(file.parameters, file.layout).expect("valid parameters")
}

// ── Model ─────────────────────────────────────────────────────────

#[test]
fn test_doubling_sigma_doubles_tan() {
    let base = ParameterSet {
        surface_charge_density: 1.5e-7,
        primary_charge: 8.1e-8,
        mass: 1e-3,
        ..Default::default()
    };
    let a = compute(&base, 8.1e-8).unwrap();
    let b = compute(&base.with_field(Field::SurfaceChargeDensity, 3.0e-7), 8.1e-8).unwrap();
    assert_relative_eq!(b.tan_deflection_angle, 2.0 * a.tan_deflection_angle, max_relative = 1e-12);
    assert_relative_eq!(b.electric_force, 2.0 * a.electric_force, max_relative = 1e-12);
}

#[test]
fn test_zero_mass_rejected_everywhere() {
    let params = ParameterSet { mass: 0.0, ..Default::default() };
    assert!(matches!(compute(&params, 1e-8), Err(LabError::InvalidParameter { .. })));
    assert!(LabState::new(params, Default::default()).is_err());
    assert!(LabFile::from_toml_str("[parameters]\nmass = -1.0\n").is_err());
}

// ── Session ───────────────────────────────────────────────────────

#[test]
fn test_edit_then_solve() {
    let mut lab = lab_state();
    let before = lab.results().unwrap();
    lab.apply(ParamCommand::SetMass { grams: 2.0 }).unwrap();
    let after = lab.results().unwrap();
    assert_relative_eq!(
        after.tan_deflection_angle,
        before.tan_deflection_angle / 2.0,
        max_relative = 1e-12
    );
    assert_eq!(Readout::new(&after).electric_field, Readout::new(&before).electric_field);
}

#[test]
fn test_scene_draws_both_balls_toward_their_forces() {
    let scene = lab_state().scene().unwrap();
    assert_eq!(scene.balls.len(), 2);

    let q1 = &scene.balls[0];
    let q2 = &scene.balls[1];
    // q1 > 0 on the right is pushed away; q2 < 0 on the left is pulled toward the sheet
    assert!(q1.center.x > q1.anchor.x);
    assert!(q2.center.x > q2.anchor.x);
    assert!(q1.arrow(ForceKind::Electric).to.x > q1.center.x);
    assert!(q2.arrow(ForceKind::Electric).to.x > q2.center.x);
    assert_relative_eq!(q1.signed_angle, q2.signed_angle, max_relative = 1e-12);
}

// ── Trend ─────────────────────────────────────────────────────────

#[test]
fn test_default_trend_is_nineteen_linear_points() {
    let lab = lab_state();
    let points = lab.trend().unwrap();
    assert_eq!(points.len(), 19);
    assert!(points.windows(2).all(|w| w[0].x < w[1].x && w[0].y < w[1].y));
    assert_eq!(classify(&points), Trend::Linear);
}

#[test]
fn test_degenerate_sweeps_are_empty() {
    let params = ParameterSet::default();
    let zero_step = SweepSpec::new(Field::SurfaceChargeDensity, 1.0, 10.0, 0.0);
    let reversed = SweepSpec::new(Field::SurfaceChargeDensity, 10.0, 1.0, 0.5);
    assert!(sweep(&params, &zero_step).unwrap().is_empty());
    assert!(sweep(&params, &reversed).unwrap().is_empty());
}

#[test]
fn test_trend_json_for_chart() {
    let series = SweepSeries::generate("sigma", lab_state().params(), SweepSpec::trend()).unwrap();
    let json = export_series(&series, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let points = value.as_array().unwrap();
    assert_eq!(points.len(), 19);
    assert_eq!(points[0]["x"], "1.0");
    assert!(points[0]["y"].as_f64().unwrap() > 0.0);
}

// ── Formatting ────────────────────────────────────────────────────

#[test]
fn test_scientific_formatting_contract() {
    assert_eq!(format_scientific(0.0, 2), "0.00e+0");
    assert_eq!(format_scientific(-123000.0, 2), "-1.23e+5");
}
