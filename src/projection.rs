// projection.rs
// Maps solved angles onto screen geometry for the rendering surface.
//
// Screen coordinates: x to the right, y downward, origin top-left. The sheet
// is a vertical line in the middle of the canvas; the primary ball hangs on
// its right and the optional second ball on its left.

use palette::Srgb;
use serde::Serialize;
use smallvec::SmallVec;
use ultraviolet::Vec2;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::parameters::{Ball, ParameterSet};
use crate::physics::{self, ResultSet};

pub const SHEET_COLOR: Srgb<u8> = Srgb::new(0x3b, 0x82, 0xf6);
pub const POSITIVE_BALL_COLOR: Srgb<u8> = Srgb::new(0xef, 0x44, 0x44);
pub const NEGATIVE_BALL_COLOR: Srgb<u8> = Srgb::new(0x10, 0xb9, 0x81);
pub const GRAVITY_COLOR: Srgb<u8> = Srgb::new(0xf5, 0x9e, 0x0b);
pub const ELECTRIC_COLOR: Srgb<u8> = Srgb::new(0x3b, 0x82, 0xf6);
pub const TENSION_COLOR: Srgb<u8> = Srgb::new(0x8b, 0x5c, 0xf6);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn of(ball: Ball) -> Self {
        match ball {
            Ball::Primary => Side::Right,
            Ball::Secondary => Side::Left,
        }
    }
}

/// +1 for a positive charge, -1 otherwise (zero included). The sheet's sign is
/// not consulted: a negative sheet still pushes a positive ball away.
pub fn direction_sign(charge: f64) -> f64 {
    if charge > 0.0 {
        1.0
    } else {
        -1.0
    }
}

pub fn signed_angle(deflection_angle: f64, direction: f64, side: Side) -> f64 {
    deflection_angle * direction * side.sign()
}

/// End of a string of `visual_length` hanging from `anchor` at the signed
/// angle; positive angles swing toward +x.
pub fn project(
    anchor: Vec2,
    deflection_angle: f64,
    direction: f64,
    side: Side,
    visual_length: f32,
) -> Vec2 {
    let (sin, cos) = signed_angle(deflection_angle, direction, side).sin_cos();
    Vec2::new(
        anchor.x + sin as f32 * visual_length,
        anchor.y + cos as f32 * visual_length,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForceKind {
    Gravity,
    Electric,
    Tension,
}

impl ForceKind {
    pub fn label(self) -> &'static str {
        match self {
            ForceKind::Gravity => "Fg",
            ForceKind::Electric => "Fe",
            ForceKind::Tension => "T",
        }
    }

    pub fn color(self) -> Srgb<u8> {
        match self {
            ForceKind::Gravity => GRAVITY_COLOR,
            ForceKind::Electric => ELECTRIC_COLOR,
            ForceKind::Tension => TENSION_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ForceArrow {
    pub kind: ForceKind,
    pub from: Vec2,
    pub to: Vec2,
}

impl ForceArrow {
    pub fn length(&self) -> f32 {
        (self.to - self.from).mag()
    }
}

/// Everything the renderer needs to draw one hanging ball.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BallFigure {
    pub ball: Ball,
    pub side: Side,
    pub anchor: Vec2,
    pub center: Vec2,
    pub radius: f32,
    #[serde(serialize_with = "serialize_color")]
    pub color: Srgb<u8>,
    pub signed_angle: f64,
    pub results: ResultSet,
    /// Gravity, electric force, tension, in that order
    pub arrows: [ForceArrow; 3],
}

impl BallFigure {
    pub fn build(params: &ParameterSet, ball: Ball, layout: &LayoutConfig) -> Result<Self> {
        let results = physics::compute_ball(params, ball)?;
        let charge = params.charge(ball);
        let side = Side::of(ball);
        let direction = direction_sign(charge);

        let anchor = Vec2::new(
            layout.sheet_x() + layout.anchor_offset * side.sign() as f32,
            layout.ceiling_y,
        );
        let visual_length = params.string_length as f32 * layout.pixels_per_metre;
        let angle = signed_angle(results.deflection_angle, direction, side);
        let center = project(anchor, results.deflection_angle, direction, side, visual_length);

        // Arrow lengths are relative to a fixed gravity arrow so they stay readable
        let fg_len = layout.gravity_arrow_length;
        let fe_len = fg_len * results.tan_deflection_angle as f32;
        let t_len = fg_len.hypot(fe_len);
        let fe_direction = (direction * side.sign()) as f32;
        let (sin, cos) = angle.sin_cos();

        let arrows = [
            ForceArrow {
                kind: ForceKind::Gravity,
                from: center,
                to: center + Vec2::new(0.0, fg_len),
            },
            ForceArrow {
                kind: ForceKind::Electric,
                from: center,
                to: center + Vec2::new(fe_len * fe_direction, 0.0),
            },
            ForceArrow {
                kind: ForceKind::Tension,
                from: center,
                to: center - Vec2::new(sin as f32 * t_len, cos as f32 * t_len),
            },
        ];

        Ok(Self {
            ball,
            side,
            anchor,
            center,
            radius: layout.ball_radius,
            color: if charge > 0.0 { POSITIVE_BALL_COLOR } else { NEGATIVE_BALL_COLOR },
            signed_angle: angle,
            results,
            arrows,
        })
    }

    pub fn arrow(&self, kind: ForceKind) -> &ForceArrow {
        match kind {
            ForceKind::Gravity => &self.arrows[0],
            ForceKind::Electric => &self.arrows[1],
            ForceKind::Tension => &self.arrows[2],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    #[serde(serialize_with = "serialize_color")]
    pub sheet_color: Srgb<u8>,
    pub sheet_x: f32,
    pub sheet_top: f32,
    pub sheet_bottom: f32,
    pub balls: SmallVec<[BallFigure; 2]>,
}

impl Scene {
    /// One figure per modelled ball; the model is called once per ball.
    pub fn build(params: &ParameterSet, layout: &LayoutConfig) -> Result<Self> {
        let balls = params
            .balls()
            .map(|ball| BallFigure::build(params, ball, layout))
            .collect::<Result<SmallVec<[BallFigure; 2]>>>()?;

        Ok(Self {
            sheet_color: SHEET_COLOR,
            sheet_x: layout.sheet_x(),
            sheet_top: layout.sheet_margin,
            sheet_bottom: layout.canvas_height - layout.sheet_margin,
            balls,
        })
    }
}

pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn serialize_color<S: serde::Serializer>(
    color: &Srgb<u8>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(*color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Field;
    use approx::assert_abs_diff_eq;

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn zero_angle_hangs_straight_down_for_either_sign() {
        let anchor = Vec2::new(500.0, 50.0);
        for direction in [direction_sign(1e-8), direction_sign(-1e-8)] {
            for side in [Side::Left, Side::Right] {
                let end = project(anchor, 0.0, direction, side, 150.0);
                assert_eq!(end.x, anchor.x);
                assert_eq!(end.y, anchor.y + 150.0);
            }
        }
    }

    #[test]
    fn positive_charge_on_the_right_swings_away_from_sheet() {
        let anchor = Vec2::new(500.0, 50.0);
        let end = project(anchor, 0.3, direction_sign(8.1e-8), Side::Right, 150.0);
        assert!(end.x > anchor.x);
    }

    #[test]
    fn sign_composition() {
        let anchor = Vec2::zero();
        let dx = |charge: f64, side| project(anchor, 0.3, direction_sign(charge), side, 100.0).x;
        assert!(dx(1.0, Side::Right) > 0.0);
        assert!(dx(-1.0, Side::Right) < 0.0);
        assert!(dx(1.0, Side::Left) < 0.0);
        assert!(dx(-1.0, Side::Left) > 0.0);
    }

    #[test]
    fn zero_charge_counts_as_negative_direction() {
        assert_eq!(direction_sign(0.0), -1.0);
    }

    #[test]
    fn sheet_sign_does_not_change_drawn_direction() {
        let params = ParameterSet::default();
        let flipped =
            params.with_field(Field::SurfaceChargeDensity, -params.surface_charge_density);
        let a = BallFigure::build(&params, Ball::Primary, &layout()).unwrap();
        let b = BallFigure::build(&flipped, Ball::Primary, &layout()).unwrap();
        assert_eq!(a.center, b.center);
    }

    #[test]
    fn string_keeps_its_visual_length() {
        let params = ParameterSet::default();
        let fig = BallFigure::build(&params, Ball::Primary, &layout()).unwrap();
        assert_abs_diff_eq!((fig.center - fig.anchor).mag(), 0.5 * 300.0, epsilon = 1e-3);
        assert_eq!(fig.anchor, Vec2::new(500.0, 50.0));
    }

    #[test]
    fn arrows_follow_the_force_triangle() {
        let params = ParameterSet::default();
        let fig = BallFigure::build(&params, Ball::Primary, &layout()).unwrap();

        let fg = fig.arrow(ForceKind::Gravity);
        assert_eq!(fg.to.x, fg.from.x);
        assert_abs_diff_eq!(fg.length(), 60.0, epsilon = 1e-4);

        let fe = fig.arrow(ForceKind::Electric);
        assert_eq!(fe.to.y, fe.from.y);
        assert!(fe.to.x > fe.from.x, "pushed away from the sheet");
        assert_abs_diff_eq!(
            fe.length(),
            60.0 * fig.results.tan_deflection_angle as f32,
            epsilon = 1e-4
        );

        // Tension points back up the string toward the anchor
        let t = fig.arrow(ForceKind::Tension);
        assert_abs_diff_eq!(t.length(), fg.length().hypot(fe.length()), epsilon = 1e-3);
        let along = (t.to - t.from).normalized();
        let to_anchor = (fig.anchor - fig.center).normalized();
        assert_abs_diff_eq!(along.dot(to_anchor), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn scene_has_one_figure_per_ball() {
        let params = ParameterSet::default();
        assert_eq!(Scene::build(&params, &layout()).unwrap().balls.len(), 1);

        let params = ParameterSet { second_ball_enabled: true, ..params };
        let scene = Scene::build(&params, &layout()).unwrap();
        assert_eq!(scene.balls.len(), 2);
        let second = &scene.balls[1];
        assert_eq!(second.side, Side::Left);
        assert_eq!(second.color, NEGATIVE_BALL_COLOR);
        // Negative charge on the left: direction -1, side -1, swings toward +x (the sheet)
        assert!(second.center.x > second.anchor.x);
        assert_eq!(scene.sheet_x, 400.0);
        assert_eq!(hex(scene.sheet_color), "#3b82f6");
    }

    #[test]
    fn invalid_mass_fails_the_scene() {
        let params = ParameterSet::default().with_field(Field::Mass, 0.0);
        assert!(Scene::build(&params, &layout()).is_err());
    }

    #[test]
    fn colors_render_as_hex() {
        assert_eq!(hex(POSITIVE_BALL_COLOR), "#ef4444");
    }
}
