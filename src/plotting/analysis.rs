// plotting/analysis.rs
// Trend analysis for sweep series

use serde::{Deserialize, Serialize};

use super::SweepPoint;
use crate::config;

/// Least-squares line through a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Linear,
    NonLinear,
    /// Fewer than two distinct x values
    Insufficient,
}

impl LinearFit {
    pub fn trend(&self) -> Trend {
        if self.r_squared >= config::LINEAR_TREND_R_SQUARED {
            Trend::Linear
        } else {
            Trend::NonLinear
        }
    }

    /// Whether the line is a direct proportion y = kx, within `tolerance` of
    /// the largest fitted value.
    pub fn passes_through_origin(&self, points: &[SweepPoint], tolerance: f64) -> bool {
        let reach = points
            .iter()
            .map(|p| (self.slope * p.x).abs())
            .fold(0.0_f64, f64::max);
        self.intercept.abs() <= tolerance * reach.max(f64::MIN_POSITIVE)
    }
}

/// Fit y = slope·x + intercept. `None` when there are fewer than two distinct x.
pub fn linear_fit(points: &[SweepPoint]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let ss_res: f64 = points
        .iter()
        .map(|p| {
            let r = p.y - (slope * p.x + intercept);
            r * r
        })
        .sum();
    // A constant series is fitted exactly by a flat line
    let r_squared = if syy == 0.0 { 1.0 } else { 1.0 - ss_res / syy };

    Some(LinearFit { slope, intercept, r_squared })
}

pub fn classify(points: &[SweepPoint]) -> Trend {
    linear_fit(points).map_or(Trend::Insufficient, |fit| fit.trend())
}
