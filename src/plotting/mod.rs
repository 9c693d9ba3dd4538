// plotting/mod.rs
// Parameter sweeps feeding the trend chart

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use crate::config;
use crate::error::Result;
use crate::format::round_to;
use crate::parameters::{Field, ParameterSet};
use crate::physics;
use crate::units;

pub mod analysis;
pub mod export;


/// Upper bound on samples per sweep; larger requests are truncated.
pub const MAX_SWEEP_SAMPLES: usize = 100_000;

/// One parameter varied over `start..=end` in steps of `step`.
///
/// Samples are expressed in display units; `scale` converts a sample into the
/// SI value substituted into the parameter set (σ is swept as 1.0..10.0 with
/// scale 1e-7). Keys missing from a lab file fall back to the default trend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpec {
    pub field: Field,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub scale: f64,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self::trend()
    }
}

impl SweepSpec {
    pub fn new(field: Field, start: f64, end: f64, step: f64) -> Self {
        Self { field, start, end, step, scale: 1.0 }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// σ from 1.0 to 10.0 ×10⁻⁷ C/m² in steps of 0.5, as on the trend chart.
    pub fn trend() -> Self {
        Self::new(
            Field::SurfaceChargeDensity,
            config::TREND_START,
            config::TREND_END,
            config::TREND_STEP,
        )
        .with_scale(units::SIGMA_DISPLAY_SCALE)
    }

    /// Number of samples in the range; zero for a malformed range.
    pub fn sample_count(&self) -> usize {
        let bounds_ok = self.start.is_finite() && self.end.is_finite() && self.step.is_finite();
        if !bounds_ok || self.step <= 0.0 || self.start > self.end {
            return 0;
        }
        let intervals = ((self.end - self.start) / self.step + config::SWEEP_COUNT_EPSILON).floor();
        if intervals >= MAX_SWEEP_SAMPLES as f64 {
            warn!(
                field = %self.field,
                requested = intervals + 1.0,
                "sweep truncated to {} samples",
                MAX_SWEEP_SAMPLES
            );
            return MAX_SWEEP_SAMPLES;
        }
        intervals as usize + 1
    }

    /// Sample values in strictly ascending order. Computed from the index
    /// rather than accumulated so rounding cannot add or drop the last sample.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.take_samples(self.sample_count())
    }

    // Steps below the float spacing at `start` collapse onto the previous
    // sample; those repeats are skipped.
    fn take_samples(&self, count: usize) -> impl Iterator<Item = f64> + '_ {
        let mut last = f64::NEG_INFINITY;
        (0..count)
            .map(move |i| (self.start + i as f64 * self.step).min(self.end))
            .filter(move |&x| {
                let fresh = x > last;
                if fresh {
                    last = x;
                }
                fresh
            })
    }
}

/// One point of a sweep: the sample (display units) and the resulting tan(α).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub x: f64,
    pub y: f64,
}

/// Chart-facing rendering of a point: x as a fixed-decimal label, y rounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

impl SweepPoint {
    pub fn to_chart(self) -> ChartPoint {
        ChartPoint {
            x: format!("{:.*}", config::CHART_X_DECIMALS, self.x),
            y: round_to(self.y, config::CHART_Y_DECIMALS),
        }
    }
}

/// Hold `params` fixed except `spec.field`, and record tan(α) of the primary
/// ball for every sample. An empty or reversed range yields no points.
pub fn sweep(params: &ParameterSet, spec: &SweepSpec) -> Result<Vec<SweepPoint>> {
    let count = spec.sample_count();
    let _span = info_span!("sweep", field = %spec.field, n = count).entered();

    spec.take_samples(count)
        .map(|x| {
            let varied = params.with_field(spec.field, x * spec.scale);
            let result = physics::compute(&varied, varied.primary_charge)?;
            Ok(SweepPoint { x, y: result.tan_deflection_angle })
        })
        .collect()
}

/// The default σ trend for the current parameters.
pub fn trend(params: &ParameterSet) -> Result<Vec<SweepPoint>> {
    sweep(params, &SweepSpec::trend())
}

/// A sweep together with what produced it, ready for export.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepSeries {
    pub title: String,
    pub spec: SweepSpec,
    pub points: Vec<SweepPoint>,
    pub metadata: BTreeMap<String, String>,
}

impl SweepSeries {
    pub fn generate(
        title: impl Into<String>,
        params: &ParameterSet,
        spec: SweepSpec,
    ) -> Result<Self> {
        let points = sweep(params, &spec)?;

        let mut metadata = BTreeMap::new();
        for field in Field::ALL {
            if field != spec.field {
                metadata.insert(field.name().to_string(), params.get(field).to_string());
            }
        }
        metadata.insert("scale".to_string(), spec.scale.to_string());

        Ok(Self { title: title.into(), spec, points, metadata })
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.points.iter().map(|p| p.to_chart()).collect()
    }

    pub fn fit(&self) -> Option<analysis::LinearFit> {
        analysis::linear_fit(&self.points)
    }
}
