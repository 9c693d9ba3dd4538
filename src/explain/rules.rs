// explain/rules.rs
// Offline explainer: answers the doubling question from the model itself

use futures::future::{self, BoxFuture, FutureExt};

use super::{ExplanationRequest, ExplanationService};
use crate::error::Result;
use crate::parameters::Field;
use crate::physics;

/// Produces the commentary without any network call, by re-solving the lab
/// with σ doubled.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedExplainer;

impl RuleBasedExplainer {
    pub fn explain_now(&self, request: &ExplanationRequest) -> Result<String> {
        let params = &request.params;
        let sigma = params.surface_charge_density;
        let doubled = params.with_field(Field::SurfaceChargeDensity, 2.0 * sigma);
        let after = physics::compute(&doubled, params.primary_charge)?;
        let before = &request.results;

        if before.electric_force == 0.0 {
            return Ok(
                "The ball carries no charge, so the sheet exerts no force on it and the string \
                 stays vertical. Doubling the surface charge density doubles the field \
                 E = σ/(2ε₀) but still produces no deflection."
                    .to_string(),
            );
        }

        Ok(format!(
            "Doubling the surface charge density doubles the sheet's field, since E = σ/(2ε₀) \
             (Gauss's law for an infinite sheet), and with it the electric force qE. \
             tan(α) = Fe/(mg) therefore doubles from {:.3} to {:.3}, a linear relationship, \
             while the angle itself grows from {:.2}° to {:.2}°, which is not linear because \
             α = arctan(Fe/mg).",
            before.tan_deflection_angle,
            after.tan_deflection_angle,
            before.deflection_degrees(),
            after.deflection_degrees(),
        ))
    }
}

impl ExplanationService for RuleBasedExplainer {
    fn explain<'a>(&'a self, request: &'a ExplanationRequest) -> BoxFuture<'a, Result<String>> {
        future::ready(self.explain_now(request)).boxed()
    }
}
