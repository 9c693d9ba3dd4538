//! Natural-language commentary on the current lab state.
//!
//! The physics never waits on this module. A caller snapshots the parameters
//! and results into an [`ExplanationRequest`], hands it to an
//! [`ExplanationService`] and either awaits the answer or spawns it as an
//! [`ExplanationTask`] that can be cancelled or simply dropped. No timeout or
//! retry is applied here.

use std::sync::Arc;

use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{LabError, Result};
use crate::parameters::ParameterSet;
use crate::physics::{self, ResultSet};

mod rules;

pub use rules::RuleBasedExplainer;

/// Shown by callers when the service fails.
pub const FALLBACK_MESSAGE: &str = "Could not reach the explanation service.";

/// Snapshot handed to the service. Owns its data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub params: ParameterSet,
    pub results: ResultSet,
    pub language: String,
}

impl ExplanationRequest {
    pub fn new(params: ParameterSet, results: ResultSet, language: impl Into<String>) -> Self {
        Self { params, results, language: language.into() }
    }

    /// Solve the primary ball for `params` and snapshot both.
    pub fn for_params(params: &ParameterSet, language: impl Into<String>) -> Result<Self> {
        let results = physics::compute(params, params.primary_charge)?;
        Ok(Self::new(*params, results, language))
    }

    /// Prompt text for a language-model backed service.
    pub fn prompt(&self) -> String {
        format!(
            "Based on these electrostatics simulation parameters:\n\
             - Surface charge density (sigma): {sigma} C/m^2\n\
             - Charge 1 (q1): {q1} C\n\
             - Mass (m1): {m} kg\n\
             \n\
             Current results:\n\
             - Deflection angle (alpha): {alpha:.2} degrees\n\
             - tan(alpha): {tan:.3}\n\
             \n\
             Explain in 2-3 concise {language} sentences what would happen if we double the \
             surface charge density, citing the physical law involved. Mention if the \
             relationship is linear.",
            sigma = self.params.surface_charge_density,
            q1 = self.params.primary_charge,
            m = self.params.mass,
            alpha = self.results.deflection_degrees(),
            tan = self.results.tan_deflection_angle,
            language = self.language,
        )
    }
}

/// Anything that can turn a snapshot into commentary.
pub trait ExplanationService: Send + Sync {
    /// Fails with [`LabError::ServiceUnavailable`] when no answer can be produced.
    fn explain<'a>(&'a self, request: &'a ExplanationRequest) -> BoxFuture<'a, Result<String>>;
}

/// Await an explanation directly, logging failures.
pub async fn request_explanation(
    service: &dyn ExplanationService,
    request: &ExplanationRequest,
) -> Result<String> {
    let outcome = service.explain(request).await;
    if let Err(e) = &outcome {
        warn!(error = %e, "explanation failed");
    }
    outcome
}

/// An explanation running on the tokio runtime. Dropping the task cancels it.
pub struct ExplanationTask {
    handle: Option<JoinHandle<std::result::Result<Result<String>, Aborted>>>,
    abort: AbortHandle,
}

impl ExplanationTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(service: Arc<dyn ExplanationService>, request: ExplanationRequest) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        let work = async move { request_explanation(service.as_ref(), &request).await };
        let handle = tokio::spawn(Abortable::new(work, registration));
        debug!("explanation task spawned");
        Self { handle: Some(handle), abort }
    }

    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Wait for the answer. A cancelled task yields [`LabError::Cancelled`];
    /// dropping the returned future cancels the task as well.
    pub async fn wait(mut self) -> Result<String> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(LabError::Cancelled);
        };
        let joined = handle.await;
        self.handle = None;
        match joined {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(Aborted)) => Err(LabError::Cancelled),
            Err(e) if e.is_cancelled() => Err(LabError::Cancelled),
            Err(e) => Err(LabError::ServiceUnavailable(e.to_string())),
        }
    }
}

impl Drop for ExplanationTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.abort.abort();
        }
    }
}
