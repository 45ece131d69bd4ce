//! Side-by-side runs of several thruster configurations on a shared time grid.
//!
//! Cases are independent, so each one runs on its own rayon worker with its own engine and
//! state. Cancellation is cooperative and only checked before a case starts.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use thiserror::Error;
use thruster_propulsion::ConfigKey;
use tracing::info;

use crate::{SimulationEngine, SimulationError, SimulationState};

/// A labelled engine taking part in an experiment.
#[derive(Debug, Clone)]
pub struct Case {
    pub label: String,
    pub engine: SimulationEngine,
}

/// Output of one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub label: String,
    pub key: ConfigKey,
    pub state: SimulationState,
}

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("experiment has no cases")]
    EmptyExperiment,
    #[error("experiment cancelled")]
    Cancelled,
    #[error("case '{label}' failed")]
    Case {
        label: String,
        #[source]
        source: SimulationError,
    },
}

/// Ordered collection of cases run with the same `dt` and duration.
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    cases: Vec<Case>,
}

impl Experiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case(mut self, label: impl Into<String>, engine: SimulationEngine) -> Self {
        self.push(label, engine);
        self
    }

    /// Add a case; an empty label falls back to the configuration's identity key.
    pub fn push(&mut self, label: impl Into<String>, engine: SimulationEngine) {
        let mut label = label.into();
        if label.is_empty() {
            label = engine.identity_key().to_string();
        }
        self.cases.push(Case { label, engine });
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run every case; results come back in insertion order.
    pub fn run(&self, dt_s: f64, duration_s: f64) -> Result<Vec<CaseResult>, ComparisonError> {
        self.run_with_cancel(dt_s, duration_s, &AtomicBool::new(false))
    }

    /// Like [`Experiment::run`], but cases not yet started are skipped once `cancel` is set.
    pub fn run_with_cancel(
        &self,
        dt_s: f64,
        duration_s: f64,
        cancel: &AtomicBool,
    ) -> Result<Vec<CaseResult>, ComparisonError> {
        if self.cases.is_empty() {
            return Err(ComparisonError::EmptyExperiment);
        }
        info!(cases = self.cases.len(), dt_s, duration_s, "running experiment");

        self.cases
            .par_iter()
            .map(|case| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(ComparisonError::Cancelled);
                }
                let state =
                    case.engine
                        .run(dt_s, duration_s)
                        .map_err(|source| ComparisonError::Case {
                            label: case.label.clone(),
                            source,
                        })?;
                Ok(CaseResult {
                    label: case.label.clone(),
                    key: case.engine.identity_key(),
                    state,
                })
            })
            .collect()
    }
}
