//! Scenario definitions handed to the load-generation engine
use crate::iteration::measured;
use crate::{IterationError, Workload};
use smol_load_core::{IterationLabels, ScenarioConfig};
use std::future::Future;
use tracing::{debug, trace_span, Instrument};

/// What an engine needs to drive a load test: the run parameters and one iteration of work.
///
/// The engine invokes [`Scenario::run_iteration`] concurrently from up to
/// `config().virtual_users()` contexts until `config().duration()` elapses. Iterations are
/// independent and unordered, and a failed iteration is reported through the returned `Err`.
pub trait Scenario: Send + Sync {
    fn config(&self) -> &ScenarioConfig;

    fn run_iteration(&self) -> impl Future<Output = Result<(), IterationError>> + Send;
}

/// A named [`ScenarioConfig`] paired with a [`Workload`].
#[derive(Debug)]
pub struct LoadScenario<W> {
    name: String,
    config: ScenarioConfig,
    workload: W,
    labels: IterationLabels,
}

impl<W: Workload> LoadScenario<W> {
    pub fn new(name: &str, config: ScenarioConfig, workload: W) -> Self {
        debug!("Defined scenario {name} with config {config:?}");
        Self {
            name: name.to_string(),
            config,
            workload,
            labels: IterationLabels::default(),
        }
    }

    /// Emit iteration metrics under custom names instead of the engine defaults.
    pub fn with_labels(mut self, labels: IterationLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workload(&self) -> &W {
        &self.workload
    }
}

impl<W: Workload> Scenario for LoadScenario<W> {
    fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn run_iteration(&self) -> impl Future<Output = Result<(), IterationError>> + Send {
        measured(self.labels, self.workload.run_iteration())
            .instrument(trace_span!("iteration", scenario = %self.name))
    }
}
