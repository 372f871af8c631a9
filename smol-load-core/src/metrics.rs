/// Metric names emitted for every iteration, whatever the workload does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IterationLabels {
    pub iterations: &'static str,
    pub failed: &'static str,
    pub duration: &'static str,
}

/// Metric names emitted for every HTTP request a workload issues.
///
/// The defaults match the names an external engine aggregates and evaluates thresholds against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RequestLabels {
    pub requests: &'static str,
    pub failed: &'static str,
    pub duration: &'static str,
}

pub const ITERATIONS: &str = "iterations";
pub const ITERATIONS_FAILED: &str = "iterations_failed";
pub const ITERATION_DURATION: &str = "iteration_duration";

pub const HTTP_REQS: &str = "http_reqs";
pub const HTTP_REQ_FAILED: &str = "http_req_failed";
pub const HTTP_REQ_DURATION: &str = "http_req_duration";

impl Default for IterationLabels {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            failed: ITERATIONS_FAILED,
            duration: ITERATION_DURATION,
        }
    }
}

impl Default for RequestLabels {
    fn default() -> Self {
        Self {
            requests: HTTP_REQS,
            failed: HTTP_REQ_FAILED,
            duration: HTTP_REQ_DURATION,
        }
    }
}
