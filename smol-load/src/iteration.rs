use crate::IterationError;
use smol_load_core::{IterationLabels, RequestLabels};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Times a single iteration and emits its outcome through the `metrics` facade. Aggregation is
/// left to whichever recorder the engine installs.
pub(crate) async fn measured<T>(labels: IterationLabels, func: T) -> T::Output
where
    T: Future<Output = Result<(), IterationError>>,
{
    let start = Instant::now();
    let res = func.await;
    let elapsed = start.elapsed();

    record(
        labels.iterations,
        labels.failed,
        labels.duration,
        elapsed,
        res.is_ok(),
    );

    match &res {
        Ok(()) => trace!("Iteration complete in {elapsed:?}"),
        Err(err) => debug!("Iteration failed after {elapsed:?}: {err}"),
    }

    res
}

/// Same as [`measured`] for one request inside a workload.
pub(crate) async fn measured_request<T, R, E>(labels: RequestLabels, func: T) -> T::Output
where
    T: Future<Output = Result<R, E>>,
{
    let start = Instant::now();
    let res = func.await;

    record(
        labels.requests,
        labels.failed,
        labels.duration,
        start.elapsed(),
        res.is_ok(),
    );

    res
}

#[cfg(feature = "metrics")]
fn record(
    count: &'static str,
    failed: &'static str,
    duration: &'static str,
    elapsed: Duration,
    success: bool,
) {
    metrics::describe_histogram!(duration, metrics::Unit::Milliseconds, "");
    metrics::histogram!(duration).record(elapsed.as_secs_f64() * 1_000.);
    metrics::counter!(count).increment(1);

    if !success {
        metrics::counter!(failed).increment(1);
    }
}

#[cfg(not(feature = "metrics"))]
fn record(
    _count: &'static str,
    _failed: &'static str,
    _duration: &'static str,
    _elapsed: Duration,
    _success: bool,
) {
}
