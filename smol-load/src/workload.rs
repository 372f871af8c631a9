use crate::IterationError;
use std::future::Future;

/// One unit of work for one virtual user.
///
/// Anything providing a zero-argument async function qualifies, including closures returning a
/// future:
///
/// ```
/// use smol_load::prelude::*;
///
/// let workload = || async { Ok::<(), IterationError>(()) };
/// # fn assert_workload(_: &impl Workload) {}
/// assert_workload(&workload);
/// ```
pub trait Workload: Send + Sync {
    fn run_iteration(&self) -> impl Future<Output = Result<(), IterationError>> + Send;
}

impl<T, F> Workload for T
where
    T: Fn() -> F + Send + Sync,
    F: Future<Output = Result<(), IterationError>> + Send,
{
    fn run_iteration(&self) -> impl Future<Output = Result<(), IterationError>> + Send {
        (self)()
    }
}
