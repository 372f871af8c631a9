//! Load scenarios for the smol cats service.
//!
//! A scenario is a [`ScenarioConfig`](smol_load_core::ScenarioConfig) (virtual users, duration,
//! thresholds) plus a [`Workload`] invoked once per iteration. Scheduling, aggregation and
//! threshold evaluation are left to the load-generation engine driving the [`Scenario`].
//!
//! ```no_run
//! use smol_load::prelude::*;
//!
//! # async fn run() -> Result<(), smol_load::Error> {
//! let scenario = smol_load::scripts::cats()?;
//! println!("{}", scenario.config().to_engine_options());
//! let _ = scenario.run_iteration().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub(crate) mod iteration;
pub mod scenario;
pub mod scripts;
pub mod workload;

pub use error::{Error, IterationError};
pub use http::HttpGet;
pub use scenario::{LoadScenario, Scenario};
pub use smol_load_core;
pub use workload::Workload;

pub mod prelude {
    pub use crate::scenario::{LoadScenario, Scenario};
    pub use crate::workload::Workload;
    pub use crate::{HttpGet, IterationError};
    pub use smol_load_core::{IterationLabels, RequestLabels, ScenarioConfig, Threshold};
}
