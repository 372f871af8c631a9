use std::num::NonZeroU32;
use std::time::Duration;

/// Base URL of the service under test.
pub const TARGET_HOST: &str = "http://localhost:8000";

/// Virtual users for the `/cats` scenario
pub const CATS_VUS: NonZeroU32 = unsafe { NonZeroU32::new_unchecked(1_000) };

/// Run duration for the `/cats` scenario
pub const CATS_DURATION: Duration = Duration::from_secs(10);

/// 95th percentile latency ceiling for the `/cats` scenario, in milliseconds
pub const CATS_P95_MS: f64 = 200.;

/// Virtual users for the `/` scenario
pub const ROOT_VUS: NonZeroU32 = unsafe { NonZeroU32::new_unchecked(10_000) };

/// Run duration for the `/` scenario
pub const ROOT_DURATION: Duration = Duration::from_secs(30);
