mod config;
mod constants;
mod error;
mod metrics;
mod threshold;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use metrics::*;
pub use threshold::*;
