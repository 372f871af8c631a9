use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Scenario must have at least one virtual user")]
    ZeroVirtualUsers,

    #[error("Invalid duration {input:?}: {source}")]
    InvalidDuration {
        input: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("Invalid metric name {0:?}")]
    InvalidMetricName(String),

    #[error("Invalid threshold {expr:?}: {reason}")]
    InvalidThreshold { expr: String, reason: &'static str },
}
