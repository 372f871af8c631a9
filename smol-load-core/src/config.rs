use crate::threshold::validate_metric_name;
use crate::{ConfigError, Threshold};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

pub type Thresholds = BTreeMap<String, Vec<Threshold>>;

/// Run parameters handed to the load-generation engine.
///
/// Immutable once built: use [`ScenarioConfig::builder`] (or deserialize) to create one, both of
/// which validate every field. Serializes to the engine's options document:
///
/// ```json
/// {"vus":1000,"duration":"10s","thresholds":{"http_req_duration":["p(95)<200"]}}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScenarioConfig")]
pub struct ScenarioConfig {
    #[serde(rename = "vus")]
    virtual_users: NonZeroU32,
    #[serde(serialize_with = "engine_duration")]
    duration: Duration,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    thresholds: Thresholds,
}

impl ScenarioConfig {
    pub fn builder(virtual_users: u32) -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new(virtual_users)
    }

    /// Number of concurrent simulated clients.
    pub fn virtual_users(&self) -> NonZeroU32 {
        self.virtual_users
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The JSON options document consumed by the external engine.
    pub fn to_engine_options(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

/// Collects raw scenario parameters and validates them all at [`ScenarioConfigBuilder::build`].
#[derive(Clone, Debug)]
pub struct ScenarioConfigBuilder {
    virtual_users: u32,
    duration: DurationInput,
    thresholds: Vec<(String, ThresholdInput)>,
}

#[derive(Clone, Debug)]
enum DurationInput {
    Unset,
    Text(String),
    Span(Duration),
}

#[derive(Clone, Debug)]
enum ThresholdInput {
    Text(String),
    Parsed(Threshold),
}

impl ScenarioConfigBuilder {
    fn new(virtual_users: u32) -> Self {
        Self {
            virtual_users,
            duration: DurationInput::Unset,
            thresholds: vec![],
        }
    }

    /// Run duration as a human readable span, e.g. `"10s"` or `"1m30s"`.
    pub fn duration(mut self, duration: &str) -> Self {
        self.duration = DurationInput::Text(duration.to_string());
        self
    }

    pub fn duration_span(mut self, duration: Duration) -> Self {
        self.duration = DurationInput::Span(duration);
        self
    }

    /// Add a threshold expression (e.g. `"p(95)<200"`) for `metric`.
    pub fn threshold(mut self, metric: &str, expr: &str) -> Self {
        self.thresholds
            .push((metric.to_string(), ThresholdInput::Text(expr.to_string())));
        self
    }

    pub fn threshold_expr(mut self, metric: &str, threshold: Threshold) -> Self {
        self.thresholds
            .push((metric.to_string(), ThresholdInput::Parsed(threshold)));
        self
    }

    pub fn build(self) -> Result<ScenarioConfig, ConfigError> {
        let virtual_users =
            NonZeroU32::new(self.virtual_users).ok_or(ConfigError::ZeroVirtualUsers)?;

        let duration = match self.duration {
            DurationInput::Unset => Duration::ZERO,
            DurationInput::Text(text) => parse_duration(&text)?,
            DurationInput::Span(span) => span,
        };

        let mut thresholds = Thresholds::new();
        for (metric, input) in self.thresholds {
            validate_metric_name(&metric)?;
            let threshold = match input {
                ThresholdInput::Text(text) => text.parse()?,
                ThresholdInput::Parsed(threshold) => threshold,
            };
            thresholds.entry(metric).or_default().push(threshold);
        }

        let config = ScenarioConfig {
            virtual_users,
            duration,
            thresholds,
        };
        debug!("Built scenario config {config:?}");
        Ok(config)
    }
}

fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(text.trim()).map_err(|source| ConfigError::InvalidDuration {
        input: text.to_string(),
        source,
    })
}

fn engine_duration<S: serde::Serializer>(duration: &Duration, ser: S) -> Result<S::Ok, S::Error> {
    ser.collect_str(&EngineDuration(*duration))
}

/// Compact duration text the engine accepts: `h`/`m` segments followed by seconds, or by the
/// whole sub-minute part in the coarsest unit that keeps it exact (`1m30s`, `1500ms`, `2h`).
/// Days fold into hours. No separators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineDuration(pub Duration);

impl fmt::Display for EngineDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        let nanos = self.0.subsec_nanos();
        let (hours, minutes, seconds) = (secs / 3_600, secs / 60 % 60, secs % 60);

        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}m")?;
        }

        let rest = u128::from(seconds) * 1_000_000_000 + u128::from(nanos);
        match rest {
            0 if hours > 0 || minutes > 0 => Ok(()),
            _ if nanos == 0 => write!(f, "{seconds}s"),
            _ if rest % 1_000_000 == 0 => write!(f, "{}ms", rest / 1_000_000),
            _ if rest % 1_000 == 0 => write!(f, "{}us", rest / 1_000),
            _ => write!(f, "{rest}ns"),
        }
    }
}

#[derive(Deserialize)]
struct RawScenarioConfig {
    vus: u32,
    duration: String,
    #[serde(default)]
    thresholds: BTreeMap<String, Vec<String>>,
}

impl TryFrom<RawScenarioConfig> for ScenarioConfig {
    type Error = ConfigError;

    fn try_from(raw: RawScenarioConfig) -> Result<Self, Self::Error> {
        let mut builder = ScenarioConfig::builder(raw.vus).duration(&raw.duration);
        for (metric, exprs) in &raw.thresholds {
            for expr in exprs {
                builder = builder.threshold(metric, expr);
            }
        }
        builder.build()
    }
}
