//! Threshold expressions
//!
//! Thresholds are pass/fail conditions over an aggregated metric, written the way load-testing
//! engines accept them (`p(95)<200`, `rate<0.01`, `avg <= 150`). They are only parsed and
//! validated here; evaluation happens in the engine after the run.
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation applied to a metric before it is compared.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Aggregate {
    Avg,
    Min,
    Max,
    Med,
    Count,
    Rate,
    /// Percentile in `0..=100`
    Percentile(f64),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// A single parsed threshold expression.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Threshold {
    aggregate: Aggregate,
    comparison: Comparison,
    value: f64,
}

impl Threshold {
    pub fn new(
        aggregate: Aggregate,
        comparison: Comparison,
        value: f64,
    ) -> Result<Self, ConfigError> {
        let threshold = Self {
            aggregate,
            comparison,
            value,
        };

        if let Aggregate::Percentile(p) = aggregate {
            if !(0. ..=100.).contains(&p) {
                return Err(threshold.invalid("percentile must be within 0..=100"));
            }
        }
        if !value.is_finite() {
            return Err(threshold.invalid("threshold value must be finite"));
        }

        Ok(threshold)
    }

    /// `p(percentile) < millis`, the usual latency ceiling.
    pub fn percentile_below(percentile: f64, value: f64) -> Result<Self, ConfigError> {
        Self::new(Aggregate::Percentile(percentile), Comparison::Lt, value)
    }

    pub fn aggregate(&self) -> Aggregate {
        self.aggregate
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn invalid(&self, reason: &'static str) -> ConfigError {
        ConfigError::InvalidThreshold {
            expr: self.to_string(),
            reason,
        }
    }
}

impl FromStr for Threshold {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ConfigError::InvalidThreshold {
            expr: s.to_string(),
            reason,
        };

        let expr = s.trim();
        let op_start = expr
            .find(['<', '>', '=', '!'])
            .ok_or_else(|| invalid("missing comparison operator"))?;
        let (lhs, rest) = expr.split_at(op_start);
        let (comparison, rhs) =
            Comparison::split_prefix(rest).ok_or_else(|| invalid("unknown comparison operator"))?;

        let aggregate = parse_aggregate(lhs.trim()).ok_or_else(|| invalid("unknown aggregate"))?;

        let value: f64 = rhs
            .trim()
            .parse()
            .map_err(|_| invalid("threshold value is not a number"))?;

        Self::new(aggregate, comparison, value).map_err(|e| match e {
            ConfigError::InvalidThreshold { reason, .. } => invalid(reason),
            e => e,
        })
    }
}

fn parse_aggregate(s: &str) -> Option<Aggregate> {
    let aggregate = match s {
        "avg" => Aggregate::Avg,
        "min" => Aggregate::Min,
        "max" => Aggregate::Max,
        "med" => Aggregate::Med,
        "count" => Aggregate::Count,
        "rate" => Aggregate::Rate,
        _ => {
            let inner = s.strip_prefix("p(")?.strip_suffix(')')?;
            Aggregate::Percentile(inner.trim().parse().ok()?)
        }
    };
    Some(aggregate)
}

impl Comparison {
    fn split_prefix(s: &str) -> Option<(Self, &str)> {
        // Two-character operators first so `<=` is not read as `<`
        const OPERATORS: [(&str, Comparison); 6] = [
            ("<=", Comparison::Le),
            (">=", Comparison::Ge),
            ("==", Comparison::Eq),
            ("!=", Comparison::Ne),
            ("<", Comparison::Lt),
            (">", Comparison::Gt),
        ];

        OPERATORS
            .iter()
            .find_map(|(op, cmp)| s.strip_prefix(op).map(|rest| (*cmp, rest)))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Avg => write!(f, "avg"),
            Aggregate::Min => write!(f, "min"),
            Aggregate::Max => write!(f, "max"),
            Aggregate::Med => write!(f, "med"),
            Aggregate::Count => write!(f, "count"),
            Aggregate::Rate => write!(f, "rate"),
            Aggregate::Percentile(p) => write!(f, "p({p})"),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.aggregate,
            self.comparison.as_str(),
            self.value
        )
    }
}

impl TryFrom<String> for Threshold {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Threshold> for String {
    fn from(value: Threshold) -> Self {
        value.to_string()
    }
}

/// Metric names are ASCII alphanumerics, `_` or `.`, optionally followed by a `{tag:value}`
/// selector for a submetric.
pub(crate) fn validate_metric_name(name: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidMetricName(name.to_string());

    let (base, selector) = match name.split_once('{') {
        Some((base, rest)) => (base, Some(rest.strip_suffix('}').ok_or_else(invalid)?)),
        None => (name, None),
    };

    let base_ok = !base.is_empty()
        && base
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    let selector_ok = selector.map_or(true, |s| !s.trim().is_empty() && !s.contains(['{', '}']));

    if base_ok && selector_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}
