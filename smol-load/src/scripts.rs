//! The two load tests run against the smol service.
//!
//! | scenario | target  | vus    | duration | thresholds                        |
//! |----------|---------|--------|----------|-----------------------------------|
//! | `cats`   | `/cats` | 1000   | 10s      | `http_req_duration: p(95)<200`    |
//! | `root`   | `/`     | 10000  | 30s      |                                   |
use crate::{Error, HttpGet, LoadScenario};
use smol_load_core::{
    ScenarioConfig, Threshold, CATS_DURATION, CATS_P95_MS, CATS_VUS, HTTP_REQ_DURATION,
    ROOT_DURATION, ROOT_VUS, TARGET_HOST,
};
use url::Url;

/// 1000 virtual users listing cats for 10s, failing the run if p95 latency reaches 200ms.
pub fn cats() -> Result<LoadScenario<HttpGet>, Error> {
    cats_at(&Url::parse(TARGET_HOST)?)
}

/// [`cats`] pointed at another host.
pub fn cats_at(base: &Url) -> Result<LoadScenario<HttpGet>, Error> {
    let config = ScenarioConfig::builder(CATS_VUS.get())
        .duration_span(CATS_DURATION)
        .threshold_expr(
            HTTP_REQ_DURATION,
            Threshold::percentile_below(95., CATS_P95_MS)?,
        )
        .build()?;

    Ok(LoadScenario::new(
        "cats",
        config,
        HttpGet::new(base.join("/cats")?),
    ))
}

/// 10000 virtual users hitting `/` for 30s.
pub fn root() -> Result<LoadScenario<HttpGet>, Error> {
    root_at(&Url::parse(TARGET_HOST)?)
}

pub fn root_at(base: &Url) -> Result<LoadScenario<HttpGet>, Error> {
    let config = ScenarioConfig::builder(ROOT_VUS.get())
        .duration_span(ROOT_DURATION)
        .build()?;

    Ok(LoadScenario::new("root", config, HttpGet::new(base.join("/")?)))
}
