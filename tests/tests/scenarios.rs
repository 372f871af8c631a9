mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;
    use serde_json::json;
    use smol_load::prelude::*;
    use smol_load::scripts;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn cats_iteration_issues_one_get() {
        init();
        let (base, hits) = mock(Duration::ZERO).await;

        let scenario = scripts::cats_at(&base).unwrap();
        scenario.run_iteration().await.unwrap();

        assert_eq!(hits.cats(), 1);
        assert_eq!(hits.total(), 1);
        assert_eq!(hits.with_body(), 0);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn root_iteration_issues_one_get() {
        init();
        let (base, hits) = mock(Duration::ZERO).await;

        let scenario = scripts::root_at(&base).unwrap();
        scenario.run_iteration().await.unwrap();

        assert_eq!(hits.root(), 1);
        assert_eq!(hits.total(), 1);
        assert_eq!(hits.with_body(), 0);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn response_status_is_not_inspected() {
        init();
        let (base, hits) = mock(Duration::ZERO).await;

        let get = HttpGet::new(base.join("/missing").unwrap());
        let scenario = LoadScenario::new("missing", small_config(1, "1s"), get);
        scenario.run_iteration().await.unwrap();

        assert_eq!(hits.other(), 1);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn respects_virtual_users_and_duration() {
        init();
        let (base, hits) = mock(Duration::from_millis(20)).await;

        let get = HttpGet::new(base.join("/cats").unwrap());
        let scenario = Arc::new(LoadScenario::new("bounded", small_config(8, "300ms"), get));
        let report = drive(scenario).await;

        assert!(report.max_in_flight <= 8, "{report:?}");
        assert!(report.max_in_flight > 1, "{report:?}");
        assert!(report.last_start < Duration::from_millis(300), "{report:?}");
        assert_eq!(report.failed, 0);
        assert!(report.ok > 8);
        assert_eq!(report.ok, hits.cats());
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn unreachable_target_fails_every_iteration() {
        init();
        // Bind then drop a listener so the port is known to be closed.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let get = HttpGet::new(base_url(addr).join("/cats").unwrap());
        let scenario = Arc::new(LoadScenario::new("unreachable", small_config(4, "200ms"), get));
        let report = drive(scenario).await;

        assert_eq!(report.ok, 0);
        assert!(report.failed > 0);
    }

    #[test]
    fn variants_export_engine_options() {
        let cats = scripts::cats().unwrap();
        let root = scripts::root().unwrap();

        assert_eq!(
            cats.config().to_engine_options(),
            json!({
                "vus": 1000,
                "duration": "10s",
                "thresholds": { "http_req_duration": ["p(95)<200"] },
            })
        );
        assert_eq!(
            root.config().to_engine_options(),
            json!({ "vus": 10000, "duration": "30s" })
        );
    }

    #[cfg(feature = "integration")]
    #[tokio::test(flavor = "multi_thread")]
    async fn cats_at_full_scale() {
        init();
        let (base, hits) = mock(Duration::from_millis(1)).await;

        let scenario = Arc::new(scripts::cats_at(&base).unwrap());
        let report = drive(scenario).await;

        assert!(report.max_in_flight <= 1_000);
        assert!(report.last_start < Duration::from_secs(10));
        assert!(report.ok > 0);
        assert!(report.ok <= hits.cats());
    }

    fn small_config(vus: u32, duration: &str) -> ScenarioConfig {
        ScenarioConfig::builder(vus)
            .duration(duration)
            .threshold("http_req_duration", "p(95)<200")
            .build()
            .unwrap()
    }
}
