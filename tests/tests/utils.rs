use futures::future::join_all;
use mock_service::prelude::*;
use smol_load::Scenario;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("smol_load=debug,mock_service=debug")
            .try_init();
    });
}

#[allow(unused)]
pub async fn mock(delay: Duration) -> (Url, Arc<Hits>) {
    let (addr, hits) = mock_service::spawn(MockConfig { delay })
        .await
        .expect("mock service failed to bind");
    (base_url(addr), hits)
}

#[allow(unused)]
pub fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// What a run looked like from the driving side.
#[derive(Debug, Default)]
pub struct RunReport {
    pub ok: u64,
    pub failed: u64,
    pub max_in_flight: usize,
    /// Offset of the last iteration start from the run start
    pub last_start: Duration,
}

/// Drives a scenario the way a load-generation engine would: one task per virtual user, each
/// starting iterations back to back until the configured duration has elapsed.
#[allow(unused)]
pub async fn drive<S: Scenario + 'static>(scenario: Arc<S>) -> RunReport {
    let vus = scenario.config().virtual_users().get() as usize;
    let duration = scenario.config().duration();

    let ok = Arc::new(AtomicU64::new(0));
    let failed = Arc::new(AtomicU64::new(0));
    let in_flight = Arc::new(AtomicUsize::new(0));
    let max_in_flight = Arc::new(AtomicUsize::new(0));
    let last_start = Arc::new(AtomicU64::new(0));

    let start = Instant::now();
    let tasks = (0..vus).map(|_| {
        let scenario = scenario.clone();
        let (ok, failed) = (ok.clone(), failed.clone());
        let (in_flight, max_in_flight) = (in_flight.clone(), max_in_flight.clone());
        let last_start = last_start.clone();

        tokio::spawn(async move {
            loop {
                let began = start.elapsed();
                if began >= duration {
                    break;
                }
                last_start.fetch_max(began.as_nanos() as u64, Ordering::Relaxed);

                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(current, Ordering::SeqCst);

                match scenario.run_iteration().await {
                    Ok(()) => ok.fetch_add(1, Ordering::Relaxed),
                    Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                };

                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
    });

    for res in join_all(tasks).await {
        res.expect("virtual user task panicked");
    }

    let report = RunReport {
        ok: ok.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        max_in_flight: max_in_flight.load(Ordering::SeqCst),
        last_start: Duration::from_nanos(last_start.load(Ordering::Relaxed)),
    };
    info!("Run finished: {report:?}");
    report
}
