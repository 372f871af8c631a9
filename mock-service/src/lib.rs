use axum::{
    body::Bytes,
    debug_handler,
    extract::{Request, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use metrics::counter;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

pub mod prelude {
    pub use crate::{Hits, MockConfig};
}

/// Per-route request counters.
#[derive(Debug, Default)]
pub struct Hits {
    root: AtomicU64,
    cats: AtomicU64,
    other: AtomicU64,
    with_body: AtomicU64,
}

impl Hits {
    pub fn root(&self) -> u64 {
        self.root.load(Ordering::Relaxed)
    }

    pub fn cats(&self) -> u64 {
        self.cats.load(Ordering::Relaxed)
    }

    pub fn other(&self) -> u64 {
        self.other.load(Ordering::Relaxed)
    }

    /// Requests that arrived with a non-empty body.
    pub fn with_body(&self) -> u64 {
        self.with_body.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.root() + self.cats() + self.other()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    /// Artificial latency added to `/` and `/cats`
    pub delay: Duration,
}

#[derive(Clone)]
struct AppState {
    hits: Arc<Hits>,
    config: MockConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct Cat {
    pub cat_id: i32,
    pub name: &'static str,
}

const CATS: [Cat; 3] = [
    Cat {
        cat_id: 1,
        name: "Chonky",
    },
    Cat {
        cat_id: 2,
        name: "Smol",
    },
    Cat {
        cat_id: 3,
        name: "Loaf",
    },
];

pub fn router(hits: Arc<Hits>, config: MockConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cats", get(list_cats))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .with_state(AppState { hits, config })
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr, config: MockConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(Arc::default(), config)).await?;
    Ok(())
}

/// Serve on an ephemeral localhost port in the background.
pub async fn spawn(config: MockConfig) -> anyhow::Result<(SocketAddr, Arc<Hits>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let hits = Arc::new(Hits::default());
    let app = router(hits.clone(), config);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!("Mock service stopped: {err}");
        }
    });

    debug!("Mock service listening on {addr}");
    Ok((addr, hits))
}

#[debug_handler]
async fn index(State(state): State<AppState>, body: Bytes) -> &'static str {
    state.observe(&state.hits.root, "/", &body).await;
    "smol"
}

#[debug_handler]
async fn list_cats(State(state): State<AppState>, body: Bytes) -> Json<[Cat; 3]> {
    state.observe(&state.hits.cats, "/cats", &body).await;
    Json(CATS)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found(State(state): State<AppState>, req: Request) -> StatusCode {
    state.hits.other.fetch_add(1, Ordering::Relaxed);
    counter!("mock_service.requests", "path" => "other").increment(1);
    debug!("No route for {}", req.uri());
    StatusCode::NOT_FOUND
}

impl AppState {
    async fn observe(&self, route_hits: &AtomicU64, path: &'static str, body: &Bytes) {
        route_hits.fetch_add(1, Ordering::Relaxed);
        counter!("mock_service.requests", "path" => path).increment(1);
        if !body.is_empty() {
            self.hits.with_body.fetch_add(1, Ordering::Relaxed);
        }

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }
    }
}
