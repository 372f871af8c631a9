use crate::iteration::measured_request;
use crate::{Error, IterationError, Workload};
use reqwest::Client;
use smol_load_core::RequestLabels;
use std::future::Future;
use std::sync::OnceLock;
use url::Url;

static CLIENT: OnceLock<Client> = OnceLock::new();

/// Issues one plain `GET` to a fixed target per iteration.
///
/// No query, payload or custom headers are added, and the response status is never looked at:
/// only transport failures (refused connection, timeout, DNS) fail the iteration. Each request
/// is timed and counted under [`RequestLabels`].
#[derive(Clone, Debug)]
pub struct HttpGet {
    client: Client,
    target: Url,
    labels: RequestLabels,
}

impl HttpGet {
    /// Shares a single process-wide connection pool across all virtual users.
    pub fn new(target: Url) -> Self {
        Self::with_client(CLIENT.get_or_init(Client::new).clone(), target)
    }

    pub fn with_client(client: Client, target: Url) -> Self {
        Self {
            client,
            target,
            labels: RequestLabels::default(),
        }
    }

    pub fn with_labels(mut self, labels: RequestLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn parse(target: &str) -> Result<Self, Error> {
        Ok(Self::new(Url::parse(target)?))
    }

    pub fn target(&self) -> &Url {
        &self.target
    }
}

impl Workload for HttpGet {
    fn run_iteration(&self) -> impl Future<Output = Result<(), IterationError>> + Send {
        measured_request(self.labels, async move {
            let res = self.client.get(self.target.clone()).send().await?;

            // Drained so the connection returns to the pool.
            res.bytes().await?;
            Ok::<_, IterationError>(())
        })
    }
}
