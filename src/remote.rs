use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::booking::BookingRequest;
use crate::config::ClientConfig;
use crate::error::{BookingError, Unreachable};
use crate::model::Snapshot;

mod http_client;
use self::http_client::rejection_reason;

mod types;
pub use self::types::*;

/// Read/write access to the booking service.
///
/// Implementations never retry; the poll cadence is the retry policy.
pub trait RemoteStatusSource {
    /// One consistent read of machines and queue.
    fn fetch_snapshot(&self) -> Result<Snapshot, Unreachable>;

    /// Collapses every failure to `false`.
    fn fetch_health(&self) -> bool;

    fn submit_booking(&self, booking: &BookingRequest) -> Result<(), BookingError>;

    /// Last `lines` lines of the service log, verbatim.
    fn tail_logs(&self, lines: usize) -> Result<String, Unreachable>;
}

pub struct RemoteClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("washq/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.request_timeout())
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: cfg.api_base.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RemoteStatusSource for RemoteClient {
    fn fetch_snapshot(&self) -> Result<Snapshot, Unreachable> {
        let resp = self
            .client
            .get(self.url("/status"))
            .send()
            .map_err(Unreachable::from)?;
        let resp = self.ensure_ok(resp, "status")?;
        let body: StatusResponse = resp.json().map_err(Unreachable::from)?;
        debug!(
            machines = body.machines.len(),
            queue = body.queue.len(),
            "fetched status"
        );
        Ok(body.into())
    }

    fn fetch_health(&self) -> bool {
        match self.client.get(self.url("/health")).send() {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                debug!(error = %err, "health probe failed");
                false
            }
        }
    }

    fn submit_booking(&self, booking: &BookingRequest) -> Result<(), BookingError> {
        let resp = self
            .client
            .post(self.url("/book"))
            .query(&BookQuery::from(booking))
            .send()
            .map_err(Unreachable::from)?;

        if resp.status().is_success() {
            return Ok(());
        }

        let status = resp.status();
        let reason = resp.text().map_err(Unreachable::from)?;
        warn!(%status, reason = %reason, "booking rejected");
        Err(BookingError::Rejected(rejection_reason(&reason, status)))
    }

    fn tail_logs(&self, lines: usize) -> Result<String, Unreachable> {
        let resp = self
            .client
            .get(self.url("/logs"))
            .query(&[("n", lines)])
            .send()
            .map_err(Unreachable::from)?;
        let resp = self.ensure_ok(resp, "logs")?;
        resp.text().map_err(Unreachable::from)
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
