//! Fetching snapshots from the snapshot server.

use std::time::Duration;

use crate::core::system_monitor::Snapshot;
use crate::error::{HwError, Result};

pub const HWINFO_PATH: &str = "/api/hwinfo";
pub const EXIT_PATH: &str = "/api/exit";

/// Where the poll loop gets its snapshots from.
pub trait SnapshotSource {
    /// Fetch and validate one snapshot.
    fn fetch(&mut self) -> Result<Snapshot>;

    /// Ask the source to shut down. Best effort: failures are only logged.
    fn request_exit(&mut self);
}

/// Blocking HTTP client for the snapshot server.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("hwpulse/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SnapshotSource for HttpTransport {
    fn fetch(&mut self) -> Result<Snapshot> {
        let response = self
            .client
            .get(self.url(HWINFO_PATH))
            .send()
            .map_err(|e| HwError::transport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HwError::HttpStatus(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| HwError::transport(format!("failed to read body: {}", e)))?;

        Snapshot::from_json(&body)
    }

    fn request_exit(&mut self) {
        match self.client.post(self.url(EXIT_PATH)).send() {
            Ok(response) if response.status().is_success() => {
                log::info!("Server at {} acknowledged exit", self.base_url)
            }
            Ok(response) => log::warn!("Exit request answered with {}", response.status()),
            Err(e) => log::warn!("Exit request failed: {}", e),
        }
    }
}
