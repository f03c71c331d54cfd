use std::io;
use thiserror::Error;

/// Custom error type for hwpulse
#[derive(Error, Debug)]
pub enum HwError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe unavailable: {0}")]
    ProbeUnavailable(String),

    #[error("Probe timed out: {0}")]
    ProbeTimeout(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server answered with status {0}")]
    HttpStatus(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for hwpulse
pub type Result<T> = std::result::Result<T, HwError>;

impl HwError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HwError::Config(msg.into())
    }

    pub fn probe_unavailable<S: Into<String>>(msg: S) -> Self {
        HwError::ProbeUnavailable(msg.into())
    }

    pub fn probe_timeout<S: Into<String>>(msg: S) -> Self {
        HwError::ProbeTimeout(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        HwError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        HwError::MetricCollection(msg.into())
    }

    pub fn transport<S: Into<String>>(msg: S) -> Self {
        HwError::Transport(msg.into())
    }

    pub fn malformed_payload<S: Into<String>>(msg: S) -> Self {
        HwError::MalformedPayload(msg.into())
    }

    pub fn invalid_snapshot<S: Into<String>>(msg: S) -> Self {
        HwError::InvalidSnapshot(msg.into())
    }

    pub fn server<S: Into<String>>(msg: S) -> Self {
        HwError::Server(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        HwError::Tui(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HwError::Other(msg.into())
    }

    /// True for failures of the snapshot transport (network, status, payload).
    ///
    /// The poll loop treats all of these the same way: keep the stale display
    /// and grow the backoff.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            HwError::Http(_)
                | HwError::Transport(_)
                | HwError::HttpStatus(_)
                | HwError::MalformedPayload(_)
                | HwError::InvalidSnapshot(_)
                | HwError::Json(_)
        )
    }
}
