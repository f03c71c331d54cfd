use std::sync::Arc;

use tokio::sync::Notify;

use crate::core::system_monitor::Aggregator;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    /// Notified once when a client asks the server to exit.
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.aggregator)
    }
}
