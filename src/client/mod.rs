//! Client side of the snapshot protocol: transport, backoff and poll loop.

pub mod backoff;
pub mod poller;
pub mod transport;

pub use backoff::Backoff;
pub use poller::{PollOutcome, PollState, Poller};
pub use transport::{HttpTransport, SnapshotSource};
