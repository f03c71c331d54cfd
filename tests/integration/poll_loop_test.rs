use std::collections::VecDeque;
use std::time::{Duration, Instant};

use hwpulse::client::{PollOutcome, PollState, Poller, SnapshotSource};
use hwpulse::core::config::PollConfig;
use hwpulse::core::system_monitor::{ComponentKind, Snapshot};
use hwpulse::error::{HwError, Result};

use super::common::aggregator;

/// Replays a fixed sequence of fetch results; runs dry as a transport error.
struct ScriptedSource {
    script: VecDeque<Result<Snapshot>>,
    fetches: usize,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Snapshot>>) -> Self {
        Self {
            script: script.into(),
            fetches: 0,
        }
    }
}

impl SnapshotSource for ScriptedSource {
    fn fetch(&mut self) -> Result<Snapshot> {
        self.fetches += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(HwError::transport("connection refused")))
    }

    fn request_exit(&mut self) {}
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Tick exactly when the next attempt is due and return the outcome.
fn tick_when_due(poller: &mut Poller<ScriptedSource>, clock: &mut Instant) -> PollOutcome {
    *clock += poller.time_until_next(*clock);
    poller.tick(*clock).expect("attempt is due")
}

#[test]
fn test_success_records_history_without_gpu() {
    let snapshot = aggregator(None).collect();
    let start = Instant::now();
    let mut poller = Poller::new(
        ScriptedSource::new(vec![Ok(snapshot)]),
        &PollConfig::default(),
        start,
    );

    assert!(matches!(poller.tick(start), Some(PollOutcome::Updated)));

    let history = poller.history();
    assert_eq!(history.series(ComponentKind::Cpu), vec![42.0]);
    assert_eq!(history.series(ComponentKind::Ram), vec![60.0]);
    assert_eq!(history.series(ComponentKind::Disk), vec![75.0]);
    assert!(history.series(ComponentKind::Gpu).is_empty());

    assert!(poller.latest().unwrap().gpu.is_none());
    assert_eq!(poller.time_until_next(start), ms(10_000));
}

#[test]
fn test_failures_grow_delay_to_ceiling() {
    let mut clock = Instant::now();
    let mut poller = Poller::new(ScriptedSource::new(vec![]), &PollConfig::default(), clock);

    let mut delays = Vec::new();
    for _ in 0..8 {
        match tick_when_due(&mut poller, &mut clock) {
            PollOutcome::Failed { retry_in, .. } => delays.push(retry_in.as_millis()),
            PollOutcome::Updated => panic!("source has no snapshots"),
        }
    }

    assert_eq!(
        delays,
        vec![18_000, 32_400, 58_320, 104_976, 120_000, 120_000, 120_000, 120_000]
    );
    assert!(poller.latest().is_none());
    assert_eq!(poller.last_error(), Some("Transport error: connection refused"));
}

#[test]
fn test_success_resets_delay_to_floor() {
    let snapshot = aggregator(Some(70.0)).collect();
    let mut clock = Instant::now();
    let mut poller = Poller::new(
        ScriptedSource::new(vec![
            Err(HwError::transport("timed out")),
            Err(HwError::HttpStatus(503)),
            Ok(snapshot),
        ]),
        &PollConfig::default(),
        clock,
    );

    tick_when_due(&mut poller, &mut clock);
    tick_when_due(&mut poller, &mut clock);
    assert_eq!(poller.backoff().current(), ms(32_400));

    assert!(matches!(
        tick_when_due(&mut poller, &mut clock),
        PollOutcome::Updated
    ));
    assert_eq!(poller.backoff().current(), ms(10_000));
    assert_eq!(poller.backoff().failures(), 0);
    assert!(poller.last_error().is_none());
    assert_eq!(poller.history().series(ComponentKind::Gpu), vec![70.0]);
}

#[test]
fn test_malformed_body_keeps_stale_snapshot() {
    let good = aggregator(None).collect();
    let malformed = Snapshot::from_json(br#"{"cpu": {"raw_usage": 12.0}}"#);
    assert!(matches!(malformed, Err(HwError::MalformedPayload(_))));

    let mut clock = Instant::now();
    let mut poller = Poller::new(
        ScriptedSource::new(vec![Ok(good.clone()), malformed]),
        &PollConfig::default(),
        clock,
    );

    tick_when_due(&mut poller, &mut clock);
    match tick_when_due(&mut poller, &mut clock) {
        PollOutcome::Failed { error, retry_in } => {
            assert!(error.is_transport_failure());
            assert_eq!(retry_in, ms(18_000));
        }
        PollOutcome::Updated => panic!("malformed payload must not update"),
    }

    assert_eq!(poller.latest(), Some(&good));
    assert_eq!(poller.history().len(ComponentKind::Cpu), 1);
}

#[test]
fn test_no_fetch_before_due() {
    let start = Instant::now();
    let mut poller = Poller::new(
        ScriptedSource::new(vec![Ok(aggregator(None).collect())]),
        &PollConfig::default(),
        start,
    );

    poller.tick(start);
    assert!(poller.tick(start + ms(9_999)).is_none());
    assert_eq!(poller.source_mut().fetches, 1);
    assert!(matches!(poller.state(), PollState::Waiting { .. }));

    poller.retry_now(start + ms(1_000));
    assert!(poller.tick(start + ms(1_000)).is_some());
    assert_eq!(poller.source_mut().fetches, 2);
}

#[test]
fn test_history_keeps_last_thirty_samples() {
    let aggregator = aggregator(None);
    let script = (0..31).map(|_| Ok(aggregator.collect())).collect();

    let mut clock = Instant::now();
    let mut poller = Poller::new(ScriptedSource::new(script), &PollConfig::default(), clock);
    for _ in 0..31 {
        tick_when_due(&mut poller, &mut clock);
    }

    let history = poller.history();
    assert_eq!(history.capacity(), 30);
    assert_eq!(history.len(ComponentKind::Cpu), 30);
    assert_eq!(history.latest(ComponentKind::Disk), Some(75.0));
}
