use std::collections::VecDeque;

use super::metrics::{ComponentKind, Snapshot};

pub const DEFAULT_HISTORY_SIZE: usize = 30;

/// Rolling per-component sample buffers (for sparklines)
#[derive(Debug, Clone)]
pub struct HistoryStore {
    capacity: usize,
    buffers: [VecDeque<f64>; 4],
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            buffers: std::array::from_fn(|_| VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest one when full.
    ///
    /// Non-finite values are dropped so the trend line keeps its gaps instead
    /// of dipping to zero. Returns whether the value was recorded.
    pub fn record(&mut self, kind: ComponentKind, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let capacity = self.capacity;
        let queue = &mut self.buffers[kind.index()];
        while queue.len() >= capacity {
            queue.pop_front();
        }
        queue.push_back(value);
        true
    }

    /// Record every component present in the snapshot; an absent GPU adds nothing.
    pub fn record_snapshot(&mut self, snapshot: &Snapshot) {
        for kind in ComponentKind::ALL {
            if let Some(value) = snapshot.display_value(kind) {
                self.record(kind, value);
            }
        }
    }

    /// Current buffer, oldest first.
    pub fn series(&self, kind: ComponentKind) -> Vec<f64> {
        self.buffers[kind.index()].iter().copied().collect()
    }

    pub fn len(&self, kind: ComponentKind) -> usize {
        self.buffers[kind.index()].len()
    }

    pub fn is_empty(&self, kind: ComponentKind) -> bool {
        self.buffers[kind.index()].is_empty()
    }

    pub fn latest(&self, kind: ComponentKind) -> Option<f64> {
        self.buffers[kind.index()].back().copied()
    }

    pub fn clear(&mut self) {
        for queue in &mut self.buffers {
            queue.clear();
        }
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale a series into `0..=levels` for a sparkline widget.
///
/// Values are min-max normalized so small fluctuations stay visible; a flat
/// series sits in the middle. Fewer than two samples draw nothing.
pub fn sparkline_points(series: &[f64], levels: u64) -> Vec<u64> {
    if series.len() < 2 || levels == 0 {
        return Vec::new();
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    series
        .iter()
        .map(|&v| {
            if range <= f64::EPSILON {
                levels / 2
            } else {
                (((v - min) / range) * levels as f64).round() as u64
            }
        })
        .collect()
}
