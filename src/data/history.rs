//! Short CPU history per server for the diagnostics sparkline.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Maximum number of samples kept per server.
const MAX_HISTORY_SIZE: usize = 60;

#[derive(Debug, Default)]
struct Series {
    samples: VecDeque<f64>,
    last_update: Option<Instant>,
}

/// Average CPU samples, one per distinct snapshot.
///
/// The UI records on every redraw, but only snapshots with a new update
/// time are appended, so the history advances at the poll cadence.
#[derive(Debug, Default)]
pub struct CpuHistory {
    series: HashMap<String, Series>,
}

impl CpuHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `avg` for `server` if `updated_at` is newer than the last
    /// sample. Returns whether a sample was appended.
    pub fn record(&mut self, server: &str, updated_at: Instant, avg: f64) -> bool {
        let series = self.series.entry(server.to_string()).or_default();
        if series.last_update.is_some_and(|last| updated_at <= last) {
            return false;
        }
        series.last_update = Some(updated_at);
        series.samples.push_back(avg);
        if series.samples.len() > MAX_HISTORY_SIZE {
            series.samples.pop_front();
        }
        true
    }

    /// Samples as whole percentages, oldest first, ready for a sparkline.
    ///
    /// Returns an empty Vec until there are two samples to compare.
    pub fn sparkline(&self, server: &str) -> Vec<u64> {
        let Some(series) = self.series.get(server) else {
            return Vec::new();
        };
        if series.samples.len() < 2 {
            return Vec::new();
        }
        series
            .samples
            .iter()
            .map(|v| v.round().clamp(0.0, 100.0) as u64)
            .collect()
    }

    pub fn len(&self, server: &str) -> usize {
        self.series.get(server).map_or(0, |s| s.samples.len())
    }
}
