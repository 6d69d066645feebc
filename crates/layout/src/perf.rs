use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A stage of the table formatting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Init,
    TempWidths,
    Widths,
    TempHeights,
    Heights,
    Align,
    Displacements,
    CellPositions,
    Rules,
    Compose,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Init,
        Stage::TempWidths,
        Stage::Widths,
        Stage::TempHeights,
        Stage::Heights,
        Stage::Align,
        Stage::Displacements,
        Stage::CellPositions,
        Stage::Rules,
        Stage::Compose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::TempWidths => "temp-widths",
            Stage::Widths => "widths",
            Stage::TempHeights => "temp-heights",
            Stage::Heights => "heights",
            Stage::Align => "align",
            Stage::Displacements => "displacements",
            Stage::CellPositions => "cell-positions",
            Stage::Rules => "rules",
            Stage::Compose => "compose",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for measuring layout performance.
///
/// The formatter reports the time spent in every stage and the hit rate of
/// its rule cache. Production code uses [`NoOpProfiler`].
pub trait Profiler: Send + Sync {
    fn record(&self, stage: Stage, duration: Duration);
    fn count_hit(&self);
    fn count_miss(&self);
    fn reset(&self);
}

/// A no-op profiler for production use.
/// The compiler will inline these and eliminate the overhead.
#[derive(Debug, Default)]
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _stage: Stage, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn reset(&self) {}
}

/// Accumulates stage timings and cache counters for inspection.
pub struct DebugProfiler {
    stats: Mutex<HashMap<Stage, (Duration, u32)>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn log_summary(&self) {
        log::info!("=== Table Profile Summary ===");
        if let Some(rate) = self.hit_rate() {
            log::info!(
                "Rule cache hits: {} ({:.1}%)",
                self.hits.load(Ordering::Acquire),
                rate * 100.0
            );
        }
        if let Ok(stats) = self.stats.lock() {
            for stage in Stage::ALL {
                if let Some((total, calls)) = stats.get(&stage) {
                    log::info!("{}: {:?} over {} calls", stage, total, calls);
                }
            }
        }
    }

    /// Total time recorded for `stage`.
    pub fn total(&self, stage: Stage) -> Duration {
        self.stats
            .lock()
            .ok()
            .and_then(|s| s.get(&stage).map(|(d, _)| *d))
            .unwrap_or_default()
    }

    pub fn calls(&self, stage: Stage) -> u32 {
        self.stats
            .lock()
            .ok()
            .and_then(|s| s.get(&stage).map(|(_, c)| *c))
            .unwrap_or(0)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Acquire)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Acquire)
    }

    /// Fraction of rule lookups served from the cache, if any happened.
    pub fn hit_rate(&self) -> Option<f64> {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            return None;
        }
        Some(hits as f64 / total as f64)
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, stage: Stage, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            let entry = g.entry(stage).or_default();
            entry.0 += duration;
            entry.1 += 1;
        }
    }

    fn count_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    fn count_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    fn reset(&self) {
        if let Ok(mut g) = self.stats.lock() {
            g.clear();
        }
        self.hits.store(0, Ordering::Release);
        self.misses.store(0, Ordering::Release);
    }
}
