use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Observes layout cache behaviour.
///
/// Implementations must be cheap; the cache calls into them on every lookup,
/// possibly from several measurement threads at once.
pub trait Profiler: Send + Sync {
    fn record(&self, key: &str, duration: Duration);
    fn count_hit(&self);
    fn count_miss(&self);
    fn reset(&self);

    /// Record one measurement performed after a cache miss.
    fn record_measurement(&self, duration: Duration);

    /// Share of lookups that were served from the cache.
    fn hit_ratio(&self) -> Option<f64>;

    /// Average time spent per measurement.
    fn avg_measurement_time(&self) -> Option<Duration>;
}

/// A no-op profiler for production use.
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _key: &str, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn reset(&self) {}
    #[inline(always)]
    fn record_measurement(&self, _duration: Duration) {}
    #[inline(always)]
    fn hit_ratio(&self) -> Option<f64> {
        None
    }
    #[inline(always)]
    fn avg_measurement_time(&self) -> Option<Duration> {
        None
    }
}

/// Counting profiler, handed out when profiling is enabled.
pub struct DebugProfiler {
    stats: Mutex<HashMap<String, Duration>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    measurements: AtomicUsize,
    total_measurement_ns: AtomicU64,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            measurements: AtomicUsize::new(0),
            total_measurement_ns: AtomicU64::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Acquire)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Acquire)
    }

    pub fn measurements(&self) -> usize {
        self.measurements.load(Ordering::Acquire)
    }

    pub fn log_summary(&self, label: &str) {
        let hits = self.hits();
        let misses = self.misses();
        let total = hits + misses;
        if total == 0 {
            return;
        }

        log::info!("=== Layout Cache Summary ({}) ===", label);
        log::info!(
            "Cache Hits: {} ({:.1}%)",
            hits,
            (hits as f64 / total as f64) * 100.0
        );
        log::info!("Cache Misses: {}", misses);

        if let Some(avg) = self.avg_measurement_time() {
            log::info!(
                "Measurements: {} (avg {:?})",
                self.measurements(),
                avg
            );
        }

        if let Ok(stats) = self.stats.lock() {
            for (k, v) in stats.iter() {
                log::info!("{}: {:?}", k, v);
            }
        }
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, key: &str, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            *g.entry(key.to_string()).or_default() += duration;
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
        self.measurements.store(0, Ordering::Release);
        self.total_measurement_ns.store(0, Ordering::Release);
    }

    fn record_measurement(&self, duration: Duration) {
        self.measurements.fetch_add(1, Ordering::Release);
        // Saturate rather than wrap on absurdly long durations
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_measurement_ns.fetch_add(nanos, Ordering::Release);
    }

    fn hit_ratio(&self) -> Option<f64> {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            return None;
        }
        Some(hits as f64 / total as f64)
    }

    fn avg_measurement_time(&self) -> Option<Duration> {
        let count = self.measurements();
        if count == 0 {
            return None;
        }
        let total = self.total_measurement_ns.load(Ordering::Acquire);
        Some(Duration::from_nanos(total / count as u64))
    }
}
