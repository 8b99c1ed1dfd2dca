//! Translation lookup metrics.
//!
//! Counts key-path lookups and the ones that fell back to the key path
//! itself, so missing strings show up on the health endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Lookup counters. Use [`TranslationMetrics::global`] for the process-wide instance.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of key-path lookups
    lookups: AtomicUsize,

    /// Number of lookups that found no string leaf
    misses: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that fell back to the key path.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let misses = self.misses().min(lookups);
        let hit_rate = if lookups > 0 {
            ((lookups - misses) as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            misses,
            hit_rate,
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub misses: usize,

    /// Share of lookups that resolved to a string, as a percentage (0-100)
    pub hit_rate: f64,
}
