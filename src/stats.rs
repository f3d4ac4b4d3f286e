// src/stats.rs
//! Statistics tracking for a discovery run

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Thread-safe run counters, shared by the certificate tasks
#[derive(Clone)]
pub struct DiscoveryStats {
    pages_fetched: Arc<AtomicU64>,
    certificates_resolved: Arc<AtomicU64>,
    certificates_failed: Arc<AtomicU64>,
    names_skipped: Arc<AtomicU64>,
    subdomains_found: Arc<AtomicU64>,
    start_time: Instant,
}

/// Snapshot of statistics at a point in time
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub pages_fetched: u64,
    pub certificates_resolved: u64,
    pub certificates_failed: u64,
    pub names_skipped: u64,
    pub subdomains_found: u64,
    pub elapsed_secs: u64,
}

impl DiscoveryStats {
    pub fn new() -> Self {
        Self {
            pages_fetched: Arc::new(AtomicU64::new(0)),
            certificates_resolved: Arc::new(AtomicU64::new(0)),
            certificates_failed: Arc::new(AtomicU64::new(0)),
            names_skipped: Arc::new(AtomicU64::new(0)),
            subdomains_found: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn increment_pages(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_resolved(&self) {
        self.certificates_resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.certificates_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_skipped(&self, count: u64) {
        self.names_skipped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_subdomains(&self) {
        self.subdomains_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            certificates_resolved: self.certificates_resolved.load(Ordering::Relaxed),
            certificates_failed: self.certificates_failed.load(Ordering::Relaxed),
            names_skipped: self.names_skipped.load(Ordering::Relaxed),
            subdomains_found: self.subdomains_found.load(Ordering::Relaxed),
            elapsed_secs: self.start_time.elapsed().as_secs(),
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_stats(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "{} subdomains | {} pages | {} certificates ({} failed) | {} names skipped | elapsed: {}",
            snapshot.subdomains_found,
            snapshot.pages_fetched,
            snapshot.certificates_resolved,
            snapshot.certificates_failed,
            snapshot.names_skipped,
            Self::format_elapsed(snapshot.elapsed_secs)
        )
    }

    pub fn format_elapsed(secs: u64) -> String {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl Default for DiscoveryStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let snapshot = DiscoveryStats::new().snapshot();

        assert_eq!(snapshot.pages_fetched, 0);
        assert_eq!(snapshot.certificates_resolved, 0);
        assert_eq!(snapshot.subdomains_found, 0);
    }

    #[test]
    fn test_counters() {
        let stats = DiscoveryStats::new();

        stats.increment_pages();
        stats.increment_resolved();
        stats.increment_resolved();
        stats.increment_failed();
        stats.add_skipped(3);
        stats.increment_subdomains();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.pages_fetched, 1);
        assert_eq!(snapshot.certificates_resolved, 2);
        assert_eq!(snapshot.certificates_failed, 1);
        assert_eq!(snapshot.names_skipped, 3);
        assert_eq!(snapshot.subdomains_found, 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let stats1 = DiscoveryStats::new();
        let stats2 = stats1.clone();

        stats1.increment_resolved();
        stats2.increment_resolved();

        assert_eq!(stats1.snapshot().certificates_resolved, 2);
        assert_eq!(stats2.snapshot().certificates_resolved, 2);
    }

    #[test]
    fn test_format_stats() {
        let stats = DiscoveryStats::new();
        stats.increment_pages();
        stats.increment_subdomains();

        let line = stats.format_stats();
        assert!(line.starts_with("1 subdomains | 1 pages"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(DiscoveryStats::format_elapsed(30), "30s");
        assert_eq!(DiscoveryStats::format_elapsed(90), "1m 30s");
        assert_eq!(DiscoveryStats::format_elapsed(3661), "1h 1m 1s");
    }
}
