// Metrics module - Prometheus-compatible counters for URL building
// Makes the unsigned fallback visible to whoever scrapes the host process

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for built URLs
///
/// Thread-safe via relaxed atomics; every call to `UrlBuilder::build_url`
/// bumps exactly one of `signed_urls` / `unsigned_urls`.
#[derive(Debug, Default)]
pub struct Metrics {
    signed_urls: AtomicU64,
    unsigned_urls: AtomicU64,

    // Signing was requested but no key/salt is configured
    unsigned_fallbacks: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_signed(&self) {
        self.signed_urls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unsigned(&self) {
        self.unsigned_urls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unsigned_fallback(&self) {
        self.unsigned_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn signed_urls(&self) -> u64 {
        self.signed_urls.load(Ordering::Relaxed)
    }

    pub fn unsigned_urls(&self) -> u64 {
        self.unsigned_urls.load(Ordering::Relaxed)
    }

    pub fn unsigned_fallbacks(&self) -> u64 {
        self.unsigned_fallbacks.load(Ordering::Relaxed)
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        output.push_str("# HELP imgproxy_urls_built_total Image proxy URLs built\n");
        output.push_str("# TYPE imgproxy_urls_built_total counter\n");
        output.push_str(&format!(
            "imgproxy_urls_built_total{{signed=\"true\"}} {}\n",
            self.signed_urls()
        ));
        output.push_str(&format!(
            "imgproxy_urls_built_total{{signed=\"false\"}} {}\n",
            self.unsigned_urls()
        ));

        output.push_str(
            "\n# HELP imgproxy_unsigned_fallbacks_total Signed URLs requested without a configured key or salt\n",
        );
        output.push_str("# TYPE imgproxy_unsigned_fallbacks_total counter\n");
        output.push_str(&format!(
            "imgproxy_unsigned_fallbacks_total {}\n",
            self.unsigned_fallbacks()
        ));

        output
    }
}
