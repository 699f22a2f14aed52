// Sat Oct 17 2026 - Alex

use log::LevelFilter;
use crate::utils::format_size;
use std::time::{Duration, Instant};

pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

pub fn level_from_str(s: &str) -> LevelFilter {
    parse_level(s).unwrap_or(LevelFilter::Info)
}

/// Each `-v` raises the level one step above `base`.
pub fn level_from_verbosity(base: LevelFilter, verbosity: u8) -> LevelFilter {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let current = levels.iter().position(|&l| l == base).unwrap_or(3);
    levels[(current + verbosity as usize).min(levels.len() - 1)]
}

/// Installs `env_logger` on stderr. A second call is a no-op.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

/// Logs how long a scan over `len` bytes took, and its throughput, when dropped.
pub struct ScanTimer {
    label: &'static str,
    len: usize,
    start: Instant,
}

impl ScanTimer {
    pub fn new(label: &'static str, len: usize) -> Self {
        log::debug!("{} over {} started", label, format_size(len));
        Self {
            label,
            len,
            start: Instant::now(),
        }
    }

    fn throughput(&self, elapsed: Duration) -> Option<f64> {
        let secs = elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.len as f64 / secs / (1024.0 * 1024.0))
    }
}

impl Drop for ScanTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        match self.throughput(elapsed) {
            Some(rate) => log::debug!("{} finished in {:?} ({:.1} MiB/s)", self.label, elapsed, rate),
            None => log::debug!("{} finished in {:?}", self.label, elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
        assert_eq!(level_from_str("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(LevelFilter::Info, 0), LevelFilter::Info);
        assert_eq!(level_from_verbosity(LevelFilter::Info, 1), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(LevelFilter::Warn, 9), LevelFilter::Trace);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(LevelFilter::Warn);
        init_logger(LevelFilter::Debug);
        let _timer = ScanTimer::new("noop", 0);
    }

    #[test]
    fn test_scan_timer_throughput() {
        let timer = ScanTimer::new("scan", 2 * 1024 * 1024);
        assert_eq!(timer.throughput(Duration::from_secs(2)), Some(1.0));
        assert_eq!(timer.throughput(Duration::ZERO), None);
    }
}
