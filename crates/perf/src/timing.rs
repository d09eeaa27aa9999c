//! Timing utilities for performance measurement

use std::time::Instant;

/// A timer that measures elapsed time from creation to drop.
///
/// With the `telemetry` feature enabled the timer logs its elapsed time at
/// `trace` level under the `perf` target when dropped.
///
/// # Example
///
/// ```rust
/// use perf::PerfTimer;
///
/// fn resolve_pointer() {
///     let _timer = PerfTimer::pointer("resolve_nearest");
///     // ... bisection ...
/// }
/// ```
pub struct PerfTimer {
    name: &'static str,
    start: Instant,
    category: TimerCategory,
}

/// Category of operation being timed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCategory {
    /// Scale and domain construction
    Scale,
    /// Chart layout passes
    Layout,
    /// Force simulation runs and frames
    Simulation,
    /// Pointer-to-datum resolution
    Pointer,
    /// General/uncategorized timing
    General,
}

impl TimerCategory {
    /// Short label used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerCategory::Scale => "scale",
            TimerCategory::Layout => "layout",
            TimerCategory::Simulation => "simulation",
            TimerCategory::Pointer => "pointer",
            TimerCategory::General => "general",
        }
    }
}

impl PerfTimer {
    /// Create a new timer with the given name.
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self::with_category(name, TimerCategory::General)
    }

    /// Create a new timer with a specific category.
    #[inline]
    pub fn with_category(name: &'static str, category: TimerCategory) -> Self {
        Self {
            name,
            start: Instant::now(),
            category,
        }
    }

    /// Create a timer for scale construction.
    #[inline]
    pub fn scale(name: &'static str) -> Self {
        Self::with_category(name, TimerCategory::Scale)
    }

    /// Create a timer for layout passes.
    #[inline]
    pub fn layout(name: &'static str) -> Self {
        Self::with_category(name, TimerCategory::Layout)
    }

    /// Create a timer for simulation work.
    #[inline]
    pub fn simulation(name: &'static str) -> Self {
        Self::with_category(name, TimerCategory::Simulation)
    }

    /// Create a timer for pointer handling.
    #[inline]
    pub fn pointer(name: &'static str) -> Self {
        Self::with_category(name, TimerCategory::Pointer)
    }

    /// Get the elapsed time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the elapsed duration.
    #[inline]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn category(&self) -> TimerCategory {
        self.category
    }

    /// Stop the timer and return the elapsed milliseconds without logging.
    #[inline]
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_ms();
        std::mem::forget(self); // Prevent drop from running
        elapsed
    }
}

#[cfg(feature = "telemetry")]
impl Drop for PerfTimer {
    fn drop(&mut self) {
        tracing::trace!(
            target: "perf",
            name = self.name,
            category = self.category.as_str(),
            elapsed_ms = self.elapsed_ms(),
            "timer completed"
        );
    }
}

/// Macro for easy scope timing.
///
/// ```rust
/// use perf::time_scope;
///
/// fn do_work() {
///     time_scope!("work");
///     // ... work ...
/// } // Timer logs here
/// ```
#[macro_export]
macro_rules! time_scope {
    ($name:expr) => {
        let _timer = $crate::PerfTimer::new($name);
    };
    ($name:expr, $category:expr) => {
        let _timer = $crate::PerfTimer::with_category($name, $category);
    };
}

/// Macro for timing layout passes.
#[macro_export]
macro_rules! time_layout {
    ($name:expr) => {
        let _timer = $crate::PerfTimer::layout($name);
    };
}

/// Macro for timing simulation work.
#[macro_export]
macro_rules! time_simulation {
    ($name:expr) => {
        let _timer = $crate::PerfTimer::simulation($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_perf_timer_elapsed() {
        let timer = PerfTimer::new("test");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0, "elapsed should be at least 9ms, got {}", elapsed);
    }

    #[test]
    fn test_perf_timer_stop() {
        let timer = PerfTimer::simulation("test");
        sleep(Duration::from_millis(5));
        let elapsed = timer.stop();
        assert!(elapsed >= 4.0, "elapsed should be at least 4ms, got {}", elapsed);
    }

    #[test]
    fn test_timer_category() {
        assert_eq!(PerfTimer::scale("s").category(), TimerCategory::Scale);
        assert_eq!(PerfTimer::layout("l").category(), TimerCategory::Layout);
        assert_eq!(PerfTimer::simulation("sim").category(), TimerCategory::Simulation);

        let timer = PerfTimer::pointer("ptr");
        assert_eq!(timer.name(), "ptr");
        assert_eq!(timer.category().as_str(), "pointer");
    }
}
