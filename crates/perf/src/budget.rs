//! Performance budgets and violation tracking

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Performance budget configuration.
///
/// Defines acceptable thresholds for the chart core's operations. A
/// measurement over its threshold produces a [`BudgetViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerfBudget {
    /// Maximum time for one layout pass (scales plus shape positions).
    pub max_layout_ms: f64,

    /// Maximum time for a complete, unchunked simulation run.
    pub max_simulation_ms: f64,

    /// Maximum time to resolve one pointer event to a datum.
    ///
    /// Pointer handlers fire at native event rate, so this stays well under a frame.
    pub max_pointer_ms: f64,
}

impl PerfBudget {
    /// Create a new budget with custom thresholds.
    pub fn new(max_layout_ms: f64, max_simulation_ms: f64, max_pointer_ms: f64) -> Self {
        Self {
            max_layout_ms,
            max_simulation_ms,
            max_pointer_ms,
        }
    }

    /// Create a budget for interactive dashboards at 60fps.
    pub fn interactive() -> Self {
        Self {
            max_layout_ms: 16.0,
            max_simulation_ms: 250.0,
            max_pointer_ms: 2.0,
        }
    }

    /// Create a relaxed budget for large static reports.
    pub fn relaxed() -> Self {
        Self {
            max_layout_ms: 100.0,
            max_simulation_ms: 2000.0,
            max_pointer_ms: 8.0,
        }
    }

    pub fn with_layout_time(mut self, ms: f64) -> Self {
        self.max_layout_ms = ms;
        self
    }

    pub fn with_simulation_time(mut self, ms: f64) -> Self {
        self.max_simulation_ms = ms;
        self
    }

    pub fn with_pointer_time(mut self, ms: f64) -> Self {
        self.max_pointer_ms = ms;
        self
    }

    /// Check a layout measurement, returning a violation when over budget.
    pub fn check_layout(&self, ms: f64) -> Option<BudgetViolation> {
        BudgetViolation::check("layout", ms, self.max_layout_ms)
    }

    /// Check a simulation measurement, returning a violation when over budget.
    pub fn check_simulation(&self, ms: f64) -> Option<BudgetViolation> {
        BudgetViolation::check("simulation", ms, self.max_simulation_ms)
    }

    /// Check a pointer-resolution measurement, returning a violation when over budget.
    pub fn check_pointer(&self, ms: f64) -> Option<BudgetViolation> {
        BudgetViolation::check("pointer", ms, self.max_pointer_ms)
    }
}

impl Default for PerfBudget {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Per-frame allowance for chunked work such as simulation ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameBudget {
    /// Wall-clock allowance for one frame in milliseconds; `None` for no time limit
    pub max_frame_ms: Option<f64>,
    /// Maximum number of work units per frame
    pub max_ticks_per_frame: usize,
}

impl FrameBudget {
    pub fn new(max_frame_ms: f64, max_ticks_per_frame: usize) -> Self {
        Self {
            max_frame_ms: Some(max_frame_ms),
            max_ticks_per_frame,
        }
    }

    /// Half of a 60fps frame, leaving room for rendering.
    pub fn for_60fps() -> Self {
        Self::new(8.0, 64)
    }

    /// Half of a 120fps frame.
    pub fn for_120fps() -> Self {
        Self::new(4.0, 32)
    }

    /// A fixed number of ticks with no time limit; frames are reproducible.
    pub fn ticks(max_ticks_per_frame: usize) -> Self {
        Self {
            max_frame_ms: None,
            max_ticks_per_frame,
        }
    }

    /// Begin measuring one frame.
    pub fn start_frame(&self) -> FrameDeadline {
        FrameDeadline {
            budget: *self,
            start: Instant::now(),
            ticks: 0,
        }
    }
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self::for_60fps()
    }
}

/// Tracks work done within one frame against its [`FrameBudget`].
#[derive(Debug, Clone)]
pub struct FrameDeadline {
    budget: FrameBudget,
    start: Instant,
    ticks: usize,
}

impl FrameDeadline {
    /// Claim one more unit of work.
    ///
    /// The first tick is always granted so every frame makes progress.
    pub fn tick(&mut self) -> bool {
        if self.ticks > 0
            && (self.ticks >= self.budget.max_ticks_per_frame
                || self.budget.max_frame_ms.is_some_and(|max| self.elapsed_ms() >= max))
        {
            return false;
        }
        self.ticks += 1;
        true
    }

    /// Units of work granted so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Finish the frame, logging and returning a violation if it ran long.
    pub fn finish(self, category: &str) -> Option<BudgetViolation> {
        let violation = self
            .budget
            .max_frame_ms
            .and_then(|max| BudgetViolation::check(category, self.elapsed_ms(), max));
        if let Some(ref v) = violation {
            v.log();
        }
        violation
    }
}

/// Severity level of a budget violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    /// Minor violation (1-1.5x budget)
    Low,
    /// Moderate violation (1.5-2x budget)
    Medium,
    /// Significant violation (2-3x budget)
    High,
    /// Severe violation (>3x budget)
    Critical,
}

impl ViolationSeverity {
    /// Classify a measurement by how far it exceeds its budget.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 3.0 {
            ViolationSeverity::Critical
        } else if ratio > 2.0 {
            ViolationSeverity::High
        } else if ratio > 1.5 {
            ViolationSeverity::Medium
        } else {
            ViolationSeverity::Low
        }
    }
}

/// A performance budget violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetViolation {
    /// Category of the violation (e.g. "layout", "pointer", "simulation_frame")
    pub category: String,
    /// Actual measured time in milliseconds
    pub actual_ms: f64,
    /// Budget threshold in milliseconds
    pub budget_ms: f64,
    /// Severity of the violation
    pub severity: ViolationSeverity,
}

impl BudgetViolation {
    /// Create a new budget violation.
    pub fn new(
        category: impl Into<String>,
        actual_ms: f64,
        budget_ms: f64,
        severity: ViolationSeverity,
    ) -> Self {
        Self {
            category: category.into(),
            actual_ms,
            budget_ms,
            severity,
        }
    }

    /// Compare a measurement against a threshold.
    pub fn check(category: &str, actual_ms: f64, budget_ms: f64) -> Option<Self> {
        if actual_ms <= budget_ms {
            return None;
        }
        let severity = ViolationSeverity::from_ratio(actual_ms / budget_ms);
        Some(Self::new(category, actual_ms, budget_ms, severity))
    }

    /// Calculate how much the actual time exceeds the budget.
    pub fn excess_ms(&self) -> f64 {
        self.actual_ms - self.budget_ms
    }

    /// Calculate the ratio of actual to budget (e.g., 2.0 means 2x over budget).
    pub fn ratio(&self) -> f64 {
        self.actual_ms / self.budget_ms
    }

    /// Log the violation; high and critical violations are warnings.
    pub fn log(&self) {
        if self.severity >= ViolationSeverity::High {
            tracing::warn!(
                target: "perf",
                category = %self.category,
                actual_ms = self.actual_ms,
                budget_ms = self.budget_ms,
                severity = ?self.severity,
                "budget exceeded"
            );
        } else {
            tracing::debug!(
                target: "perf",
                category = %self.category,
                actual_ms = self.actual_ms,
                budget_ms = self.budget_ms,
                severity = ?self.severity,
                "budget exceeded"
            );
        }
    }
}

impl std::fmt::Display for BudgetViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.2}ms (budget: {:.2}ms, {:.1}x over)",
            self.category,
            self.actual_ms,
            self.budget_ms,
            self.ratio()
        )
    }
}
