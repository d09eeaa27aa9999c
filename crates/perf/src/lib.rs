//! Performance timing and budgets
//!
//! This crate provides the timing infrastructure shared by the chart core:
//! - RAII scope timers that report through `tracing`
//! - Per-frame budgets used to chunk long-running simulations
//! - Budget checks for layout passes and pointer handling
//!
//! # Feature Flags
//!
//! - `telemetry` (default): timers log their elapsed time on drop
//!
//! # Example
//!
//! ```rust
//! use perf::{time_scope, FrameBudget};
//!
//! fn layout_pass() {
//!     time_scope!("bar_layout");
//!     // ... layout code ...
//! }
//!
//! let mut frame = FrameBudget::for_60fps().start_frame();
//! while frame.tick() {
//!     // ... one simulation step ...
//! #   break;
//! }
//! ```

mod budget;
mod timing;

pub use budget::*;
pub use timing::*;

/// Re-export for convenience
pub use std::time::{Duration, Instant};
