//! Charts - data-driven chart layouts and interactive chart instances
//!
//! This crate provides support for:
//! - A dataset model of keyed records with one or more series
//! - Declarative chart configuration loaded from JSON
//! - Layouts for bar (simple, grouped, stacked), line, area, dumbbell,
//!   bee-swarm, packed-circle and heatmap charts
//! - Injected colour palettes, including a bivariate colour lookup
//! - Per-chart instances that map pointer events to hover and pin state
//!
//! ```
//! use charts::{ChartConfig, ChartInstance, ChartType, Dataset, Datum};
//!
//! let data = Dataset::single_series()
//!     .with_record(Datum::single("A", 3.0))
//!     .with_record(Datum::single("B", 5.0));
//! let mut chart = ChartInstance::new(data, ChartConfig::new(ChartType::Bar)).unwrap();
//!
//! assert_eq!(chart.layout().unwrap().bars.len(), 2);
//! chart.pointer_move(100.0, 200.0);
//! ```

mod config;
mod error;
mod instance;
mod layout;
mod model;
mod styles;

pub use config::*;
pub use error::*;
pub use instance::*;
pub use layout::*;
pub use model::*;
pub use styles::*;
