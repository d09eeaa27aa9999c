//! Scales - domain derivation and data-to-pixel mappings for charts
//!
//! This crate provides:
//! - Domain derivation with zero-inclusion, explicit overrides and null handling
//! - Stacked-sum domains for grouped/stacked charts
//! - Linear and square-root continuous scales with invert and nice rounding
//! - Band scales for categorical axes
//! - Ordinal and threshold scales for colour and bucket lookups
//! - Conventional 1/2/5 tick generation
//!
//! Scales are immutable values built once per render pass.
//!
//! # Example
//!
//! ```rust
//! use scales::{derive_domain, make_continuous_scale, ContinuousOptions, DomainOptions};
//!
//! let values = vec![Some(2.0), Some(5.0), Some(9.0)];
//! let domain = derive_domain(&values, |v| *v, &DomainOptions::default()).unwrap();
//! assert_eq!(domain.as_tuple(), (0.0, 9.0));
//!
//! let y = make_continuous_scale(domain.as_tuple(), (300.0, 0.0), &ContinuousOptions::nice()).unwrap();
//! assert_eq!(y.map(0.0), 300.0);
//! ```

mod band;
mod continuous;
mod domain;
mod error;
mod factory;
mod ordinal;
mod threshold;
pub mod ticks;

pub use band::*;
pub use continuous::*;
pub use domain::*;
pub use error::*;
pub use factory::*;
pub use ordinal::*;
pub use threshold::*;
