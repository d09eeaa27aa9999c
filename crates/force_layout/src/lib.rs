//! Force layout
//!
//! Deterministic collision-avoiding placement of circles for beeswarm and
//! circle-packing charts:
//! - A damped force simulation pulling nodes toward per-node targets
//! - Radius scaling from data values
//! - Frame-chunked stepping against a [`perf::FrameBudget`]
//! - Generation tickets that discard superseded runs
//!
//! # Example
//!
//! ```rust
//! use force_layout::{simulate, NodeInput, SimulationConfig};
//!
//! let nodes = vec![
//!     NodeInput::new("a", Some(50.0), 5.0),
//!     NodeInput::new("b", Some(50.0), 5.0),
//! ];
//! let placed = simulate(&nodes, SimulationConfig::default().with_centerline(20.0)).unwrap();
//! assert_eq!(placed.len(), 2);
//! assert!(placed[0].distance(&placed[1]) >= 10.0);
//! ```

mod config;
mod error;
mod generation;
mod node;
mod radius;
mod simulation;

pub use config::*;
pub use error::*;
pub use generation::*;
pub use node::*;
pub use radius::*;
pub use simulation::*;
