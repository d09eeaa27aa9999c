//! Chart interaction
//!
//! Everything between a raw pointer event and a re-render:
//! - Bisection from a pointer position to the nearest record on an ordered axis
//! - A hover/pin/legend state machine with pure transitions
//! - Opacity derived from the legend selection and pinned datum
//!
//! # Example
//!
//! ```rust
//! use interaction::{InteractionMachine, PointerResolver, TieBreak};
//!
//! let resolver = PointerResolver::new(vec![1.0, 5.0, 10.0, 20.0], TieBreak::Center).unwrap();
//! let mut machine = InteractionMachine::default();
//!
//! if let Some(index) = resolver.resolve(&7.0) {
//!     machine.hover(index);
//! }
//! assert_eq!(machine.state().hovered, Some(1));
//! ```

mod error;
mod machine;
mod opacity;
mod pointer;
mod state;

pub use error::*;
pub use machine::*;
pub use opacity::*;
pub use pointer::*;
pub use state::*;
