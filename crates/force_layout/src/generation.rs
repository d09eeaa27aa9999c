//! Cancellation by generation counter
//!
//! Every simulation run takes a ticket from the chart's [`LayoutGenerations`].
//! Starting a new run invalidates older tickets, and [`LayoutSlot`] refuses
//! results carried by a stale ticket, so two runs triggered by rapid data
//! updates never interleave their position writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues monotonically increasing simulation generations
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerations {
    current: Arc<AtomicU64>,
}

impl LayoutGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier ticket
    pub fn begin(&self) -> GenerationTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(generation, "began layout generation");
        GenerationTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Supersede outstanding tickets without starting new work
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    /// The newest generation issued
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Proof of which generation a simulation belongs to
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl GenerationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer generation has been started
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

/// Holds the latest accepted layout result
#[derive(Debug, Clone)]
pub struct LayoutSlot<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> Default for LayoutSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }
}

impl<T> LayoutSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` if `ticket` is still current; stale results are dropped
    pub fn commit(&mut self, ticket: &GenerationTicket, value: T) -> bool {
        if !ticket.is_current() || ticket.generation < self.generation {
            tracing::debug!(
                generation = ticket.generation,
                committed = self.generation,
                "discarding superseded layout"
            );
            return false;
        }
        self.generation = ticket.generation;
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Generation of the stored value, 0 when empty
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
