//! Ordinal (categorical) scales

use crate::error::{ScaleError, ScaleResult};
use indexmap::IndexSet;

/// Maps discrete keys to outputs in domain order.
///
/// When there are fewer outputs than keys the outputs repeat. Keys outside
/// the domain map to the `unknown` output if one is set, otherwise to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<T> {
    domain: IndexSet<String>,
    outputs: Vec<T>,
    unknown: Option<T>,
}

impl<T> OrdinalScale<T> {
    /// Create an ordinal scale; `outputs` must not be empty
    pub fn new<I, S>(keys: I, outputs: Vec<T>) -> ScaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if outputs.is_empty() {
            return Err(ScaleError::EmptyOutputs);
        }
        Ok(Self {
            domain: keys.into_iter().map(Into::into).collect(),
            outputs,
            unknown: None,
        })
    }

    /// Output returned for keys outside the domain
    pub fn with_unknown(mut self, unknown: T) -> Self {
        self.unknown = Some(unknown);
        self
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Keys in domain order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    /// Output for `key`
    pub fn map(&self, key: &str) -> Option<&T> {
        match self.domain.get_index_of(key) {
            Some(index) => self.outputs.get(index % self.outputs.len()),
            None => self.unknown.as_ref(),
        }
    }
}
