//! Threshold scales
//!
//! Ascending breakpoints split the number line into buckets; bucket `i`
//! covers `[breakpoints[i - 1], breakpoints[i])`, with open-ended first and
//! last buckets.

use crate::error::{ScaleError, ScaleResult};

/// Maps a number to the output of the bucket containing it
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale<T> {
    breakpoints: Vec<f64>,
    outputs: Vec<T>,
}

impl<T> ThresholdScale<T> {
    /// Create a threshold scale.
    ///
    /// Requires `outputs.len() == breakpoints.len() + 1` and finite,
    /// non-decreasing breakpoints.
    pub fn new(breakpoints: Vec<f64>, outputs: Vec<T>) -> ScaleResult<Self> {
        if outputs.len() != breakpoints.len() + 1 {
            return Err(ScaleError::ThresholdMismatch {
                breakpoints: breakpoints.len(),
                outputs: outputs.len(),
            });
        }
        for (index, value) in breakpoints.iter().enumerate() {
            if !value.is_finite() || (index > 0 && *value < breakpoints[index - 1]) {
                return Err(ScaleError::NonAscendingBreakpoints { index });
            }
        }
        Ok(Self {
            breakpoints,
            outputs,
        })
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    /// Bucket index for `value`; NaN has no bucket
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        Some(self.breakpoints.partition_point(|b| *b <= value))
    }

    /// Output for `value`
    pub fn map(&self, value: f64) -> Option<&T> {
        self.bucket(value).and_then(|i| self.outputs.get(i))
    }

    /// Interval `(lower, upper)` that maps to bucket `index`.
    ///
    /// Open ends are `None`. Returns `None` for an unknown bucket.
    pub fn extent(&self, index: usize) -> Option<(Option<f64>, Option<f64>)> {
        if index >= self.outputs.len() {
            return None;
        }
        let lower = index.checked_sub(1).map(|i| self.breakpoints[i]);
        let upper = self.breakpoints.get(index).copied();
        Some((lower, upper))
    }
}
