//! Continuous scales
//!
//! A [`ContinuousScale`] maps a numeric domain onto a pixel range by linear
//! interpolation, optionally after a square-root transform of the domain so
//! that circle area rather than radius tracks the value.

use crate::domain::Domain;
use crate::error::{ScaleError, ScaleResult};
use crate::ticks;
use serde::{Deserialize, Serialize};

/// How domain values are transformed before interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContinuousKind {
    /// Plain affine mapping
    #[default]
    Linear,
    /// Signed square root of the value, then affine
    Sqrt,
}

impl ContinuousKind {
    fn forward(self, value: f64) -> f64 {
        match self {
            ContinuousKind::Linear => value,
            ContinuousKind::Sqrt => value.signum() * value.abs().sqrt(),
        }
    }

    fn backward(self, value: f64) -> f64 {
        match self {
            ContinuousKind::Linear => value,
            ContinuousKind::Sqrt => value.signum() * value * value,
        }
    }
}

/// Immutable mapping from a continuous domain to a pixel range.
///
/// Values outside the domain extrapolate along the same line unless clamping
/// is enabled. A domain whose bounds coincide maps every value to the middle
/// of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    kind: ContinuousKind,
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

fn check_finite_pair(pair: (f64, f64)) -> bool {
    pair.0.is_finite() && pair.1.is_finite()
}

impl ContinuousScale {
    /// Create a scale of the given kind
    pub fn new(kind: ContinuousKind, domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        if !check_finite_pair(domain) {
            return Err(ScaleError::NonFiniteDomain {
                min: domain.0,
                max: domain.1,
            });
        }
        if !check_finite_pair(range) {
            return Err(ScaleError::InvalidRange {
                start: range.0,
                end: range.1,
            });
        }
        Ok(Self {
            kind,
            domain,
            range,
            clamp: false,
        })
    }

    /// Create a linear scale
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        Self::new(ContinuousKind::Linear, domain, range)
    }

    /// Create a square-root scale
    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        Self::new(ContinuousKind::Sqrt, domain, range)
    }

    /// Create a scale over a derived [`Domain`]
    pub fn from_domain(kind: ContinuousKind, domain: Domain, range: (f64, f64)) -> ScaleResult<Self> {
        Self::new(kind, domain.as_tuple(), range)
    }

    /// Expand the domain outward to round tick values
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = ticks::nice_bounds(self.domain.0, self.domain.1, count);
        self
    }

    /// Clamp outputs to the range instead of extrapolating
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Replace the output range
    pub fn with_range(mut self, range: (f64, f64)) -> ScaleResult<Self> {
        if !check_finite_pair(range) {
            return Err(ScaleError::InvalidRange {
                start: range.0,
                end: range.1,
            });
        }
        self.range = range;
        Ok(self)
    }

    pub fn kind(&self) -> ContinuousKind {
        self.kind
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    /// Map a domain value to a pixel coordinate
    pub fn map(&self, value: f64) -> f64 {
        let d0 = self.kind.forward(self.domain.0);
        let d1 = self.kind.forward(self.domain.1);
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }

        let mut t = (self.kind.forward(value) - d0) / (d1 - d0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    /// Map a pixel coordinate back into the domain
    pub fn invert(&self, pixel: f64) -> f64 {
        let d0 = self.kind.forward(self.domain.0);
        let d1 = self.kind.forward(self.domain.1);
        let (r0, r1) = self.range;

        let mut t = if r0 == r1 { 0.5 } else { (pixel - r0) / (r1 - r0) };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.kind.backward(d0 + t * (d1 - d0))
    }

    /// Roughly `count` round tick values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::ticks(self.domain.0, self.domain.1, count)
    }

    /// Distance between the values returned by [`ContinuousScale::ticks`]
    pub fn tick_step(&self, count: usize) -> f64 {
        ticks::tick_step(self.domain.0, self.domain.1, count)
    }
}
