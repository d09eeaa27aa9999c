//! Scale construction from chart configuration
//!
//! These functions are the entry points chart layouts use. They validate the
//! configuration up front so a malformed scale is rejected before anything is
//! drawn.

use crate::band::BandScale;
use crate::continuous::{ContinuousKind, ContinuousScale};
use crate::domain::Domain;
use crate::error::ScaleResult;
use crate::ordinal::OrdinalScale;
use crate::threshold::ThresholdScale;
use serde::{Deserialize, Serialize};

/// Default number of ticks requested from continuous axes
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Options for continuous scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuousOptions {
    /// Round the domain outward to clean tick values
    pub nice: bool,
    /// Tick count used for nice rounding
    pub tick_count: usize,
    /// Clamp output to the range
    pub clamp: bool,
}

impl Default for ContinuousOptions {
    fn default() -> Self {
        Self {
            nice: false,
            tick_count: DEFAULT_TICK_COUNT,
            clamp: false,
        }
    }
}

impl ContinuousOptions {
    /// Options with nice rounding enabled
    pub fn nice() -> Self {
        Self {
            nice: true,
            ..Self::default()
        }
    }

    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

fn build(
    kind: ContinuousKind,
    domain: (f64, f64),
    range: (f64, f64),
    options: &ContinuousOptions,
) -> ScaleResult<ContinuousScale> {
    let domain = Domain::new(domain.0, domain.1)?;
    let mut scale = ContinuousScale::from_domain(kind, domain, range)?.with_clamp(options.clamp);
    if options.nice {
        scale = scale.nice(options.tick_count);
    }
    tracing::trace!(?kind, domain = ?scale.domain(), ?range, "built continuous scale");
    Ok(scale)
}

/// Linear scale over an ascending `[min, max]` domain.
///
/// Reverse the range, not the domain, for axes that grow upward.
pub fn make_continuous_scale(
    domain: (f64, f64),
    range: (f64, f64),
    options: &ContinuousOptions,
) -> ScaleResult<ContinuousScale> {
    build(ContinuousKind::Linear, domain, range, options)
}

/// Square-root scale over an ascending `[min, max]` domain
pub fn make_sqrt_scale(
    domain: (f64, f64),
    range: (f64, f64),
    options: &ContinuousOptions,
) -> ScaleResult<ContinuousScale> {
    build(ContinuousKind::Sqrt, domain, range, options)
}

/// Band scale over `keys` in input order
pub fn make_band_scale<I, S>(keys: I, range: (f64, f64), padding_inner: f64) -> ScaleResult<BandScale>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BandScale::new(keys, range, padding_inner)
}

/// Ordinal scale from keys to outputs
pub fn make_ordinal_scale<I, S, T>(keys: I, outputs: Vec<T>) -> ScaleResult<OrdinalScale<T>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OrdinalScale::new(keys, outputs)
}

/// Threshold scale; needs exactly `breakpoints.len() + 1` outputs
pub fn make_threshold_scale<T>(breakpoints: Vec<f64>, outputs: Vec<T>) -> ScaleResult<ThresholdScale<T>> {
    ThresholdScale::new(breakpoints, outputs)
}
