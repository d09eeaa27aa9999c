//! Radius scaling for sized circles

use crate::error::{LayoutError, LayoutResult};
use scales::{ContinuousOptions, ContinuousScale};

/// Maps a size value to a circle radius so that area tracks the value.
///
/// The underlying square-root scale runs from `[0, max value]` to
/// `[min_radius, max_radius]`. Outputs are clamped to the bounds. When every
/// size is zero (or no sizes exist) all circles get `max_radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusScale {
    scale: Option<ContinuousScale>,
    min_radius: f64,
    max_radius: f64,
}

impl RadiusScale {
    /// Build from the size values present in the data
    pub fn from_values<I>(values: I, bounds: (f64, f64)) -> LayoutResult<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (min_radius, max_radius) = bounds;
        if !(min_radius.is_finite() && max_radius.is_finite())
            || min_radius < 0.0
            || min_radius > max_radius
        {
            return Err(LayoutError::InvalidRadiusBounds {
                min: min_radius,
                max: max_radius,
            });
        }

        let max_value = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        let scale = if max_value > 0.0 {
            let options = ContinuousOptions::default().with_clamp(true);
            Some(scales::make_sqrt_scale(
                (0.0, max_value),
                (min_radius, max_radius),
                &options,
            )?)
        } else {
            tracing::debug!("all sizes are zero; using maximum radius");
            None
        };

        Ok(Self {
            scale,
            min_radius,
            max_radius,
        })
    }

    /// A scale that gives every circle the same radius
    pub fn fixed(radius: f64) -> LayoutResult<Self> {
        Self::from_values(std::iter::empty(), (radius, radius))
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_radius, self.max_radius)
    }

    /// Radius for a size value; missing or non-finite sizes get the minimum
    pub fn radius(&self, value: Option<f64>) -> f64 {
        let Some(scale) = &self.scale else {
            return self.max_radius;
        };
        match value {
            Some(v) if v.is_finite() => scale.map(v.max(0.0)),
            _ => self.min_radius,
        }
    }
}
