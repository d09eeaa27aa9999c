//! Domain derivation
//!
//! Computes the continuous input interval of a scale from a dataset column,
//! applying the zero-inclusion policy, explicit overrides and null handling
//! shared by every chart variant.

use crate::error::{ScaleError, ScaleResult};
use serde::{Deserialize, Serialize};

/// A validated continuous domain with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Create a domain, rejecting non-finite or descending bounds
    pub fn new(min: f64, max: f64) -> ScaleResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ScaleError::NonFiniteDomain { min, max });
        }
        if min > max {
            return Err(ScaleError::NonAscendingDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Width of the domain
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether min and max coincide
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The domain as a `(min, max)` tuple
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Options controlling how a domain is derived from data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainOptions {
    /// Include zero in the domain. Opting out only takes effect when the
    /// data contains negative values.
    pub start_from_zero: bool,
    /// Overrides the derived minimum unconditionally
    pub explicit_min: Option<f64>,
    /// Overrides the derived maximum unconditionally
    pub explicit_max: Option<f64>,
    /// Skip null values; when false they count as zero
    pub exclude_nulls: bool,
}

impl Default for DomainOptions {
    fn default() -> Self {
        Self {
            start_from_zero: true,
            explicit_min: None,
            explicit_max: None,
            exclude_nulls: true,
        }
    }
}

impl DomainOptions {
    /// Create the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zero-inclusion policy
    pub fn with_start_from_zero(mut self, start_from_zero: bool) -> Self {
        self.start_from_zero = start_from_zero;
        self
    }

    /// Set an explicit minimum
    pub fn with_min(mut self, min: f64) -> Self {
        self.explicit_min = Some(min);
        self
    }

    /// Set an explicit maximum
    pub fn with_max(mut self, max: f64) -> Self {
        self.explicit_max = Some(max);
        self
    }

    /// Set null handling
    pub fn with_exclude_nulls(mut self, exclude_nulls: bool) -> Self {
        self.exclude_nulls = exclude_nulls;
        self
    }
}

/// Running min/max over indexed, possibly-null values
fn observe<I>(values: I, exclude_nulls: bool) -> ScaleResult<Option<(f64, f64)>>
where
    I: IntoIterator<Item = (usize, Option<f64>)>,
{
    let mut extent: Option<(f64, f64)> = None;
    for (index, value) in values {
        let value = match value {
            Some(v) => v,
            None if exclude_nulls => continue,
            None => 0.0,
        };
        if !value.is_finite() {
            return Err(ScaleError::NonFiniteValue { index });
        }
        extent = Some(match extent {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    Ok(extent)
}

fn resolve(extent: Option<(f64, f64)>, options: &DomainOptions) -> ScaleResult<Domain> {
    let Some((observed_min, observed_max)) = extent else {
        tracing::debug!("no values observed; deriving domain from overrides only");
        let min = options
            .explicit_min
            .unwrap_or_else(|| options.explicit_max.map_or(0.0, |max| max.min(0.0)));
        let max = options.explicit_max.unwrap_or_else(|| min.max(0.0));
        return Domain::new(min, max);
    };

    let (mut min, mut max) = (observed_min, observed_max);
    let honor_opt_out = !options.start_from_zero && observed_min < 0.0;
    if !honor_opt_out {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    if let Some(explicit) = options.explicit_min {
        min = explicit;
    }
    if let Some(explicit) = options.explicit_max {
        max = explicit;
    }

    tracing::trace!(min, max, observed_min, observed_max, "derived domain");
    Domain::new(min, max)
}

/// Derive a continuous domain from one numeric column.
///
/// Records whose selector yields `None` are skipped (or counted as zero when
/// `exclude_nulls` is false); they still belong to the dataset.
pub fn derive_domain<R, F>(records: &[R], selector: F, options: &DomainOptions) -> ScaleResult<Domain>
where
    F: Fn(&R) -> Option<f64>,
{
    let extent = observe(
        records.iter().enumerate().map(|(i, r)| (i, selector(r))),
        options.exclude_nulls,
    )?;
    resolve(extent, options)
}

/// Derive a domain over per-record stack extents for stacked charts.
///
/// Stacks diverge: negative entries pile downward from zero and the rest
/// pile upward, so a record spans from the sum of its negative entries to
/// the sum of its non-negative ones. Absent entries are left out rather than
/// treated as zero; a record with no present entries contributes nothing.
/// Every record must carry the same number of entries.
pub fn derive_stacked_domain<R, F>(
    records: &[R],
    selector: F,
    options: &DomainOptions,
) -> ScaleResult<Domain>
where
    F: for<'a> Fn(&'a R) -> &'a [Option<f64>],
{
    let bounds = stacked_bounds(records, selector)?;
    let extent = observe(
        bounds
            .into_iter()
            .enumerate()
            .flat_map(|(index, (low, high))| [(index, low), (index, high)]),
        true,
    )?;
    resolve(extent, options)
}

/// Per-record sums of present entries, validating a consistent stack length
pub fn stacked_sums<R, F>(records: &[R], selector: F) -> ScaleResult<Vec<Option<f64>>>
where
    F: for<'a> Fn(&'a R) -> &'a [Option<f64>],
{
    let rows = stack_rows(records, selector)?;
    Ok(rows
        .into_iter()
        .map(|values| values.iter().flatten().copied().reduce(|a, b| a + b))
        .collect())
}

/// Per-record `(negative, non-negative)` totals of a diverging stack.
///
/// Either side is `None` when the record has no entry of that sign.
pub fn stacked_bounds<R, F>(
    records: &[R],
    selector: F,
) -> ScaleResult<Vec<(Option<f64>, Option<f64>)>>
where
    F: for<'a> Fn(&'a R) -> &'a [Option<f64>],
{
    let rows = stack_rows(records, selector)?;
    Ok(rows
        .into_iter()
        .map(|values| {
            values.iter().flatten().fold((None, None), |(low, high), &value| {
                if value < 0.0 {
                    (Some(low.unwrap_or(0.0) + value), high)
                } else {
                    (low, Some(high.unwrap_or(0.0) + value))
                }
            })
        })
        .collect())
}

fn stack_rows<'r, R, F>(records: &'r [R], selector: F) -> ScaleResult<Vec<&'r [Option<f64>]>>
where
    F: for<'a> Fn(&'a R) -> &'a [Option<f64>],
{
    let mut expected: Option<usize> = None;
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let values = selector(record);
        match expected {
            Some(len) if len != values.len() => {
                return Err(ScaleError::InconsistentStackLength {
                    index,
                    expected: len,
                    found: values.len(),
                });
            }
            None => expected = Some(values.len()),
            _ => {}
        }
        if values.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ScaleError::NonFiniteValue { index });
        }
        rows.push(values);
    }

    Ok(rows)
}

/// Raw extent of the defined values, without any zero policy.
///
/// Returns `None` when no record carries a value.
pub fn derive_extent<R, F>(records: &[R], selector: F) -> ScaleResult<Option<Domain>>
where
    F: Fn(&R) -> Option<f64>,
{
    let extent = observe(records.iter().enumerate().map(|(i, r)| (i, selector(r))), true)?;
    extent.map(|(min, max)| Domain::new(min, max)).transpose()
}
