//! Band scales
//!
//! Discrete keys are assigned equal, non-overlapping slots of the range in
//! input order. Each slot is `range / count` wide and the padding fraction of
//! it trails the band as the gap before the next slot.

use crate::error::{ScaleError, ScaleResult};
use indexmap::IndexSet;

/// Pixel interval occupied by one key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub width: f64,
}

impl Band {
    /// Far edge of the band
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// Midpoint of the band
    pub fn center(&self) -> f64 {
        self.start + self.width / 2.0
    }
}

/// Maps keys to equal-width slots of a pixel range
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: IndexSet<String>,
    range: (f64, f64),
    padding_inner: f64,
}

impl BandScale {
    /// Create a band scale.
    ///
    /// Duplicate keys keep their first position. A descending range places
    /// the first key at the high end.
    pub fn new<I, S>(keys: I, range: (f64, f64), padding_inner: f64) -> ScaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(0.0..1.0).contains(&padding_inner) {
            return Err(ScaleError::InvalidPadding(padding_inner));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ScaleError::InvalidRange {
                start: range.0,
                end: range.1,
            });
        }
        Ok(Self {
            keys: keys.into_iter().map(Into::into).collect(),
            range,
            padding_inner,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    /// Keys in slot order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Distance between the starts of adjacent slots
    pub fn step(&self) -> f64 {
        if self.keys.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0).abs() / self.keys.len() as f64
    }

    /// Width of every band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Gap left after each band
    pub fn gap(&self) -> f64 {
        self.step() * self.padding_inner
    }

    /// Slot position of `key`
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    fn slot_start(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        if r1 >= r0 {
            r0 + index as f64 * self.step()
        } else {
            r1 + (self.keys.len() - 1 - index) as f64 * self.step()
        }
    }

    /// Band for `key`, or `None` when the key is not in the domain
    pub fn band(&self, key: &str) -> Option<Band> {
        let index = self.index_of(key)?;
        Some(self.band_at(index))
    }

    /// Band for the slot at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn band_at(&self, index: usize) -> Band {
        assert!(index < self.keys.len(), "band index out of bounds");
        Band {
            start: self.slot_start(index),
            width: self.bandwidth(),
        }
    }

    /// Start pixel of the band for `key`
    pub fn position(&self, key: &str) -> Option<f64> {
        self.band(key).map(|b| b.start)
    }

    /// Center pixel of the band for `key`
    pub fn center(&self, key: &str) -> Option<f64> {
        self.band(key).map(|b| b.center())
    }

    /// Key whose band contains `pixel`; gaps and out-of-range pixels yield `None`
    pub fn invert(&self, pixel: f64) -> Option<&str> {
        let step = self.step();
        if step <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let lo = self.range.0.min(self.range.1);
        let slot = ((pixel - lo) / step).floor();
        if slot < 0.0 || slot >= self.keys.len() as f64 {
            return None;
        }
        let slot = slot as usize;
        let index = if self.range.1 >= self.range.0 {
            slot
        } else {
            self.keys.len() - 1 - slot
        };
        let band = self.band_at(index);
        if pixel > band.end() {
            return None;
        }
        self.keys.get_index(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_slots_with_padding() {
        let scale = BandScale::new(["A", "B"], (0.0, 100.0), 0.25).unwrap();
        assert_eq!(scale.bandwidth(), 37.5);
        assert_eq!(scale.band("A"), Some(Band { start: 0.0, width: 37.5 }));
        assert_eq!(scale.band("B"), Some(Band { start: 50.0, width: 37.5 }));
    }

    #[test]
    fn test_preserves_input_order() {
        let scale = BandScale::new(["zeta", "alpha", "mu"], (0.0, 300.0), 0.0).unwrap();
        let keys: Vec<&str> = scale.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mu"]);
        assert_eq!(scale.position("alpha"), Some(100.0));
    }

    #[test]
    fn test_duplicates_keep_first_slot() {
        let scale = BandScale::new(["a", "b", "a"], (0.0, 100.0), 0.0).unwrap();
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.position("a"), Some(0.0));
        assert_eq!(scale.position("b"), Some(50.0));
    }

    #[test]
    fn test_absent_key() {
        let scale = BandScale::new(["a"], (0.0, 100.0), 0.1).unwrap();
        assert_eq!(scale.band("missing"), None);
        assert_eq!(scale.center("missing"), None);
    }

    #[test]
    fn test_invalid_padding() {
        assert_eq!(
            BandScale::new(["a"], (0.0, 1.0), 1.0).unwrap_err(),
            ScaleError::InvalidPadding(1.0)
        );
        assert!(BandScale::new(["a"], (0.0, 1.0), -0.1).is_err());
        assert!(BandScale::new(["a"], (0.0, 1.0), f64::NAN).is_err());
    }

    #[test]
    fn test_descending_range() {
        let scale = BandScale::new(["a", "b"], (100.0, 0.0), 0.0).unwrap();
        assert_eq!(scale.position("a"), Some(50.0));
        assert_eq!(scale.position("b"), Some(0.0));
        assert_eq!(scale.invert(75.0), Some("a"));
        assert_eq!(scale.invert(10.0), Some("b"));
    }

    #[test]
    fn test_invert() {
        let scale = BandScale::new(["A", "B"], (0.0, 100.0), 0.25).unwrap();
        assert_eq!(scale.invert(10.0), Some("A"));
        assert_eq!(scale.invert(45.0), None); // gap
        assert_eq!(scale.invert(60.0), Some("B"));
        assert_eq!(scale.invert(-1.0), None);
        assert_eq!(scale.invert(101.0), None);
    }

    #[test]
    fn test_empty_scale() {
        let scale = BandScale::new(Vec::<String>::new(), (0.0, 100.0), 0.1).unwrap();
        assert!(scale.is_empty());
        assert_eq!(scale.step(), 0.0);
        assert_eq!(scale.invert(5.0), None);
    }

    #[test]
    fn test_center() {
        let scale = BandScale::new(["A", "B"], (0.0, 100.0), 0.25).unwrap();
        assert_eq!(scale.center("B"), Some(68.75));
    }
}
