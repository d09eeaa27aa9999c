//! Pointer resolution
//!
//! Maps a pointer position on an ordered axis back to the nearest record by
//! bisection. Keys are compared through their position on the axis, so dates
//! and numbers resolve the same way.

use crate::error::{InteractionError, InteractionResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use perf::PerfTimer;
use serde::{Deserialize, Serialize};

/// A key that has a position on a continuous axis
pub trait OrderedKey {
    /// Position of the key on the axis; must be monotonic in the key's order
    fn axis_value(&self) -> f64;
}

macro_rules! impl_ordered_key {
    ($($t:ty),*) => {
        $(
            impl OrderedKey for $t {
                fn axis_value(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_ordered_key!(f64, f32, i32, i64, u32, u64, usize);

impl OrderedKey for NaiveDate {
    /// Days since the common era
    fn axis_value(&self) -> f64 {
        use chrono::Datelike;
        self.num_days_from_ce() as f64
    }
}

impl OrderedKey for NaiveDateTime {
    /// Milliseconds since the Unix epoch, read as UTC
    fn axis_value(&self) -> f64 {
        self.and_utc().timestamp_millis() as f64
    }
}

impl OrderedKey for DateTime<Utc> {
    fn axis_value(&self) -> f64 {
        self.timestamp_millis() as f64
    }
}

impl<K: OrderedKey + ?Sized> OrderedKey for &K {
    fn axis_value(&self) -> f64 {
        (**self).axis_value()
    }
}

/// Which neighbour to pick when the pointer falls between two keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The greatest key at or before the pointer
    #[default]
    Left,
    /// The smallest key at or after the pointer
    Right,
    /// Whichever key is closer; equal distances pick the left key
    Center,
}

/// Index of the key nearest to `pointer` under `tie_break`.
///
/// `keys` must already be sorted ascending; unsorted input gives an
/// unspecified (but in-bounds) index. Pointers before the first key resolve to
/// 0 and after the last key to the last index. Returns `None` for empty keys
/// or a pointer with no axis position.
pub fn resolve_nearest<K: OrderedKey>(keys: &[K], pointer: &K, tie_break: TieBreak) -> Option<usize> {
    debug_assert!(
        keys.windows(2).all(|w| w[0].axis_value() <= w[1].axis_value()),
        "resolve_nearest requires keys sorted ascending"
    );
    resolve_value(keys, pointer.axis_value(), tie_break)
}

fn resolve_value<K: OrderedKey>(keys: &[K], value: f64, tie_break: TieBreak) -> Option<usize> {
    if keys.is_empty() || value.is_nan() {
        return None;
    }

    let i = keys.partition_point(|k| k.axis_value() < value);
    if i == 0 {
        return Some(0);
    }
    if i == keys.len() {
        return Some(keys.len() - 1);
    }

    let right = keys[i].axis_value();
    if right == value {
        return Some(i);
    }

    let index = match tie_break {
        TieBreak::Left => i - 1,
        TieBreak::Right => i,
        TieBreak::Center => {
            let left = keys[i - 1].axis_value();
            if value - left <= right - value {
                i - 1
            } else {
                i
            }
        }
    };
    Some(index)
}

/// Sorted keys of one chart axis, ready for pointer lookups
#[derive(Debug, Clone, PartialEq)]
pub struct PointerResolver<K> {
    keys: Vec<K>,
    tie_break: TieBreak,
}

impl<K: OrderedKey> PointerResolver<K> {
    /// Build a resolver, rejecting non-finite keys and keys that are not sorted ascending.
    ///
    /// Validation is a single linear pass at construction; lookups are
    /// bisections.
    pub fn new(keys: Vec<K>, tie_break: TieBreak) -> InteractionResult<Self> {
        for (index, key) in keys.iter().enumerate() {
            if !key.axis_value().is_finite() {
                return Err(InteractionError::NonFiniteKey { index });
            }
        }
        if let Some(index) = keys
            .windows(2)
            .position(|w| w[0].axis_value() > w[1].axis_value())
        {
            return Err(InteractionError::UnsortedKeys { index: index + 1 });
        }
        Ok(Self { keys, tie_break })
    }

    /// Build a resolver from keys in any order
    pub fn from_unsorted(mut keys: Vec<K>, tie_break: TieBreak) -> InteractionResult<Self> {
        keys.sort_by(|a, b| a.axis_value().total_cmp(&b.axis_value()));
        Self::new(keys, tie_break)
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Index of the key nearest to `pointer`
    pub fn resolve(&self, pointer: &K) -> Option<usize> {
        resolve_value(&self.keys, pointer.axis_value(), self.tie_break)
    }

    /// Key nearest to `pointer`
    pub fn resolve_key(&self, pointer: &K) -> Option<&K> {
        self.resolve(pointer).map(|i| &self.keys[i])
    }

    /// Index of the key nearest to a pixel, mapped back onto the axis by `invert`
    pub fn resolve_pixel<F>(&self, pixel: f64, invert: F) -> Option<usize>
    where
        F: Fn(f64) -> f64,
    {
        let _timer = PerfTimer::pointer("resolve_pixel");
        let value = invert(pixel);
        let index = resolve_value(&self.keys, value, self.tie_break);
        tracing::trace!(pixel, value, ?index, "resolved pointer");
        index
    }
}
