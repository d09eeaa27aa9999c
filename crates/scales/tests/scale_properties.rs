//! Property tests for scale invariants

use proptest::prelude::*;
use scales::{make_band_scale, ContinuousOptions, ContinuousScale};

proptest! {
    #[test]
    fn continuous_endpoints_and_round_trip(
        a in -1.0e6f64..1.0e6,
        width in 1.0e-3f64..1.0e6,
        length in 1.0f64..5000.0,
        t in 0.0f64..=1.0,
    ) {
        let b = a + width;
        let scale = ContinuousScale::linear((a, b), (0.0, length)).unwrap();
        prop_assert!((scale.map(a) - 0.0).abs() < 1e-6);
        prop_assert!((scale.map(b) - length).abs() < 1e-6 * length);

        let x = a + t * width;
        let back = scale.invert(scale.map(x));
        prop_assert!((back - x).abs() <= 1e-6 * (1.0 + x.abs()));
    }

    #[test]
    fn sqrt_round_trip(
        max in 1.0f64..1.0e6,
        length in 1.0f64..500.0,
        t in 0.0f64..=1.0,
    ) {
        let scale = ContinuousScale::sqrt((0.0, max), (0.0, length)).unwrap();
        let x = t * max;
        let back = scale.invert(scale.map(x));
        prop_assert!((back - x).abs() <= 1e-6 * (1.0 + x));
    }

    #[test]
    fn nice_domain_contains_original(
        a in -1.0e4f64..1.0e4,
        width in 1.0e-2f64..1.0e4,
        count in 1usize..20,
    ) {
        let b = a + width;
        let options = ContinuousOptions::nice().with_tick_count(count);
        let scale = scales::make_continuous_scale((a, b), (0.0, 100.0), &options).unwrap();
        let (lo, hi) = scale.domain();
        prop_assert!(lo <= a + 1e-9 * (1.0 + a.abs()));
        prop_assert!(hi >= b - 1e-9 * (1.0 + b.abs()));
    }

    #[test]
    fn band_slots_fill_range(
        count in 1usize..60,
        length in 1.0f64..5000.0,
        padding in 0.0f64..0.95,
    ) {
        let keys: Vec<String> = (0..count).map(|i| format!("k{i}")).collect();
        let scale = make_band_scale(keys.iter().cloned(), (0.0, length), padding).unwrap();

        let total: f64 = keys
            .iter()
            .map(|k| scale.band(k).unwrap().width + scale.gap())
            .sum();
        prop_assert!((total - length).abs() < 1e-6 * length);

        let first = scale.band(&keys[0]).unwrap().width;
        for key in &keys {
            prop_assert!((scale.band(key).unwrap().width - first).abs() < 1e-9);
        }
    }
}
