//! Tick generation and "nice" step selection
//!
//! Steps are always 1, 2 or 5 times a power of ten. Steps below one are
//! carried as a negative reciprocal (`-10` means `0.1`) so that tick values
//! are produced by division and land exactly on round decimals.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick span `[i1, i2]` plus the increment encoding described above.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    i1: f64,
    i2: f64,
    inc: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10_f64.powf(-power) / factor;
        i1 = (start * scaled).round();
        i2 = (stop * scaled).round();
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10_f64.powf(power) * factor;
        i1 = (start / scaled).round();
        i2 = (stop / scaled).round();
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    TickSpec { i1, i2, inc }
}

/// Signed tick increment for `[start, stop]` split into roughly `count` steps.
///
/// Positive results are the step itself; negative results are the negated
/// reciprocal of a sub-unit step. Returns `0.0` (or a non-finite value) when
/// no step exists, e.g. for an empty span.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).inc
}

/// Absolute distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

/// Roughly `count` round values spanning `[start, stop]`, in the direction of the input.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(spec.i2 >= spec.i1) || !spec.inc.is_finite() {
        return Vec::new();
    }

    let n = (spec.i2 - spec.i1) as usize + 1;
    let value = |i: f64| {
        if spec.inc < 0.0 {
            i / -spec.inc
        } else {
            i * spec.inc
        }
    };
    (0..n)
        .map(|i| {
            if reverse {
                value(spec.i2 - i as f64)
            } else {
                value(spec.i1 + i as f64)
            }
        })
        .collect()
}

/// Expand `[start, stop]` outward to the nearest round tick step.
///
/// The step is recomputed against the widened bounds until it stops changing,
/// bounded to ten rounds. Descending input stays descending.
pub fn nice_bounds(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop || count == 0 {
        return (start, stop);
    }

    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }

    if reverse {
        (hi, lo)
    } else {
        (lo, hi)
    }
}
