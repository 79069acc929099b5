//! Numeric helpers for the decompaction engine
//!
//! Quadrature used by layer integration, plus the percentage-deviation
//! helpers the tests lean on.
use crate::constants::GAUSS_LEGENDRE_2_NODE;

/// Assert that the percentage deviation between two values is below a threshold
///
/// Computes `deviation(actual, expected)` and panics with both values if it
/// is not strictly less than `max_deviation` (in percent).
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        $crate::assert_deviation!($actual, $expected, $max_deviation, "values differ")
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.4}% >= {:.4}%: {}\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, format_args!($($arg)+), actual_val, expected_val
                );
            }
        }
    };
}

/// Integrate `f` over `[z0, z1]` with the fixed 2-point Gauss-Legendre rule
///
/// Nodes sit at `midpoint ± halflength / sqrt(3)` with unit weights, so the
/// rule is exact for cubics. A reversed interval yields the negated integral
/// and a zero-width interval yields 0.
///
/// # Examples
/// ```
/// use backstrip_rust::math_utils::gauss_legendre_2;
///
/// // exact for cubics
/// let area = gauss_legendre_2(|z| z * z * z, 0.0, 2.0);
/// assert!((area - 4.0).abs() < 1e-12);
///
/// assert_eq!(gauss_legendre_2(|z| z.exp(), 3.0, 3.0), 0.0);
/// ```
pub fn gauss_legendre_2<F>(f: F, z0: f64, z1: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let halflength = 0.5 * (z1 - z0);
    if halflength == 0.0 {
        return 0.0;
    }
    let midpoint = 0.5 * (z0 + z1);
    let offset = halflength * GAUSS_LEGENDRE_2_NODE;

    halflength * (f(midpoint + offset) + f(midpoint - offset))
}

/// Calculate the percentage deviation of `actual` from `expected`
///
/// # Examples
/// ```
/// use backstrip_rust::math_utils::deviation;
///
/// assert_eq!(deviation(105.0, 100.0), 5.0);
/// assert_eq!(deviation(95.0, 100.0), 5.0);
/// ```
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}

/// Running totals of `values`, starting from `start`
///
/// Returns `values.len() + 1` entries: `[start, start + v0, start + v0 + v1, ...]`.
pub fn cumulative_from(start: f64, values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() + 1);
    let mut running = start;
    out.push(running);
    for v in values {
        running += v;
        out.push(running);
    }
    out
}
