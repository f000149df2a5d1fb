//! Rounding and tolerance-based comparison of scores.

/// Default absolute tolerance used by [`nearly_equal`] callers.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Rounds `value` to `decimals` decimal places, resolving ties to the even neighbour.
///
/// Scores stored on individuals are rounded so that floating-point noise does not
/// create artificial orderings between individuals that behave identically.
///
/// # Examples
///
/// ```
/// use coevo_stats::numeric::round_to_decimals;
///
/// assert_eq!(round_to_decimals(2.5, 0), 2.0);
/// assert_eq!(round_to_decimals(3.5, 0), 4.0);
/// assert_eq!(round_to_decimals(0.666_666, 4), 0.6667);
/// ```
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u8) -> f64 {
    let scale = 10_f64.powi(i32::from(decimals));
    (value * scale).round_ties_even() / scale
}

/// Returns `true` if `a` and `b` differ by no more than `tolerance`.
///
/// # Examples
///
/// ```
/// use coevo_stats::numeric::nearly_equal;
///
/// assert!(nearly_equal(0.1 + 0.2, 0.3, 1e-9));
/// assert!(!nearly_equal(0.1, 0.2, 1e-9));
/// ```
#[must_use]
pub fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns `true` if `a` exceeds `b` by more than `tolerance`.
#[must_use]
pub fn strictly_greater(a: f64, b: f64, tolerance: f64) -> bool {
    a > b && !nearly_equal(a, b, tolerance)
}
