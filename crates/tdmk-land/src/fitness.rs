//! Epsilon-aware fitness comparisons shared by the solver and evaluator.

/// Absolute tolerance under which two fitness values are considered tied.
pub const FITNESS_EPSILON: f64 = 1e-10;

/// Returns true when `a` beats `b` by at least the tolerance.
pub fn better(a: f64, b: f64) -> bool {
    a > b && (a - b).abs() >= FITNESS_EPSILON
}

/// Returns true when `a` and `b` lie within the tolerance of each other.
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < FITNESS_EPSILON
}

/// Returns true when `a` beats or ties `b`.
pub fn better_or_equal(a: f64, b: f64) -> bool {
    a > b || approx_equal(a, b)
}
