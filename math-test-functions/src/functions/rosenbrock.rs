//! Rosenbrock test function

use ndarray::Array1;

/// Rosenbrock function - N-dimensional
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-2.048, 2.048]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.iter()
        .zip(x.iter().skip(1))
        .map(|(&xi, &xi_plus_1)| 100.0 * (xi_plus_1 - xi.powi(2)).powi(2) + (1.0 - xi).powi(2))
        .sum()
}
