//! Rastrigin test function

use ndarray::Array1;

/// Rastrigin function - N-dimensional, highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    let n = x.len() as f64;
    a * n
        + x.iter()
            .map(|&xi| xi.powi(2) - a * (2.0 * std::f64::consts::PI * xi).cos())
            .sum::<f64>()
}
