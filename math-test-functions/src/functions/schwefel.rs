//! Schwefel test function

use ndarray::Array1;

/// Schwefel function - N-dimensional, deceptive
/// Global minimum: f(x) = 0 at x = (420.9687, ..., 420.9687)
/// Bounds: x_i in [-500, 500]
pub fn schwefel(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    418.982_887_272_433_9 * n - x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}
