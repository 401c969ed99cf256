//! Sphere test function

use ndarray::Array1;

/// Sphere function - N-dimensional, convex
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5, 5]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi.powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sphere_values() {
        assert_eq!(sphere(&array![0.0, 0.0, 0.0]), 0.0);
        assert_eq!(sphere(&array![3.0, 4.0]), 25.0);
        assert_eq!(sphere(&array![-2.0]), 4.0);
    }
}
