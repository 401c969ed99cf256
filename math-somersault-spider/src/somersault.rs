use ndarray::Array1;
use rand::Rng;
use std::f64::consts::PI;

use crate::bounds::Bounds;

/// Fraction of the bound span scaled by the rotation term.
const ROTATION_SCALE: f64 = 0.1;

/// Somersault: a random rotational offset plus a partial jump toward `target`.
///
/// Per dimension: `angle ~ U[0, 2pi)`, `translation ~ U[0.5, 1)`,
/// `x_j + intensity * sin(angle) * span_j * 0.1 + translation * (target_j - x_j)`,
/// clipped into the box.
pub(crate) fn somersault<R: Rng + ?Sized>(
    current: &Array1<f64>,
    target: &Array1<f64>,
    intensity: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> Array1<f64> {
    let mut next = current.clone();
    for j in 0..current.len() {
        let angle = 2.0 * PI * rng.random::<f64>();
        let rotation = intensity * angle.sin();
        let translation = 0.5 + 0.5 * rng.random::<f64>();

        let moved = current[j]
            + rotation * bounds.span(j) * ROTATION_SCALE
            + translation * (target[j] - current[j]);
        next[j] = bounds.clamp_component(j, moved);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_intensity_moves_between_current_and_target() {
        let bounds = Bounds::new(-10.0, 10.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let current = array![-4.0, 8.0];
        let target = array![4.0, 0.0];
        for _ in 0..100 {
            let next = somersault(&current, &target, 0.0, &bounds, &mut rng);
            // translation in [0.5, 1): at least halfway, never past the target
            assert!(next[0] >= 0.0 && next[0] <= 4.0, "x0 = {}", next[0]);
            assert!(next[1] > 0.0 && next[1] <= 4.0, "x1 = {}", next[1]);
        }
    }

    #[test]
    fn test_rotation_bounded_by_intensity() {
        let bounds = Bounds::new(0.0, 100.0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let at = array![50.0, 50.0, 50.0];
        for _ in 0..100 {
            // target == current, so only the rotation term moves the spider
            let next = somersault(&at, &at, 0.6, &bounds, &mut rng);
            for &v in next.iter() {
                assert!((v - 50.0).abs() <= 0.6 * 100.0 * 0.1 + 1e-12);
            }
        }
    }

    #[test]
    fn test_result_clipped() {
        let bounds = Bounds::new(-1.0, 1.0, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let corner = array![1.0, -1.0, 1.0, -1.0];
        for _ in 0..200 {
            let next = somersault(&corner, &corner, 0.8, &bounds, &mut rng);
            assert!(bounds.contains(&next));
        }
    }
}
