use ndarray::Array1;
use rand::Rng;

use crate::bounds::Bounds;

/// Fraction of the bound span used by the random jitter term.
const JITTER_SCALE: f64 = 0.1;

/// Traditional guided update: a random step toward the global best plus a
/// small symmetric jitter.
///
/// Per dimension, with `r1, r2, w ~ U[0, 1)` drawn in that order:
/// `x_j + r1 * (best_j - x_j) + r2 * (w - 0.5) * span_j * 0.1`, clipped.
pub(crate) fn guided_update<R: Rng + ?Sized>(
    current: &Array1<f64>,
    best: &Array1<f64>,
    bounds: &Bounds,
    rng: &mut R,
) -> Array1<f64> {
    let mut next = current.clone();
    for j in 0..current.len() {
        let r1: f64 = rng.random::<f64>();
        let r2: f64 = rng.random::<f64>();
        let w: f64 = rng.random::<f64>();

        let moved = current[j]
            + r1 * (best[j] - current[j])
            + r2 * (w - 0.5) * bounds.span(j) * JITTER_SCALE;
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
    fn test_step_stays_near_segment() {
        let bounds = Bounds::new(-10.0, 10.0, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let x = array![-6.0];
        let best = array![2.0];
        let jitter = 0.5 * 20.0 * 0.1;
        for _ in 0..200 {
            let next = guided_update(&x, &best, &bounds, &mut rng);
            assert!(next[0] >= -6.0 - jitter && next[0] <= 2.0 + jitter);
        }
    }

    #[test]
    fn test_degenerate_span_collapses_to_bound() {
        let bounds = Bounds::from_pairs(&[(3.0, 3.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let next = guided_update(&array![3.0], &array![3.0], &bounds, &mut rng);
        assert_eq!(next, array![3.0]);
    }
}
