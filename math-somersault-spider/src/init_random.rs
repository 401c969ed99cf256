use ndarray::Array2;
use rand::Rng;

use crate::bounds::Bounds;

/// Uniform random population: row `i` is spider `i`, each coordinate drawn
/// independently in `[lower_j, upper_j]`.
pub(crate) fn init_random<R: Rng + ?Sized>(
    npop: usize,
    bounds: &Bounds,
    rng: &mut R,
) -> Array2<f64> {
    let n = bounds.dim();
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            let u: f64 = rng.random::<f64>();
            pop[(i, j)] = bounds.lower()[j] + u * bounds.span(j);
        }
    }
    pop
}
