use ndarray::Array1;

use crate::bounds::Bounds;

/// Weight kept on the spider's own position when resting.
const KEEP: f64 = 0.9;
/// Weight given to the global best.
const PULL: f64 = 0.1;

/// Conservative blend used by an exhausted spider: `0.9 * x + 0.1 * best`, clipped.
pub(crate) fn low_energy_blend(
    current: &Array1<f64>,
    best: &Array1<f64>,
    bounds: &Bounds,
) -> Array1<f64> {
    let mut next = current.clone();
    for j in 0..current.len() {
        let blended = KEEP * current[j] + PULL * best[j];
        next[j] = bounds.clamp_component(j, blended);
    }
    next
}
