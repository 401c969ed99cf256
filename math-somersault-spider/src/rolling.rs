use ndarray::Array1;
use rand::Rng;
use std::f64::consts::PI;

use crate::bounds::Bounds;

/// Fraction of the bound span used as the full rolling radius.
const ROLL_SCALE: f64 = 0.05;

/// Rolling: an undirected local perturbation of radius
/// `radius_factor * span_j * 0.05` along a random angle, clipped into the box.
pub(crate) fn rolling<R: Rng + ?Sized>(
    current: &Array1<f64>,
    radius_factor: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> Array1<f64> {
    let mut next = current.clone();
    for j in 0..current.len() {
        let radius = radius_factor * bounds.span(j) * ROLL_SCALE;
        let angle = 2.0 * PI * rng.random::<f64>();
        next[j] = bounds.clamp_component(j, current[j] + radius * angle.cos());
    }
    next
}
