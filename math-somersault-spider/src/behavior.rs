//! Behavior scheduling: which movement a spider makes in a given iteration.
//!
//! The choice is a two-level decision tree driven by explicit uniform draws:
//!
//! ```text
//! u < exploration * energy ?
//! ├── yes: stagnation > 5 ? Somersault(Aggressive) : Somersault(Directed)
//! └── no:  v < 0.5 ? Rolling : GuidedTraditional
//! ```
//!
//! After the chosen movement an exhausted spider rests: it blends toward the
//! global best and recovers full energy.

use ndarray::Array1;
use rand::Rng;

use crate::bounds::Bounds;
use crate::guided_update::guided_update;
use crate::low_energy_blend::low_energy_blend;
use crate::population::{GlobalBest, Spider};
use crate::rolling::rolling;
use crate::somersault::somersault;

/// Somersault intensity multiplier when aiming at the global best.
pub const DIRECTED_INTENSITY: f64 = 0.6;
/// Somersault intensity multiplier when jumping to a random point.
pub const AGGRESSIVE_INTENSITY: f64 = 0.8;
/// Probability of rolling rather than a guided update when exploiting.
pub const ROLLING_PROBABILITY: f64 = 0.5;

/// Exploration/exploitation bias for one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveFactors {
    /// `1 - t/T`, decreasing over the run.
    pub exploration: f64,
    /// `t/T`, increasing over the run.
    pub exploitation: f64,
}

impl AdaptiveFactors {
    /// Factors for 0-indexed iteration `t` of `max_iter`.
    pub fn at(t: usize, max_iter: usize) -> Self {
        let ratio = t as f64 / max_iter as f64;
        Self {
            exploration: 1.0 - ratio,
            exploitation: ratio,
        }
    }
}

/// Flavor of an exploratory somersault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SomersaultKind {
    /// Toward a fresh random point, used by stagnating spiders.
    Aggressive,
    /// Toward the global best.
    Directed,
}

/// Movement selected for one spider in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Exploration.
    Somersault(SomersaultKind),
    /// Local undirected perturbation.
    Rolling,
    /// Random step toward the global best with jitter.
    GuidedTraditional,
}

/// Draws the behavior of `spider` for this iteration.
///
/// Consumes one draw on the exploration branch and two on the exploitation branch.
pub fn choose_behavior<R: Rng + ?Sized>(
    spider: &Spider,
    factors: &AdaptiveFactors,
    rng: &mut R,
) -> Behavior {
    let threshold = factors.exploration * spider.energy;
    if rng.random::<f64>() < threshold {
        if spider.is_stagnating() {
            Behavior::Somersault(SomersaultKind::Aggressive)
        } else {
            Behavior::Somersault(SomersaultKind::Directed)
        }
    } else if rng.random::<f64>() < ROLLING_PROBABILITY {
        Behavior::Rolling
    } else {
        Behavior::GuidedTraditional
    }
}

/// Computes the position reached from `current` by `behavior`.
pub fn apply_behavior<R: Rng + ?Sized>(
    behavior: Behavior,
    current: &Array1<f64>,
    best: &GlobalBest,
    bounds: &Bounds,
    factors: &AdaptiveFactors,
    rng: &mut R,
) -> Array1<f64> {
    match behavior {
        Behavior::Somersault(SomersaultKind::Aggressive) => {
            let target = bounds.sample(rng);
            somersault(
                current,
                &target,
                AGGRESSIVE_INTENSITY * factors.exploration,
                bounds,
                rng,
            )
        }
        Behavior::Somersault(SomersaultKind::Directed) => somersault(
            current,
            &best.x,
            DIRECTED_INTENSITY * factors.exploration,
            bounds,
            rng,
        ),
        Behavior::Rolling => rolling(current, factors.exploitation, bounds, rng),
        Behavior::GuidedTraditional => guided_update(current, &best.x, bounds, rng),
    }
}

/// Outcome of moving one spider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Movement that was applied.
    pub behavior: Behavior,
    /// Whether the spider was exhausted and rested afterwards.
    pub rested: bool,
}

/// Chooses and applies a movement for `spider`, then lets it rest if exhausted.
pub fn move_spider<R: Rng + ?Sized>(
    spider: &mut Spider,
    best: &GlobalBest,
    bounds: &Bounds,
    factors: &AdaptiveFactors,
    rng: &mut R,
) -> Move {
    let behavior = choose_behavior(spider, factors, rng);
    spider.position = apply_behavior(behavior, &spider.position, best, bounds, factors, rng);

    let rested = spider.is_exhausted();
    if rested {
        spider.position = low_energy_blend(&spider.position, &best.x, bounds);
        spider.energy = 1.0;
    }
    Move { behavior, rested }
}
