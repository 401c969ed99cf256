//! Spider population state: positions, personal memory, energy and stagnation.

use ndarray::{Array1, Array2};

/// Energy gained by a spider that improves its personal best.
pub const ENERGY_GAIN: f64 = 0.1;
/// Multiplicative energy decay for a spider that does not improve.
pub const ENERGY_DECAY: f64 = 0.95;
/// Below this energy a spider rests (conservative blend, then full energy).
pub const LOW_ENERGY_THRESHOLD: f64 = 0.2;
/// Stagnation count above which exploration becomes an aggressive somersault.
pub const STAGNATION_THRESHOLD: usize = 5;

/// One search agent.
#[derive(Debug, Clone)]
pub struct Spider {
    /// Current position.
    pub position: Array1<f64>,
    /// Best position this spider has evaluated.
    pub personal_best_position: Array1<f64>,
    /// Fitness at `personal_best_position`; `+inf` before the first evaluation.
    pub personal_best_fitness: f64,
    /// Adaptive energy in `[0, 1]`.
    pub energy: f64,
    /// Consecutive non-improving evaluations.
    pub stagnation_counter: usize,
}

impl Spider {
    /// A fresh spider at `position` with full energy and no memory.
    pub fn new(position: Array1<f64>) -> Self {
        Self {
            personal_best_position: position.clone(),
            position,
            personal_best_fitness: f64::INFINITY,
            energy: 1.0,
            stagnation_counter: 0,
        }
    }

    /// Updates memory, energy and stagnation after evaluating `position`.
    ///
    /// Returns `true` if the personal best improved (strictly).
    pub fn track(&mut self, fitness: f64) -> bool {
        if fitness < self.personal_best_fitness {
            self.personal_best_fitness = fitness;
            self.personal_best_position.assign(&self.position);
            self.stagnation_counter = 0;
            self.energy = (self.energy + ENERGY_GAIN).min(1.0);
            true
        } else {
            self.stagnation_counter += 1;
            self.energy *= ENERGY_DECAY;
            false
        }
    }

    /// `true` when the spider is too tired to keep its current movement.
    pub fn is_exhausted(&self) -> bool {
        self.energy < LOW_ENERGY_THRESHOLD
    }

    /// `true` when the spider has been stuck long enough to jump elsewhere.
    pub fn is_stagnating(&self) -> bool {
        self.stagnation_counter > STAGNATION_THRESHOLD
    }
}

/// Best position and fitness found so far across the whole run.
#[derive(Debug, Clone)]
pub struct GlobalBest {
    /// Best position.
    pub x: Array1<f64>,
    /// Best fitness; `+inf` before the first evaluation.
    pub fun: f64,
}

impl GlobalBest {
    /// An empty incumbent at the origin with `+inf` fitness.
    pub fn new(dim: usize) -> Self {
        Self {
            x: Array1::zeros(dim),
            fun: f64::INFINITY,
        }
    }

    /// Replaces the incumbent if `fun` is strictly better. Returns `true` on update.
    pub fn offer(&mut self, x: &Array1<f64>, fun: f64) -> bool {
        if fun < self.fun {
            self.fun = fun;
            self.x.assign(x);
            true
        } else {
            false
        }
    }
}

/// Ordered set of spiders. Order decides which spider is evaluated and moved first.
#[derive(Debug, Clone)]
pub struct Population {
    spiders: Vec<Spider>,
}

impl Population {
    /// One spider per row of `positions`.
    pub fn from_positions(positions: &Array2<f64>) -> Self {
        let spiders = positions
            .rows()
            .into_iter()
            .map(|row| Spider::new(row.to_owned()))
            .collect();
        Self { spiders }
    }

    /// Number of spiders.
    pub fn len(&self) -> usize {
        self.spiders.len()
    }

    /// `true` if there are no spiders.
    pub fn is_empty(&self) -> bool {
        self.spiders.is_empty()
    }

    /// Spiders in processing order.
    pub fn spiders(&self) -> &[Spider] {
        &self.spiders
    }

    /// Mutable spiders in processing order.
    pub fn spiders_mut(&mut self) -> &mut [Spider] {
        &mut self.spiders
    }

    /// Current positions as an `npop x dim` matrix.
    pub fn positions(&self) -> Array2<f64> {
        let dim = self.spiders.first().map_or(0, |s| s.position.len());
        Array2::from_shape_fn((self.spiders.len(), dim), |(i, j)| self.spiders[i].position[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_first_evaluation_always_improves() {
        let mut s = Spider::new(array![1.0, 2.0]);
        assert!(s.track(5.0));
        assert_eq!(s.personal_best_fitness, 5.0);
        assert_eq!(s.stagnation_counter, 0);
        assert_eq!(s.energy, 1.0);
    }

    #[test]
    fn test_energy_decay_and_gain() {
        let mut s = Spider::new(array![0.0]);
        s.track(1.0);
        assert!(!s.track(1.0)); // tie does not improve
        assert_eq!(s.stagnation_counter, 1);
        assert_relative_eq!(s.energy, 0.95);
        s.track(2.0);
        assert_relative_eq!(s.energy, 0.95 * 0.95);

        // 0.9025 + 0.1 is capped
        s.position = array![0.5];
        assert!(s.track(0.5));
        assert_eq!(s.energy, 1.0);
        assert_eq!(s.stagnation_counter, 0);
        assert_eq!(s.personal_best_position, array![0.5]);
    }

    #[test]
    fn test_energy_gain_below_cap() {
        let mut s = Spider::new(array![0.0]);
        s.track(1.0);
        for _ in 0..3 {
            s.track(1.0);
        }
        let tired = s.energy;
        assert_relative_eq!(tired, 0.95_f64.powi(3));
        assert!(tired + 0.1 < 1.0);

        assert!(s.track(0.5));
        assert_relative_eq!(s.energy, tired + 0.1);
    }

    #[test]
    fn test_exhaustion_after_repeated_failures() {
        let mut s = Spider::new(array![0.0]);
        s.track(0.0);
        let mut n = 0;
        while !s.is_exhausted() {
            s.track(1.0);
            n += 1;
        }
        // 0.95^32 ~ 0.194
        assert_eq!(n, 32);
        assert!(s.is_stagnating());
    }

    #[test]
    fn test_nan_never_improves() {
        let mut s = Spider::new(array![0.0]);
        assert!(!s.track(f64::NAN));
        assert!(s.personal_best_fitness.is_infinite());

        let mut best = GlobalBest::new(1);
        assert!(!best.offer(&array![1.0], f64::NAN));
        assert!(best.offer(&array![1.0], 3.0));
        assert!(!best.offer(&array![2.0], 3.0));
        assert_eq!(best.x, array![1.0]);
    }

    #[test]
    fn test_population_from_positions() {
        let pop = Population::from_positions(&array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.spiders()[1].position, array![3.0, 4.0]);
        assert_eq!(pop.positions(), array![[1.0, 2.0], [3.0, 4.0]]);
        assert!(pop.spiders().iter().all(|s| s.energy == 1.0));
    }
}
