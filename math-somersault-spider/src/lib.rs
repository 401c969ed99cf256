//! Somersaulting Spider Optimizer (SSO).
//!
//! A population-based stochastic minimizer for box-constrained continuous
//! problems that only needs point evaluations of the objective. Each spider
//! carries an energy level and a stagnation counter; together with an
//! exploration factor that decays over the run they decide whether the spider
//! somersaults (explores) or rolls / steps toward the global best (exploits).
//!
//! # Example
//!
//! ```rust
//! use math_audio_somersault_spider::{NamedObjective, SSOConfigBuilder, somersault_spider};
//! use ndarray::Array1;
//!
//! let sphere = NamedObjective::new("sphere", |x: &Array1<f64>| x.dot(x));
//! let config = SSOConfigBuilder::new()
//!     .popsize(20)
//!     .maxiter(200)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let report = somersault_spider(&sphere, -10.0, 10.0, 2, config)
//!     .expect("optimization should succeed");
//!
//! assert!(report.fun < 1.0);
//! assert_eq!(report.convergence.len(), 200);
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{Result, SSOError};

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Box constraints and their normalization from scalar or per-dimension input.
pub mod bounds;
/// Uniform random population initialization.
pub mod init_random;
/// Objective trait and closure adapters.
pub mod objective;
/// Spider state, population and global best.
pub mod population;

/// Behavior scheduler: adaptive factors and the movement decision tree.
pub mod behavior;
/// Traditional guided update toward the global best.
pub mod guided_update;
/// Conservative blend applied by exhausted spiders.
pub mod low_energy_blend;
/// Rolling movement for local exploitation.
pub mod rolling;
/// Somersault movement for exploration.
pub mod somersault;

/// Registry of standard benchmark functions.
pub mod function_registry;
/// Per-evaluation recording to CSV.
pub mod recorder;
/// Recorded optimization wrapper.
pub mod run_recorded;
/// JSON run configuration for the command-line runner.
pub mod run_config;
/// Convenience entry point.
pub mod somersault_spider;

/// Algorithm-level tests.
#[cfg(test)]
mod sso_tests;

pub use behavior::{AdaptiveFactors, Behavior, SomersaultKind};
pub use bounds::{BoundSpec, Bounds};
pub use objective::{FallibleObjective, NamedObjective, Objective, ObjectiveError};
pub use population::{GlobalBest, Population, Spider};
pub use recorder::OptimizationRecorder;
pub use run_recorded::run_recorded_somersault_spider;
pub use somersault_spider::somersault_spider;

use behavior::move_spider;
use init_random::init_random;

/// Identifier written into every report.
pub const ALGORITHM_NAME: &str = "SSO";

/// Timestamp format used in reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Observe-only callback invoked after every iteration.
pub type CallbackFn = Box<dyn FnMut(&SSOIntermediate)>;

/// Configuration for the Somersaulting Spider Optimizer.
///
/// The movement coefficients are fixed constants of the algorithm; only the
/// run budget, seeding and reporting are configurable.
pub struct SSOConfig {
    /// Number of iterations; the loop always runs all of them.
    pub maxiter: usize,
    /// Number of spiders (search agents).
    pub popsize: usize,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Log the best fitness every `progress_every` iterations.
    pub disp: bool,
    /// Progress interval in iterations.
    pub progress_every: usize,
    /// Abort with `SSOError::NonFiniteFitness` on NaN or infinite fitness.
    pub reject_non_finite: bool,
    /// Optional per-iteration callback.
    pub callback: Option<CallbackFn>,
}

impl Default for SSOConfig {
    fn default() -> Self {
        Self {
            maxiter: 500,
            popsize: 30,
            seed: None,
            disp: false,
            progress_every: 10,
            reject_non_finite: false,
            callback: None,
        }
    }
}

impl SSOConfig {
    /// Checks the run budget and reporting interval.
    ///
    /// # Errors
    ///
    /// `EmptyPopulation`, `NoIterations` or `InvalidProgressInterval`.
    pub fn validate(&self) -> Result<()> {
        if self.popsize == 0 {
            return Err(SSOError::EmptyPopulation);
        }
        if self.maxiter == 0 {
            return Err(SSOError::NoIterations);
        }
        if self.progress_every == 0 {
            return Err(SSOError::InvalidProgressInterval);
        }
        Ok(())
    }
}

/// Fluent builder for `SSOConfig`.
///
/// # Example
///
/// ```rust
/// use math_audio_somersault_spider::SSOConfigBuilder;
///
/// let config = SSOConfigBuilder::new()
///     .maxiter(100)
///     .popsize(25)
///     .seed(7)
///     .disp(true)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.popsize, 25);
/// ```
pub struct SSOConfigBuilder {
    cfg: SSOConfig,
}

impl Default for SSOConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SSOConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: SSOConfig::default(),
        }
    }
    /// Sets the number of iterations.
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    /// Sets the number of spiders.
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Enables/disables progress logging.
    pub fn disp(mut self, v: bool) -> Self {
        self.cfg.disp = v;
        self
    }
    /// Sets the progress interval.
    pub fn progress_every(mut self, v: usize) -> Self {
        self.cfg.progress_every = v;
        self
    }
    /// Treats NaN and infinite fitness values as fatal.
    pub fn reject_non_finite(mut self, v: bool) -> Self {
        self.cfg.reject_non_finite = v;
        self
    }
    /// Sets a per-iteration callback.
    pub fn callback(mut self, cb: CallbackFn) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// See [`SSOConfig::validate`].
    pub fn build(self) -> Result<SSOConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Snapshot passed to the callback after each iteration.
pub struct SSOIntermediate {
    /// 0-indexed iteration that just finished.
    pub iter: usize,
    /// Current best position.
    pub x: Array1<f64>,
    /// Current best fitness.
    pub fun: f64,
    /// Spider positions after the movement phase (`npop x dim`).
    pub positions: Array2<f64>,
    /// Spider energies after the movement phase.
    pub energies: Array1<f64>,
}

impl SSOIntermediate {
    /// Average spider energy.
    pub fn mean_energy(&self) -> f64 {
        self.energies.mean().unwrap_or(0.0)
    }
}

/// How often each movement was used during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BehaviorCounts {
    /// Somersaults toward a random point.
    pub aggressive_somersaults: usize,
    /// Somersaults toward the global best.
    pub directed_somersaults: usize,
    /// Rolling moves.
    pub rolls: usize,
    /// Guided updates toward the global best.
    pub guided_updates: usize,
    /// Low-energy rests.
    pub rests: usize,
}

impl BehaviorCounts {
    fn record(&mut self, mv: behavior::Move) {
        match mv.behavior {
            Behavior::Somersault(SomersaultKind::Aggressive) => self.aggressive_somersaults += 1,
            Behavior::Somersault(SomersaultKind::Directed) => self.directed_somersaults += 1,
            Behavior::Rolling => self.rolls += 1,
            Behavior::GuidedTraditional => self.guided_updates += 1,
        }
        if mv.rested {
            self.rests += 1;
        }
    }

    /// Total number of moves.
    pub fn total(&self) -> usize {
        self.aggressive_somersaults + self.directed_somersaults + self.rolls + self.guided_updates
    }
}

/// Result of a completed run.
#[derive(Clone)]
pub struct SSOReport {
    /// Algorithm identifier (`"SSO"`).
    pub optimizer: String,
    /// Display name of the objective.
    pub objective_name: String,
    /// Wall-clock start of the run.
    pub start_time: DateTime<Local>,
    /// Wall-clock end of the run.
    pub end_time: DateTime<Local>,
    /// Elapsed time.
    pub execution_time: Duration,
    /// Best fitness after each iteration's evaluation phase.
    pub convergence: Array1<f64>,
    /// Best position found.
    pub x: Array1<f64>,
    /// Best fitness found.
    pub fun: f64,
    /// Iterations performed.
    pub nit: usize,
    /// Objective evaluations performed.
    pub nfev: usize,
    /// Movement statistics.
    pub behavior_counts: BehaviorCounts,
}

impl SSOReport {
    /// Start timestamp as `YYYY-MM-DD-HH-MM-SS`.
    pub fn start_time_string(&self) -> String {
        self.start_time.format(TIMESTAMP_FORMAT).to_string()
    }

    /// End timestamp as `YYYY-MM-DD-HH-MM-SS`.
    pub fn end_time_string(&self) -> String {
        self.end_time.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The report as a JSON document.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "optimizer": self.optimizer,
            "objfname": self.objective_name,
            "startTime": self.start_time_string(),
            "endTime": self.end_time_string(),
            "executionTime": self.execution_time.as_secs_f64(),
            "convergence": self.convergence.to_vec(),
            "bestIndividual": self.x.to_vec(),
            "best": self.fun,
            "nit": self.nit,
            "nfev": self.nfev,
            "behaviors": self.behavior_counts,
        })
    }
}

impl fmt::Debug for SSOReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SSOReport")
            .field("optimizer", &self.optimizer)
            .field("objective_name", &self.objective_name)
            .field("start_time", &self.start_time_string())
            .field("execution_time", &self.execution_time)
            .field("convergence", &format!("len={}", self.convergence.len()))
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .finish()
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Population and global best are being set up.
    Initializing,
    /// Main loop.
    Iterating,
    /// Assembling the report.
    Finalizing,
    /// Terminal.
    Done,
}

/// Somersaulting Spider Optimizer.
///
/// Use [`SomersaultSpider::new`] to create an instance, configure with
/// [`config_mut`](Self::config_mut), then call [`solve`](Self::solve).
pub struct SomersaultSpider<'a, O>
where
    O: Objective + ?Sized,
{
    objective: &'a O,
    bounds: Bounds,
    config: SSOConfig,
    phase: RunPhase,
}

impl<'a, O> SomersaultSpider<'a, O>
where
    O: Objective + ?Sized,
{
    /// Creates an optimizer for `objective` over `bounds` with the default configuration.
    pub fn new(objective: &'a O, bounds: Bounds) -> Self {
        Self {
            objective,
            bounds,
            config: SSOConfig::default(),
            phase: RunPhase::Initializing,
        }
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut SSOConfig {
        &mut self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn enter(&mut self, phase: RunPhase) {
        log::debug!("SSO phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Clamps, evaluates and tracks every spider in population order.
    ///
    /// The global best is updated as soon as a spider beats it, so spiders
    /// later in the same pass, and every spider's movement afterwards, see it.
    fn evaluate_population(
        &self,
        iteration: usize,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<usize> {
        for (agent, spider) in population.spiders_mut().iter_mut().enumerate() {
            self.bounds.clamp(&mut spider.position);

            let fitness = self
                .objective
                .evaluate(&spider.position)
                .map_err(|source| SSOError::Objective {
                    iteration,
                    agent,
                    source,
                })?;
            if self.config.reject_non_finite && !fitness.is_finite() {
                return Err(SSOError::NonFiniteFitness {
                    iteration,
                    agent,
                    value: fitness,
                });
            }

            spider.track(fitness);
            if best.offer(&spider.position, fitness) {
                log::trace!(
                    "iter {} agent {} improved global best to {:.6e}",
                    iteration,
                    agent,
                    fitness
                );
            }
        }
        Ok(population.len())
    }

    /// Run the optimization and return a report.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`SSOConfig::validate`], and any objective
    /// failure, which ends the run immediately.
    pub fn solve(&mut self) -> Result<SSOReport> {
        self.enter(RunPhase::Initializing);
        self.config.validate()?;

        let dim = self.bounds.dim();
        let npop = self.config.popsize;
        let maxiter = self.config.maxiter;

        let mut rng: StdRng = match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        log::info!("SSO is optimizing \"{}\"", self.objective.name());
        log::debug!(
            "SSO init: {} dimensions, population={}, maxiter={}",
            dim,
            npop,
            maxiter
        );
        let start_time = Local::now();
        let timer = Instant::now();

        let mut population = Population::from_positions(&init_random(npop, &self.bounds, &mut rng));
        let mut best = GlobalBest::new(dim);
        let mut convergence = Array1::<f64>::zeros(maxiter);
        let mut behavior_counts = BehaviorCounts::default();
        let mut nfev = 0usize;

        self.enter(RunPhase::Iterating);
        for t in 0..maxiter {
            let factors = AdaptiveFactors::at(t, maxiter);

            nfev += self.evaluate_population(t, &mut population, &mut best)?;

            for spider in population.spiders_mut() {
                let mv = move_spider(spider, &best, &self.bounds, &factors, &mut rng);
                behavior_counts.record(mv);
            }

            convergence[t] = best.fun;

            if self.config.disp && t % self.config.progress_every == 0 {
                log::info!("At iteration {} the best fitness is {}", t, best.fun);
            }

            if let Some(ref mut cb) = self.config.callback {
                let intermediate = SSOIntermediate {
                    iter: t,
                    x: best.x.clone(),
                    fun: best.fun,
                    positions: population.positions(),
                    energies: population.spiders().iter().map(|s| s.energy).collect(),
                };
                cb(&intermediate);
            }
        }

        self.enter(RunPhase::Finalizing);
        let report = SSOReport {
            optimizer: ALGORITHM_NAME.to_string(),
            objective_name: self.objective.name().to_string(),
            start_time,
            end_time: Local::now(),
            execution_time: timer.elapsed(),
            convergence,
            x: best.x,
            fun: best.fun,
            nit: maxiter,
            nfev,
            behavior_counts,
        };
        log::debug!(
            "SSO finished: best={:.6e} after {} evaluations in {:.3?}",
            report.fun,
            report.nfev,
            report.execution_time
        );
        self.enter(RunPhase::Done);

        Ok(report)
    }
}
