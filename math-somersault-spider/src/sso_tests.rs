use crate::population::{GlobalBest, Population};
use crate::{
    Bounds, FallibleObjective, NamedObjective, ObjectiveError, RunPhase, SSOConfigBuilder,
    SSOError, SSOIntermediate, SomersaultSpider, somersault_spider,
};
use math_audio_test_functions::{rastrigin, rosenbrock, sphere};
use ndarray::{Array1, array};
use std::cell::RefCell;
use std::rc::Rc;

fn solver_config(seed: u64, popsize: usize, maxiter: usize) -> crate::SSOConfig {
    SSOConfigBuilder::new()
        .seed(seed)
        .popsize(popsize)
        .maxiter(maxiter)
        .build()
        .expect("valid config")
}

#[cfg(test)]
mod convergence_tests {
    use super::*;

    #[test]
    fn test_sphere_small_population_converges() {
        let obj = NamedObjective::new("sphere", sphere);
        let report = somersault_spider(&obj, -10.0, 10.0, 2, solver_config(42, 5, 200)).unwrap();
        assert!(report.fun < 1.0, "Should converge near origin: f={}", report.fun);
    }

    #[test]
    fn test_sphere_5d_converges() {
        let obj = NamedObjective::new("sphere", sphere);
        let report = somersault_spider(&obj, -10.0, 10.0, 5, solver_config(7, 30, 200)).unwrap();
        assert!(report.fun < 0.5, "Should converge: f={}", report.fun);
        assert_eq!(report.x.len(), 5);
    }

    #[test]
    fn test_rastrigin_2d() {
        let obj = NamedObjective::new("rastrigin", rastrigin);
        let report =
            somersault_spider(&obj, -5.12, 5.12, 2, solver_config(123, 30, 300)).unwrap();
        assert!(report.fun < 1.0, "Should find the basin at the origin: f={}", report.fun);
    }

    #[test]
    fn test_rosenbrock_2d() {
        let obj = NamedObjective::new("rosenbrock", rosenbrock);
        let report = somersault_spider(&obj, -5.0, 10.0, 2, solver_config(99, 30, 300)).unwrap();
        assert!(report.fun < 0.1, "Should reach the valley floor: f={}", report.fun);
    }
}

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn test_phase_reaches_done() {
        let obj = NamedObjective::new("sphere", sphere);
        let mut sso = SomersaultSpider::new(&obj, Bounds::new(-1.0, 1.0, 2).unwrap());
        assert_eq!(sso.phase(), RunPhase::Initializing);
        *sso.config_mut() = solver_config(1, 4, 3);
        sso.solve().unwrap();
        assert_eq!(sso.phase(), RunPhase::Done);
    }

    #[test]
    fn test_budget_is_always_exhausted() {
        let obj = NamedObjective::new("sphere", sphere);
        let report = somersault_spider(&obj, -10.0, 10.0, 3, solver_config(5, 8, 37)).unwrap();
        assert_eq!(report.nit, 37);
        assert_eq!(report.nfev, 8 * 37);
        assert_eq!(report.convergence.len(), 37);
        assert_eq!(report.behavior_counts.total(), 8 * 37);
        assert_eq!(report.optimizer, "SSO");
        assert_eq!(report.objective_name, "sphere");
        assert!(report.end_time >= report.start_time);
    }

    #[test]
    fn test_first_iteration_is_all_directed_somersaults() {
        // Fresh spiders have full energy and the exploration factor starts at 1
        let obj = NamedObjective::new("sphere", sphere);
        let report = somersault_spider(&obj, -10.0, 10.0, 2, solver_config(3, 12, 1)).unwrap();
        let counts = report.behavior_counts;
        assert_eq!(counts.directed_somersaults, 12);
        assert_eq!(counts.aggressive_somersaults + counts.rolls + counts.guided_updates, 0);
        assert_eq!(counts.rests, 0);
    }

    #[test]
    fn test_all_behaviors_used_over_a_long_run() {
        // Flat objective: nobody ever improves after the first pass, so
        // spiders stagnate, tire and rest
        let flat = NamedObjective::new("flat", |_: &Array1<f64>| 1.0);
        let report = somersault_spider(&flat, -1.0, 1.0, 2, solver_config(11, 10, 100)).unwrap();
        let counts = report.behavior_counts;
        assert!(counts.aggressive_somersaults > 0);
        assert!(counts.directed_somersaults > 0);
        assert!(counts.rolls > 0);
        assert!(counts.guided_updates > 0);
        assert!(counts.rests > 0);
        assert_eq!(report.fun, 1.0);
    }

    #[test]
    fn test_config_validated_before_run() {
        let obj = NamedObjective::new("sphere", sphere);
        let mut sso = SomersaultSpider::new(&obj, Bounds::new(-1.0, 1.0, 2).unwrap());
        sso.config_mut().popsize = 0;
        assert!(matches!(sso.solve(), Err(SSOError::EmptyPopulation)));

        sso.config_mut().popsize = 3;
        sso.config_mut().maxiter = 0;
        assert!(matches!(sso.solve(), Err(SSOError::NoIterations)));

        assert!(matches!(
            SSOConfigBuilder::new().progress_every(0).build(),
            Err(SSOError::InvalidProgressInterval)
        ));
    }

    #[test]
    fn test_callback_sees_every_iteration() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let config = SSOConfigBuilder::new()
            .seed(8)
            .popsize(6)
            .maxiter(15)
            .disp(true)
            .callback(Box::new(move |inter: &SSOIntermediate| {
                sink.borrow_mut().push((inter.iter, inter.fun, inter.mean_energy()))
            }))
            .build()
            .unwrap();
        let obj = NamedObjective::new("sphere", sphere);
        let report = somersault_spider(&obj, -3.0, 3.0, 2, config).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 15);
        for (t, (iter, fun, energy)) in seen.iter().enumerate() {
            assert_eq!(*iter, t);
            assert_eq!(*fun, report.convergence[t]);
            assert!(*energy >= 0.2 && *energy <= 1.0);
        }
    }
}

#[cfg(test)]
mod evaluation_tests {
    use super::*;

    #[test]
    fn test_global_best_updates_within_the_pass() {
        let obj = NamedObjective::new("square", |x: &Array1<f64>| x[0] * x[0]);
        let sso = SomersaultSpider::new(&obj, Bounds::new(-5.0, 5.0, 1).unwrap());
        let mut population = Population::from_positions(&array![[3.0], [-1.0], [2.0], [-1.0]]);
        let mut best = GlobalBest::new(1);

        let n = sso.evaluate_population(0, &mut population, &mut best).unwrap();
        assert_eq!(n, 4);
        assert_eq!(best.fun, 1.0);
        assert_eq!(best.x, array![-1.0]);
        for spider in population.spiders() {
            assert_eq!(spider.personal_best_fitness, spider.position[0].powi(2));
        }
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let obj = NamedObjective::new("abs", |x: &Array1<f64>| x[0].abs());
        let sso = SomersaultSpider::new(&obj, Bounds::new(-5.0, 5.0, 1).unwrap());
        let mut population = Population::from_positions(&array![[2.0], [-2.0]]);
        let mut best = GlobalBest::new(1);
        sso.evaluate_population(0, &mut population, &mut best).unwrap();
        assert_eq!(best.x, array![2.0]);
    }

    #[test]
    fn test_positions_clamped_before_evaluation() {
        let calls = RefCell::new(Vec::new());
        let obj = NamedObjective::new("probe", |x: &Array1<f64>| {
            calls.borrow_mut().push(x[0]);
            x[0]
        });
        let sso = SomersaultSpider::new(&obj, Bounds::new(-1.0, 1.0, 1).unwrap());
        let mut population = Population::from_positions(&array![[7.0], [-9.0]]);
        let mut best = GlobalBest::new(1);
        sso.evaluate_population(0, &mut population, &mut best).unwrap();

        assert_eq!(*calls.borrow(), vec![1.0, -1.0]);
        assert_eq!(population.spiders()[0].position, array![1.0]);
    }

    #[test]
    fn test_objective_error_aborts_run() {
        let obj = FallibleObjective::new("fragile", |x: &Array1<f64>| {
            if x[0] > 0.9 {
                Err(ObjectiveError::new("unstable region"))
            } else {
                Ok(x[0])
            }
        });
        let mut sso = SomersaultSpider::new(&obj, Bounds::new(0.95, 1.0, 1).unwrap());
        *sso.config_mut() = solver_config(4, 3, 10);

        match sso.solve() {
            Err(SSOError::Objective {
                iteration, agent, ..
            }) => {
                assert_eq!(iteration, 0);
                assert_eq!(agent, 0);
            }
            other => panic!("expected objective failure, got {:?}", other),
        }
        assert_eq!(sso.phase(), RunPhase::Iterating);
    }

    #[test]
    fn test_non_finite_fitness_is_permissive_by_default() {
        let obj = NamedObjective::new("nan", |_: &Array1<f64>| f64::NAN);
        let report = somersault_spider(&obj, -1.0, 1.0, 2, solver_config(2, 4, 5)).unwrap();
        assert!(report.fun.is_infinite());
        assert!(report.convergence.iter().all(|v| v.is_infinite()));
        assert_eq!(report.x, Array1::<f64>::zeros(2));
    }

    #[test]
    fn test_non_finite_fitness_rejected_when_strict() {
        let obj = NamedObjective::new("pole", |x: &Array1<f64>| 1.0 / (x[0] - x[0]));
        let config = SSOConfigBuilder::new()
            .seed(2)
            .popsize(4)
            .maxiter(5)
            .reject_non_finite(true)
            .build()
            .unwrap();
        let err = somersault_spider(&obj, -1.0, 1.0, 2, config).unwrap_err();
        assert!(matches!(
            err,
            SSOError::NonFiniteFitness {
                iteration: 0,
                agent: 0,
                ..
            }
        ));
    }
}
