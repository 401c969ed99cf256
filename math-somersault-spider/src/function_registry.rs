/// Shared function registry for SSO benchmarks and the command-line runner
use crate::objective::NamedObjective;
use math_audio_test_functions::*;
use ndarray::Array1;
use std::collections::HashMap;

/// Test function type definition
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Registry name, metadata key, function.
const BENCHMARKS: [(&str, &str, TestFunction); 8] = [
    ("ackley", "ackley", ackley as TestFunction),
    ("griewank", "griewank", griewank as TestFunction),
    ("rastrigin", "rastrigin", rastrigin as TestFunction),
    ("rosenbrock", "rosenbrock", rosenbrock as TestFunction),
    ("schwefel", "schwefel", schwefel as TestFunction),
    ("sphere", "sphere", sphere as TestFunction),
    ("styblinski_tang", "styblinski_tang2", styblinski_tang2 as TestFunction),
    ("zakharov", "zakharov", zakharov as TestFunction),
];

/// A benchmark function with its usual search box and known minimizer.
#[derive(Clone, Debug)]
pub struct BenchmarkFunction {
    /// Registry name.
    pub name: &'static str,
    /// The function itself.
    pub func: TestFunction,
    /// Usual bounds, identical in every dimension.
    pub default_bounds: (f64, f64),
    /// Coordinate of the global minimizer, shared by every dimension.
    pub minimizer: f64,
    /// Whether the function has many local minima.
    pub multimodal: bool,
    /// One-line description.
    pub description: String,
}

impl BenchmarkFunction {
    /// Known global minimum in `dim` dimensions.
    pub fn global_minimum(&self, dim: usize) -> f64 {
        (self.func)(&Array1::from_elem(dim, self.minimizer))
    }

    /// The function wrapped as a named objective.
    pub fn objective(&self) -> NamedObjective<TestFunction> {
        NamedObjective::new(self.name, self.func)
    }
}

/// Function registry mapping names to benchmark functions.
pub struct FunctionRegistry {
    functions: HashMap<String, BenchmarkFunction>,
}

impl FunctionRegistry {
    /// Creates a new registry with all standard test functions.
    pub fn new() -> Self {
        let metadata = get_function_metadata();
        let functions = BENCHMARKS
            .iter()
            .filter_map(|&(name, key, func)| {
                let meta = metadata.get(key)?;
                let default_bounds = *meta.bounds.first()?;
                let minimizer = *meta.global_minima.first()?.0.first()?;
                Some((
                    name.to_string(),
                    BenchmarkFunction {
                        name,
                        func,
                        default_bounds,
                        minimizer,
                        multimodal: meta.multimodal,
                        description: meta.description.clone(),
                    },
                ))
            })
            .collect();
        Self { functions }
    }

    /// Gets a function by exact name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkFunction> {
        self.functions.get(name)
    }

    /// Gets a function by name, ignoring case.
    pub fn resolve(&self, requested: &str) -> Option<&BenchmarkFunction> {
        self.get(requested).or_else(|| {
            let requested_lower = requested.to_lowercase();
            self.functions
                .values()
                .find(|f| f.name.to_lowercase() == requested_lower)
        })
    }

    /// Lists all registered names, sorted.
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
