#![doc = include_str!("../README.md")]

use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Metadata for a test function: bounds, known minima and landscape type
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    // Sorted alphabetically

    metadata.insert(
        "ackley".to_string(),
        FunctionMetadata {
            name: "ackley".to_string(),
            bounds: vec![(-32.768, 32.768); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Multimodal Ackley function with many local minima".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "griewank".to_string(),
        FunctionMetadata {
            name: "griewank".to_string(),
            bounds: vec![(-600.0, 600.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Griewank function".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            bounds: vec![(-5.12, 5.12); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Highly multimodal Rastrigin function".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "rosenbrock".to_string(),
        FunctionMetadata {
            name: "rosenbrock".to_string(),
            bounds: vec![(-2.048, 2.048); 2],
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            description: "Classic Rosenbrock banana function".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "schwefel".to_string(),
        FunctionMetadata {
            name: "schwefel".to_string(),
            bounds: vec![(-500.0, 500.0); 2],
            global_minima: vec![(vec![420.9687, 420.9687], 0.0)],
            description: "Schwefel function".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "sphere".to_string(),
        FunctionMetadata {
            name: "sphere".to_string(),
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Simple quadratic sphere function".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "styblinski_tang2".to_string(),
        FunctionMetadata {
            name: "styblinski_tang2".to_string(),
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![(vec![-2.903534, -2.903534], -78.332)],
            description: "Styblinski-Tang function (2D)".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "zakharov".to_string(),
        FunctionMetadata {
            name: "zakharov".to_string(),
            bounds: vec![(-5.0, 10.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Zakharov function".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn lookup(name: &str) -> Option<fn(&Array1<f64>) -> f64> {
        match name {
            "ackley" => Some(ackley),
            "griewank" => Some(griewank),
            "rastrigin" => Some(rastrigin),
            "rosenbrock" => Some(rosenbrock),
            "schwefel" => Some(schwefel),
            "sphere" => Some(sphere),
            "styblinski_tang2" => Some(styblinski_tang2),
            "zakharov" => Some(zakharov),
            _ => None,
        }
    }

    #[test]
    fn test_every_metadata_entry_has_a_function() {
        let metadata = get_function_metadata();
        assert_eq!(metadata.len(), 8);
        for (key, meta) in &metadata {
            assert_eq!(key, &meta.name);
            assert!(lookup(key).is_some(), "no function for {key}");
            assert_eq!(meta.bounds.len(), meta.dimensions[0]);
        }
    }

    #[test]
    fn test_global_minima_within_bounds_and_values() {
        // Schwefel's and Styblinski-Tang's minimizers are rounded
        let tolerance = 1e-2;
        for (name, meta) in get_function_metadata() {
            let f = lookup(&name).expect("registered function");
            for (coords, expected) in &meta.global_minima {
                for (&c, &(lo, hi)) in coords.iter().zip(meta.bounds.iter()) {
                    assert!(c >= lo && c <= hi, "{name}: {c} outside [{lo}, {hi}]");
                }
                let value = f(&Array1::from_vec(coords.clone()));
                assert!(
                    (value - expected).abs() <= tolerance,
                    "{name}: expected {expected}, got {value}"
                );
            }
        }
    }
}
