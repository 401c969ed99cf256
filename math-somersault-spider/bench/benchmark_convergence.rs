use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_audio_somersault_spider::function_registry::FunctionRegistry;
use math_audio_somersault_spider::{SSOConfigBuilder, somersault_spider};

fn run_once(name: &str, dim: usize, popsize: usize, maxiter: usize) -> f64 {
    let registry = FunctionRegistry::new();
    let function = registry.get(name).expect("registered function");
    let (lo, hi) = function.default_bounds;
    let config = SSOConfigBuilder::new()
        .popsize(popsize)
        .maxiter(maxiter)
        .seed(42)
        .build()
        .expect("valid config");
    somersault_spider(&function.objective(), lo, hi, dim, config)
        .expect("benchmark run")
        .fun
}

fn bench_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("sso_functions_10d");
    group.sample_size(20);
    for name in ["sphere", "rosenbrock", "rastrigin", "ackley", "griewank"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, &name| {
            b.iter(|| black_box(run_once(name, 10, 30, 200)))
        });
    }
    group.finish();
}

fn bench_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("sso_sphere_dimension");
    group.sample_size(20);
    for dim in [2usize, 10, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| black_box(run_once("sphere", dim, 30, 200)))
        });
    }
    group.finish();
}

fn bench_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("sso_sphere_population");
    group.sample_size(20);
    for popsize in [10usize, 30, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(popsize), &popsize, |b, &popsize| {
            b.iter(|| black_box(run_once("sphere", 10, popsize, 200)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_functions, bench_dimensions, bench_population);
criterion_main!(benches);
