use clap::Parser;
use math_audio_somersault_spider::{
    BoundSpec, SSOConfig, SSOError, SSOIntermediate, SSOReport, run_recorded_somersault_spider,
    somersault_spider,
    function_registry::{BenchmarkFunction, FunctionRegistry},
    run_config::RunConfig,
};
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_sso",
    about = "Minimize a benchmark function with the Somersaulting Spider Optimizer"
)]
struct Cli {
    /// Name of the benchmark function to optimize (use --list-functions to see available options)
    #[arg(long)]
    function: Option<String>,

    /// Dimensionality of the problem (defaults to 2)
    #[arg(long)]
    dim: Option<usize>,

    /// Lower bound: one value for every dimension or a comma separated list
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    lower: Option<BoundSpec>,

    /// Upper bound: one value for every dimension or a comma separated list
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    upper: Option<BoundSpec>,

    /// Number of spiders (defaults to 30)
    #[arg(long)]
    population: Option<usize>,

    /// Number of iterations (defaults to 500)
    #[arg(long)]
    maxiter: Option<usize>,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Print intermediate progress every N iterations (>= 1)
    #[arg(long, default_value_t = 10)]
    progress_every: usize,

    /// Do not print intermediate progress
    #[arg(long)]
    quiet: bool,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,

    /// JSON run configuration; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Record every evaluation to CSV in the records directory
    #[arg(long)]
    record: bool,
}

fn parse_bound(s: &str) -> Result<BoundSpec, String> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid bound '{}': {}", v.trim(), e))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    match values.as_slice() {
        [single] => Ok(BoundSpec::Scalar(*single)),
        _ => Ok(BoundSpec::PerDim(values)),
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    let registry = FunctionRegistry::new();

    if args.list_functions {
        list_available_functions(&registry);
        return;
    }

    let run = merge_run_config(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    if run.function.trim().is_empty() {
        eprintln!("Error: --function must be provided unless --list-functions is used.");
        process::exit(2);
    }

    let function = match registry.resolve(run.function.trim()) {
        Some(f) => f,
        None => {
            eprintln!(
                "Error: function '{}' not found. Use --list-functions to inspect available names.",
                run.function
            );
            process::exit(2);
        }
    };

    let dimension = run.resolved_dim();
    let (default_lower, default_upper) = function.default_bounds;
    let lower = run.lower.clone().unwrap_or(BoundSpec::Scalar(default_lower));
    let upper = run.upper.clone().unwrap_or(BoundSpec::Scalar(default_upper));

    let config = build_config(&run, &args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    if !args.json {
        println!(
            "Running SSO on '{}' ({}D) with {} spiders for {} iterations...",
            function.name, dimension, run.population, run.maxiter
        );
    }

    let overall_start = Instant::now();
    let report = match optimize(function, lower, upper, dimension, config, args.record) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: optimization failed: {}", e);
            process::exit(2);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report.to_json()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: cannot serialize report: {}", e);
                process::exit(2);
            }
        }
        return;
    }

    print_summary(&report, function, dimension, overall_start);
}

fn merge_run_config(args: &Cli) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let defaults = SSOConfig::default();
    let mut run = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig {
            function: String::new(),
            dim: None,
            lower: None,
            upper: None,
            population: defaults.popsize,
            maxiter: defaults.maxiter,
            seed: None,
        },
    };

    if let Some(function) = &args.function {
        run.function = function.clone();
    }
    if args.dim.is_some() {
        run.dim = args.dim;
    }
    if args.lower.is_some() {
        run.lower = args.lower.clone();
    }
    if args.upper.is_some() {
        run.upper = args.upper.clone();
    }
    if let Some(population) = args.population {
        run.population = population;
    }
    if let Some(maxiter) = args.maxiter {
        run.maxiter = maxiter;
    }
    if args.seed.is_some() {
        run.seed = args.seed;
    }
    Ok(run)
}

/// Solver settings for this invocation.
///
/// Progress goes through the library log unless `--quiet`. The stdout progress
/// line is skipped under `--json` so that stdout holds only the report.
fn build_config(run: &RunConfig, args: &Cli) -> Result<SSOConfig, SSOError> {
    let mut builder = run
        .to_builder()
        .progress_every(args.progress_every)
        .disp(!args.quiet);
    if !args.quiet && !args.json {
        let progress_every = args.progress_every;
        builder = builder.callback(Box::new(move |intermediate: &SSOIntermediate| {
            if intermediate.iter % progress_every == 0 {
                println!(
                    "iter {:>5} | best = {:>12.6e} | mean energy = {:.3}",
                    intermediate.iter,
                    intermediate.fun,
                    intermediate.mean_energy()
                );
            }
        }));
    }
    builder.build()
}

fn optimize(
    function: &BenchmarkFunction,
    lower: BoundSpec,
    upper: BoundSpec,
    dim: usize,
    config: SSOConfig,
    record: bool,
) -> Result<SSOReport, Box<dyn std::error::Error>> {
    if record {
        let (report, csv_path) = run_recorded_somersault_spider(
            function.name,
            function.objective(),
            lower,
            upper,
            dim,
            config,
        )?;
        eprintln!("Evaluations recorded to {}", csv_path.display());
        Ok(report)
    } else {
        Ok(somersault_spider(
            &function.objective(),
            lower,
            upper,
            dim,
            config,
        )?)
    }
}

fn print_summary(
    report: &SSOReport,
    function: &BenchmarkFunction,
    dim: usize,
    overall_start: Instant,
) {
    println!(
        "\nOptimization completed in {:.2?}",
        overall_start.elapsed()
    );
    println!(
        "Started: {} | Finished: {}",
        report.start_time_string(),
        report.end_time_string()
    );
    println!("Iterations: {} | Evaluations: {}", report.nit, report.nfev);
    println!(
        "Best objective: {:.6e} (known minimum {:.6e})",
        report.fun,
        function.global_minimum(dim)
    );

    let mut best_vector = String::new();
    for (idx, value) in report.x.iter().enumerate() {
        if idx > 0 {
            best_vector.push_str(", ");
        }
        let _ = write!(&mut best_vector, "{value:.6}");
    }
    println!("Best parameters: [{}]", best_vector);

    let counts = &report.behavior_counts;
    println!(
        "Moves: {} aggressive somersaults, {} directed somersaults, {} rolls, {} guided updates, {} rests",
        counts.aggressive_somersaults,
        counts.directed_somersaults,
        counts.rolls,
        counts.guided_updates,
        counts.rests
    );
}

fn list_available_functions(registry: &FunctionRegistry) {
    let names = registry.list_functions();
    println!("Available test functions ({}):", names.len());
    for name in names {
        if let Some(f) = registry.get(&name) {
            let (lo, hi) = f.default_bounds;
            let kind = if f.multimodal { "multimodal" } else { "unimodal" };
            println!("- {name:<16} [{lo}, {hi}] {kind:<10} {}", f.description);
        }
    }
}
