//! Recording wrapper for the optimizer, used for analysis and plotting

use crate::recorder::{OptimizationRecorder, RecordingObjective};
use crate::{BoundSpec, Objective, SSOConfig, SSOIntermediate, SSOReport, somersault_spider};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Get the records directory using the directories crate
pub fn get_records_dir() -> Result<PathBuf, String> {
    let proj_dirs = ProjectDirs::from("org", "spinorama", "math-audio")
        .ok_or("Failed to determine project directories")?;

    let records_dir = proj_dirs.cache_dir().join("records");
    std::fs::create_dir_all(&records_dir)
        .map_err(|e| format!("Failed to create records directory: {}", e))?;

    Ok(records_dir)
}

/// Run the optimizer with every evaluation recorded to CSV in the records directory
///
/// Returns the report and the path of the first CSV block.
pub fn run_recorded_somersault_spider<O>(
    function_name: &str,
    objective: O,
    lower: impl Into<BoundSpec>,
    upper: impl Into<BoundSpec>,
    dim: usize,
    config: SSOConfig,
) -> Result<(SSOReport, PathBuf), Box<dyn std::error::Error>>
where
    O: Objective,
{
    let records_dir =
        get_records_dir().map_err(|e| format!("Failed to get records directory: {}", e))?;
    run_recorded_in_dir(&records_dir, function_name, objective, lower, upper, dim, config)
}

/// Same as [`run_recorded_somersault_spider`] with an explicit output directory
pub fn run_recorded_in_dir<O>(
    output_dir: &Path,
    function_name: &str,
    objective: O,
    lower: impl Into<BoundSpec>,
    upper: impl Into<BoundSpec>,
    dim: usize,
    mut config: SSOConfig,
) -> Result<(SSOReport, PathBuf), Box<dyn std::error::Error>>
where
    O: Objective,
{
    let recorder = Rc::new(OptimizationRecorder::with_output_dir(
        function_name,
        output_dir,
    ));

    // Keep the caller's callback and advance the recorder's iteration after it
    let mut user_callback = config.callback.take();
    let observer = recorder.clone();
    config.callback = Some(Box::new(move |intermediate: &SSOIntermediate| {
        if let Some(cb) = user_callback.as_mut() {
            cb(intermediate);
        }
        observer.observe(intermediate);
    }));

    let recorded = RecordingObjective::new(objective, recorder.clone());
    let report = somersault_spider(&recorded, lower, upper, dim, config)?;

    let csv_files = recorder.finalize()?;
    let csv_path = csv_files
        .into_iter()
        .next()
        .unwrap_or_else(|| output_dir.join(format!("{}_block_0001.csv", function_name)));

    Ok((report, csv_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NamedObjective, SSOConfigBuilder};
    use ndarray::Array1;

    #[test]
    fn test_run_recorded_basic() {
        let dir = std::env::temp_dir().join(format!("sso-run-recorded-{}", std::process::id()));
        let quadratic = NamedObjective::new("quadratic", |x: &Array1<f64>| {
            x.iter().map(|&xi| xi * xi).sum::<f64>()
        });
        let config = SSOConfigBuilder::new()
            .seed(42)
            .maxiter(20)
            .popsize(10)
            .build()
            .expect("valid config");

        let (report, csv_path) =
            run_recorded_in_dir(&dir, "test_quadratic", quadratic, -5.0, 5.0, 2, config)
                .expect("recorded run should succeed");

        assert_eq!(report.nfev, 200);
        let csv = std::fs::read_to_string(&csv_path).expect("csv readable");
        let lines: Vec<&str> = csv.trim().lines().collect();
        assert_eq!(lines.len(), 201, "header plus one row per evaluation");
        assert!(lines[0].starts_with("eval_id,iteration,x0,x1,f_value"));

        // First spider of the last iteration is tagged with iteration 19
        let last_iter_row = lines[1 + 19 * 10];
        assert!(last_iter_row.starts_with("191,19,"), "{last_iter_row}");

        // Best-so-far column ends at the reported best
        let last = lines[200].split(',').collect::<Vec<_>>();
        let best_so_far: f64 = last[last.len() - 2].parse().unwrap();
        approx::assert_relative_eq!(best_so_far, report.fun, epsilon = 1e-12);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_run_recorded_keeps_user_callback() {
        let dir = std::env::temp_dir().join(format!("sso-run-cb-{}", std::process::id()));
        let calls = Rc::new(std::cell::Cell::new(0usize));
        let counter = calls.clone();
        let config = SSOConfigBuilder::new()
            .seed(1)
            .maxiter(7)
            .popsize(3)
            .callback(Box::new(move |_| counter.set(counter.get() + 1)))
            .build()
            .unwrap();
        let sum = NamedObjective::new("sum", |x: &Array1<f64>| x.sum());

        run_recorded_in_dir(&dir, "sum", sum, 0.0, 1.0, 3, config).unwrap();
        assert_eq!(calls.get(), 7);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
