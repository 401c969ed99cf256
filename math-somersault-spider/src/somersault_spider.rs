use crate::{BoundSpec, Bounds, Objective, Result, SSOConfig, SSOReport, SomersaultSpider};

/// Runs the Somersaulting Spider Optimizer on `objective`.
///
/// Convenience wrapper that normalizes the bounds, creates the optimizer with
/// `config` and runs it to completion.
///
/// # Arguments
///
/// * `objective` - The objective to minimize
/// * `lower` - Lower bound(s): a scalar for every dimension or one value per dimension
/// * `upper` - Upper bound(s), same forms as `lower`
/// * `dim` - Problem dimension
/// * `config` - Run configuration (use `SSOConfigBuilder` to construct)
///
/// # Errors
///
/// Bounds errors from [`Bounds::new`], configuration errors, and any
/// failure raised by the objective.
///
/// # Example
///
/// ```rust
/// use math_audio_somersault_spider::{NamedObjective, SSOConfigBuilder, somersault_spider};
/// use ndarray::Array1;
///
/// let booth = NamedObjective::new("booth", |x: &Array1<f64>| {
///     (x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2)
/// });
/// let config = SSOConfigBuilder::new().popsize(20).maxiter(150).seed(1).build().unwrap();
/// let report = somersault_spider(&booth, vec![-10.0, -10.0], 10.0, 2, config).unwrap();
/// assert_eq!(report.objective_name, "booth");
/// assert_eq!(report.x.len(), 2);
/// ```
pub fn somersault_spider<O>(
    objective: &O,
    lower: impl Into<BoundSpec>,
    upper: impl Into<BoundSpec>,
    dim: usize,
    config: SSOConfig,
) -> Result<SSOReport>
where
    O: Objective + ?Sized,
{
    let bounds = Bounds::new(lower, upper, dim)?;
    let mut sso = SomersaultSpider::new(objective, bounds);
    *sso.config_mut() = config;
    sso.solve()
}
