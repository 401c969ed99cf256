//! Objective functions seen by the optimizer.
//!
//! The optimizer only needs a display name and a point evaluation. Plain
//! closures are wrapped with [`NamedObjective`]; objectives that can fail
//! (a simulation that diverges, a missing input file) use
//! [`FallibleObjective`] and abort the run with their error.

use ndarray::Array1;
use thiserror::Error;

/// Failure reported by a fallible objective.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ObjectiveError {
    message: String,
}

impl ObjectiveError {
    /// Creates an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message given at construction.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ObjectiveError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ObjectiveError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A scalar objective to minimize.
pub trait Objective {
    /// Display name used in logs and in the run report.
    fn name(&self) -> &str;

    /// Evaluates the objective at `x`.
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError>;
}

impl<T: Objective + ?Sized> Objective for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        (**self).evaluate(x)
    }
}

/// An infallible closure with a name attached.
pub struct NamedObjective<F> {
    name: String,
    func: F,
}

impl<F> NamedObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Wraps `func` under `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Objective for NamedObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        Ok((self.func)(x))
    }
}

/// A closure that may fail, with a name attached.
pub struct FallibleObjective<F> {
    name: String,
    func: F,
}

impl<F> FallibleObjective<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, ObjectiveError>,
{
    /// Wraps `func` under `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Objective for FallibleObjective<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, ObjectiveError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        (self.func)(x)
    }
}
