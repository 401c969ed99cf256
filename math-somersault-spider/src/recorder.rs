use crate::SSOIntermediate;
use crate::objective::{Objective, ObjectiveError};
use ndarray::Array1;
use std::cell::{Cell, RefCell};
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Records flushed to disk per CSV block.
const BLOCK_SIZE: usize = 10_000;

/// Records every objective evaluation of a run and writes them to CSV blocks.
#[derive(Debug)]
pub struct OptimizationRecorder {
    /// Function name (used for CSV filename)
    function_name: String,
    /// Output directory for CSV files
    output_dir: PathBuf,
    /// Evaluations not yet written to disk
    records: RefCell<Vec<EvaluationRecord>>,
    /// Best function value seen so far
    best_value: Cell<Option<f64>>,
    /// Counter for function evaluations
    eval_counter: Cell<usize>,
    /// Iteration the next evaluations belong to
    current_iteration: Cell<usize>,
    /// Number of blocks written
    block_counter: Cell<usize>,
    /// First write failure, reported by `finalize`
    write_error: RefCell<Option<String>>,
}

/// A single function evaluation record
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    /// Function evaluation number, starting at 1
    pub eval_id: usize,
    /// Iteration number
    pub iteration: usize,
    /// Input parameters x
    pub x: Vec<f64>,
    /// Function value f(x)
    pub f_value: f64,
    /// Best function value so far, including this one
    pub best_so_far: f64,
    /// Whether this evaluation improved the best so far
    pub is_improvement: bool,
}

impl OptimizationRecorder {
    /// Create a recorder writing `{function_name}_block_NNNN.csv` files into `output_dir`
    pub fn with_output_dir(function_name: impl Into<String>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            function_name: function_name.into(),
            output_dir: output_dir.as_ref().to_path_buf(),
            records: RefCell::new(Vec::new()),
            best_value: Cell::new(None),
            eval_counter: Cell::new(0),
            current_iteration: Cell::new(0),
            block_counter: Cell::new(0),
            write_error: RefCell::new(None),
        }
    }

    /// Record a single function evaluation
    pub fn record_evaluation(&self, x: &Array1<f64>, f_value: f64) {
        let eval_id = self.eval_counter.get() + 1;
        self.eval_counter.set(eval_id);

        let is_improvement = match self.best_value.get() {
            Some(best) => f_value < best,
            None => true,
        };
        if is_improvement {
            self.best_value.set(Some(f_value));
        }
        let best_so_far = self.best_value.get().unwrap_or(f_value);

        let mut records = self.records.borrow_mut();
        records.push(EvaluationRecord {
            eval_id,
            iteration: self.current_iteration.get(),
            x: x.to_vec(),
            f_value,
            best_so_far,
            is_improvement,
        });

        if records.len() >= BLOCK_SIZE {
            let block: Vec<EvaluationRecord> = records.drain(..).collect();
            drop(records);
            if let Err(e) = self.save_next_block(&block) {
                log::warn!("failed to save evaluation block: {}", e);
                let mut first_error = self.write_error.borrow_mut();
                if first_error.is_none() {
                    *first_error = Some(e.to_string());
                }
            }
        }
    }

    /// Set the iteration the following evaluations belong to
    pub fn set_iteration(&self, iteration: usize) {
        self.current_iteration.set(iteration);
    }

    /// Advance the iteration counter from an optimizer callback
    pub fn observe(&self, intermediate: &SSOIntermediate) {
        self.set_iteration(intermediate.iter + 1);
    }

    fn block_path(&self, block_id: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_block_{:04}.csv", self.function_name, block_id))
    }

    fn save_next_block(&self, records: &[EvaluationRecord]) -> std::io::Result<()> {
        let block_id = self.block_counter.get() + 1;
        self.block_counter.set(block_id);
        self.save_block_to_csv(records, block_id)
    }

    /// Save a block of evaluations to CSV file
    fn save_block_to_csv(&self, records: &[EvaluationRecord], block_id: usize) -> std::io::Result<()> {
        create_dir_all(&self.output_dir)?;
        let mut file = BufWriter::new(File::create(self.block_path(block_id))?);

        if records.is_empty() {
            return Ok(());
        }

        let num_dimensions = records[0].x.len();
        write!(file, "eval_id,iteration,")?;
        for i in 0..num_dimensions {
            write!(file, "x{},", i)?;
        }
        writeln!(file, "f_value,best_so_far,is_improvement")?;

        for record in records {
            write!(file, "{},{},", record.eval_id, record.iteration)?;
            for &xi in &record.x {
                write!(file, "{:.16},", xi)?;
            }
            writeln!(
                file,
                "{:.16},{:.16},{}",
                record.f_value, record.best_so_far, record.is_improvement
            )?;
        }

        file.flush()
    }

    /// Save any remaining records and the summary; returns all CSV block paths
    pub fn finalize(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        if let Some(e) = self.write_error.borrow().as_ref() {
            return Err(format!("an evaluation block could not be saved: {}", e).into());
        }

        let remaining: Vec<EvaluationRecord> = self.records.borrow_mut().drain(..).collect();
        if !remaining.is_empty() {
            self.save_next_block(&remaining)?;
        }

        self.save_summary()?;

        Ok((1..=self.block_counter.get())
            .map(|block_id| self.block_path(block_id))
            .collect())
    }

    /// Save summary file with metadata
    fn save_summary(&self) -> std::io::Result<()> {
        create_dir_all(&self.output_dir)?;
        let summary_path = self
            .output_dir
            .join(format!("{}_summary.txt", self.function_name));
        let mut file = File::create(summary_path)?;

        writeln!(file, "Function: {}", self.function_name)?;
        writeln!(file, "Total evaluations: {}", self.eval_counter.get())?;
        writeln!(file, "Total blocks: {}", self.block_counter.get())?;
        writeln!(file, "Best value found: {:?}", self.best_value.get())?;
        writeln!(file, "Block files:")?;
        for block_id in 1..=self.block_counter.get() {
            writeln!(file, "  {}_block_{:04}.csv", self.function_name, block_id)?;
        }
        Ok(())
    }

    /// Get evaluation statistics: (evaluations, best value, blocks written)
    pub fn get_stats(&self) -> (usize, Option<f64>, usize) {
        (
            self.eval_counter.get(),
            self.best_value.get(),
            self.block_counter.get(),
        )
    }

    /// Evaluations still held in memory
    pub fn pending_records(&self) -> Vec<EvaluationRecord> {
        self.records.borrow().clone()
    }
}

/// An objective that reports every evaluation to a recorder.
pub struct RecordingObjective<O> {
    inner: O,
    recorder: Rc<OptimizationRecorder>,
}

impl<O: Objective> RecordingObjective<O> {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: O, recorder: Rc<OptimizationRecorder>) -> Self {
        Self { inner, recorder }
    }
}

impl<O: Objective> Objective for RecordingObjective<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        let f_value = self.inner.evaluate(x)?;
        self.recorder.record_evaluation(x, f_value);
        Ok(f_value)
    }
}
