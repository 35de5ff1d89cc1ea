//! Side-by-side comparison reporting for two training sessions.
//!
//! Aggregates the per-run metrics into summary blocks, an overall
//! improvement block, and a per-point table with an improvement marker
//! on each row.

use std::fmt;

use qs_session::Session;
use thiserror::Error;

use crate::metrics::{self, MetricsError};

/// Errors raised while assembling a comparison.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("{label}: predictions have {found} values, expected {expected} to match the baseline series")]
    PredictionCountMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("{label}: no final loss recorded")]
    MissingFinalLoss { label: String },
}

/// One run's headline numbers.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub label: String,
    /// Final training loss, in GeV^2.
    pub final_loss: f64,
    /// Mean relative error against the reference, in percent.
    pub mean_error: f64,
    /// Worst relative error against the reference, in percent.
    pub max_error: f64,
}

/// One sample point of the detailed comparison table.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub distance: f64,
    pub reference: f64,
    pub baseline_prediction: f64,
    pub candidate_prediction: f64,
    pub baseline_error: f64,
    pub candidate_error: f64,
    /// True when the candidate beats the baseline at this point.
    pub improved: bool,
}

/// Full two-run comparison, rendered via `Display`.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub baseline: RunSummary,
    pub candidate: RunSummary,
    /// Percentage improvement of the candidate's final loss.
    pub loss_improvement: f64,
    /// Drop in mean error, in percentage points.
    pub mean_error_reduction: f64,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Compare two sessions, with `baseline` supplying the shared
    /// reference series.
    ///
    /// Both runs are evaluated over the same distances, so the candidate
    /// only needs its prediction count checked against the baseline's
    /// series.
    pub fn build(
        baseline: &Session,
        candidate: &Session,
        label_a: &str,
        label_b: &str,
    ) -> Result<Self, ReportError> {
        let reference = &baseline.cornell_values;
        if candidate.nn_values.len() != reference.len() {
            return Err(ReportError::PredictionCountMismatch {
                label: label_b.to_string(),
                expected: reference.len(),
                found: candidate.nn_values.len(),
            });
        }

        let errors_a = metrics::percent_errors(reference, &baseline.nn_values)?;
        let errors_b = metrics::percent_errors(reference, &candidate.nn_values)?;
        let summary_a = metrics::summarize(&errors_a)?;
        let summary_b = metrics::summarize(&errors_b)?;

        let loss_a = baseline
            .final_loss()
            .ok_or_else(|| ReportError::MissingFinalLoss {
                label: label_a.to_string(),
            })?;
        let loss_b = candidate
            .final_loss()
            .ok_or_else(|| ReportError::MissingFinalLoss {
                label: label_b.to_string(),
            })?;

        let rows = baseline
            .test_distances
            .iter()
            .enumerate()
            .map(|(i, &distance)| ComparisonRow {
                distance,
                reference: reference[i],
                baseline_prediction: baseline.nn_values[i],
                candidate_prediction: candidate.nn_values[i],
                baseline_error: errors_a[i],
                candidate_error: errors_b[i],
                improved: errors_b[i] < errors_a[i],
            })
            .collect();

        Ok(Self {
            baseline: RunSummary {
                label: label_a.to_string(),
                final_loss: loss_a,
                mean_error: summary_a.mean,
                max_error: summary_a.max,
            },
            candidate: RunSummary {
                label: label_b.to_string(),
                final_loss: loss_b,
                mean_error: summary_b.mean,
                max_error: summary_b.max,
            },
            loss_improvement: metrics::loss_improvement(loss_a, loss_b)?,
            mean_error_reduction: summary_a.mean - summary_b.mean,
            rows,
        })
    }
}

const RULE: &str =
    "================================================================================";
const DASH: &str =
    "--------------------------------------------------------------------------------";

fn write_summary(f: &mut fmt::Formatter<'_>, run: &RunSummary) -> fmt::Result {
    writeln!(f, "{}:", run.label)?;
    writeln!(f, "  Final loss: {:.6} GeV^2", run.final_loss)?;
    writeln!(f, "  Mean error: {:.2}%", run.mean_error)?;
    writeln!(f, "  Max error:  {:.2}%", run.max_error)
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "RUN COMPARISON: {} vs {}",
            self.baseline.label, self.candidate.label
        )?;
        writeln!(f, "{RULE}")?;

        writeln!(f)?;
        write_summary(f, &self.baseline)?;
        writeln!(f)?;
        write_summary(f, &self.candidate)?;

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "RESULT:")?;
        writeln!(f, "  Loss improvement:     {:.1}%", self.loss_improvement)?;
        writeln!(
            f,
            "  Mean error reduction: {:.1} points",
            self.mean_error_reduction
        )?;
        writeln!(f, "{RULE}")?;

        writeln!(f)?;
        writeln!(f, "DETAILED COMPARISON:")?;
        writeln!(
            f,
            "{:>8} | {:>9} | {:>9} | {:>9} | {:>10} | {:>10}",
            "Distance",
            "Cornell",
            self.baseline.label,
            self.candidate.label,
            format!("{} err", self.baseline.label),
            format!("{} err", self.candidate.label),
        )?;
        writeln!(f, "{DASH}")?;

        for row in &self.rows {
            writeln!(
                f,
                "{:8.1} | {:9.3} | {:9.3} | {:9.3} | {:9.2}% | {:9.2}% {}",
                row.distance,
                row.reference,
                row.baseline_prediction,
                row.candidate_prediction,
                row.baseline_error,
                row.candidate_error,
                if row.improved { "✓" } else { "✗" },
            )?;
        }

        Ok(())
    }
}
