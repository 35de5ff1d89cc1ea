//! Relative error metrics over aligned value series.
//!
//! All percentages are relative to the reference (Cornell) values; a zero
//! reference makes the ratio undefined and is reported as an error rather
//! than skipped, so a corrupt series cannot silently distort the mean.

use thiserror::Error;

/// Errors raised by the metric computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("reference value at index {index} is zero, percent error is undefined")]
    ZeroReference { index: usize },

    #[error("cannot summarize an empty error sequence")]
    EmptyInput,

    #[error("reference has {reference} values but predicted has {predicted}")]
    LengthMismatch { reference: usize, predicted: usize },

    #[error("baseline final loss is zero, improvement is undefined")]
    ZeroBaselineLoss,
}

/// Mean and maximum of an error sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub mean: f64,
    pub max: f64,
}

/// Per-point relative error in percent: `|ref - pred| / |ref| * 100`.
///
/// Empty inputs yield an empty output. Fails on mismatched lengths or a
/// zero reference value.
pub fn percent_errors(reference: &[f64], predicted: &[f64]) -> Result<Vec<f64>, MetricsError> {
    if reference.len() != predicted.len() {
        return Err(MetricsError::LengthMismatch {
            reference: reference.len(),
            predicted: predicted.len(),
        });
    }

    reference
        .iter()
        .zip(predicted)
        .enumerate()
        .map(|(index, (&r, &p))| {
            if r == 0.0 {
                Err(MetricsError::ZeroReference { index })
            } else {
                Ok((r - p).abs() / r.abs() * 100.0)
            }
        })
        .collect()
}

/// Arithmetic mean and maximum of a non-empty error sequence.
pub fn summarize(errors: &[f64]) -> Result<ErrorSummary, MetricsError> {
    if errors.is_empty() {
        return Err(MetricsError::EmptyInput);
    }

    let mean = errors.iter().sum::<f64>() / errors.len() as f64;
    let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(ErrorSummary { mean, max })
}

/// Percentage improvement of the candidate's final loss over the
/// baseline's: `(1 - candidate/baseline) * 100`.
///
/// Positive means the candidate's loss is lower. Fails when the baseline
/// loss is zero.
pub fn loss_improvement(baseline: f64, candidate: f64) -> Result<f64, MetricsError> {
    if baseline == 0.0 {
        return Err(MetricsError::ZeroBaselineLoss);
    }

    Ok((1.0 - candidate / baseline) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percent_errors_basic() {
        let errors = percent_errors(&[10.0, 20.0], &[11.0, 18.0]).unwrap();
        assert_eq!(errors, vec![10.0, 10.0]);

        let summary = summarize(&errors).unwrap();
        assert_eq!(summary.mean, 10.0);
        assert_eq!(summary.max, 10.0);
    }

    #[test]
    fn test_percent_errors_zero_prediction() {
        let errors = percent_errors(&[5.0], &[0.0]).unwrap();
        assert_eq!(errors, vec![100.0]);
    }

    #[test]
    fn test_percent_errors_empty_is_empty() {
        let errors = percent_errors(&[], &[]).unwrap();
        assert!(errors.is_empty());
        assert_eq!(summarize(&errors), Err(MetricsError::EmptyInput));
    }

    #[test]
    fn test_percent_errors_zero_reference() {
        let result = percent_errors(&[1.0, 0.0, 3.0], &[1.0, 2.0, 3.0]);
        assert_eq!(result, Err(MetricsError::ZeroReference { index: 1 }));
    }

    #[test]
    fn test_percent_errors_length_mismatch() {
        let result = percent_errors(&[1.0, 2.0], &[1.0]);
        assert_eq!(
            result,
            Err(MetricsError::LengthMismatch {
                reference: 2,
                predicted: 1
            })
        );
    }

    #[test]
    fn test_summarize_constant_sequence() {
        let summary = summarize(&[7.5, 7.5, 7.5]).unwrap();
        assert_eq!(summary.mean, 7.5);
        assert_eq!(summary.max, 7.5);
    }

    #[test]
    fn test_loss_improvement_halved_loss() {
        let improvement = loss_improvement(0.002, 0.001).unwrap();
        assert!((improvement - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_loss_improvement_identical_loss_is_zero() {
        assert_eq!(loss_improvement(0.004, 0.004).unwrap(), 0.0);
    }

    #[test]
    fn test_loss_improvement_zero_baseline() {
        assert_eq!(
            loss_improvement(0.0, 0.001),
            Err(MetricsError::ZeroBaselineLoss)
        );
    }

    /// Index-aligned (reference, predicted) pairs with nonzero references.
    fn aligned_series() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..32).prop_flat_map(|len| {
            (
                prop::collection::vec(prop_oneof![-1000.0..-0.01f64, 0.01..1000.0f64], len),
                prop::collection::vec(-1000.0..1000.0f64, len),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_errors_nonnegative_and_length_preserving(
            (reference, predicted) in aligned_series()
        ) {
            let errors = percent_errors(&reference, &predicted).unwrap();
            prop_assert_eq!(errors.len(), reference.len());
            for e in errors {
                prop_assert!(e >= 0.0);
            }
        }

        #[test]
        fn prop_errors_invariant_under_sign_flip(
            (reference, predicted) in aligned_series()
        ) {
            let flipped_ref: Vec<f64> = reference.iter().map(|r| -r).collect();
            let flipped_pred: Vec<f64> = predicted.iter().map(|p| -p).collect();

            let errors = percent_errors(&reference, &predicted).unwrap();
            let flipped = percent_errors(&flipped_ref, &flipped_pred).unwrap();

            for (a, b) in errors.iter().zip(&flipped) {
                prop_assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
            }
        }
    }
}
