//! Binary cross-entropy with a per-entry validity mask.
//!
//! The masked loss multiplies every log-likelihood term by its mask entry,
//! sums, and divides by the number of valid entries:
//!
//! ```text
//! loss = -Σ m[i,j] · (l[i,j]·ln p[i,j] + (1 - l[i,j])·ln(1 - p[i,j])) / Σ m[i,j]
//! ```
//!
//! For a 0/1 mask this is exactly the unmasked loss over the entries whose
//! mask is 1: excluded entries add 0 to the numerator and 0 to the count.
//! [`select_by_mask`](crate::select_by_mask) builds that reduced pair
//! explicitly.

use ndarray::{Array2, ArrayView2, Zip};

use crate::config::LossConfig;
use crate::error::{LossError, Operand, Result};
use crate::validate;

/// Per-entry binary cross-entropy: `-(label·ln(pred) + (1 - label)·ln(1 - pred))`.
pub fn binary_cross_entropy_term(pred: f64, label: f64) -> f64 {
    -log_likelihood(pred, label)
}

fn log_likelihood(pred: f64, label: f64) -> f64 {
    label * pred.ln() + (1.0 - label) * (1.0 - pred).ln()
}

/// Mean binary cross-entropy over the entries a mask marks as valid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaskedCrossEntropy {
    config: LossConfig,
}

impl MaskedCrossEntropy {
    pub fn new(config: LossConfig) -> Self {
        MaskedCrossEntropy { config }
    }

    pub fn config(&self) -> &LossConfig {
        &self.config
    }

    /// Compute the mean loss.
    ///
    /// # Arguments
    ///
    /// * `pred` - Predicted probabilities of shape (n, c)
    /// * `label` - Binary labels of shape (n, c)
    /// * `mask` - Optional binary mask of shape (n, c); `None` marks every entry valid
    ///
    /// # Errors
    ///
    /// Fails on a shape mismatch, an all-zero mask, an empty input, and (unless
    /// validation is disabled) on predictions outside (0, 1) or labels and
    /// masks outside {0, 1}. Entries the mask excludes are not validated.
    pub fn compute(
        &self,
        pred: ArrayView2<'_, f64>,
        label: ArrayView2<'_, f64>,
        mask: Option<ArrayView2<'_, f64>>,
    ) -> Result<f64> {
        self.reduce(&pred, &label, mask.as_ref())
            .inspect_err(|err| tracing::debug!(%err, "masked_bce_rejected"))
    }

    /// Normalizing count: `n * c` without a mask, the mask sum otherwise.
    pub fn valid_entries(
        &self,
        pred: ArrayView2<'_, f64>,
        mask: Option<ArrayView2<'_, f64>>,
    ) -> Result<f64> {
        let shape = pred.dim();
        if let Some(mask) = &mask {
            validate::check_shape(Operand::Mask, shape, mask)?;
            if self.config.validate_domain {
                validate::check_domain(Operand::Mask, mask, None, validate::is_binary)?;
            }
        }
        normalizer(shape, mask.as_ref())
    }

    fn reduce(
        &self,
        pred: &ArrayView2<'_, f64>,
        label: &ArrayView2<'_, f64>,
        mask: Option<&ArrayView2<'_, f64>>,
    ) -> Result<f64> {
        self.config.check()?;

        let shape = pred.dim();
        validate::check_shape(Operand::Label, shape, label)?;
        if let Some(mask) = mask {
            validate::check_shape(Operand::Mask, shape, mask)?;
        }

        if self.config.validate_domain {
            self.check_domains(pred, label, mask)?;
        }

        let count = normalizer(shape, mask)?;
        let terms = self.masked_terms(pred, label, mask);
        // Logical row-major order, independent of the inputs' memory layout.
        let total: f64 = terms.iter().sum();
        let loss = -total / count;

        tracing::debug!(
            rows = shape.0,
            cols = shape.1,
            valid = count,
            loss,
            "masked_bce_reduced"
        );
        Ok(loss)
    }

    fn check_domains(
        &self,
        pred: &ArrayView2<'_, f64>,
        label: &ArrayView2<'_, f64>,
        mask: Option<&ArrayView2<'_, f64>>,
    ) -> Result<()> {
        if let Some(mask) = mask {
            validate::check_domain(Operand::Mask, mask, None, validate::is_binary)?;
        }
        let clamped = self.config.clamp_epsilon.is_some();
        validate::check_domain(Operand::Pred, pred, mask, |p| {
            validate::is_probability(p, clamped)
        })?;
        validate::check_domain(Operand::Label, label, mask, validate::is_binary)
    }

    /// Log-likelihood terms with the mask applied. Excluded entries are
    /// exactly 0 even when their own term is not finite.
    fn masked_terms(
        &self,
        pred: &ArrayView2<'_, f64>,
        label: &ArrayView2<'_, f64>,
        mask: Option<&ArrayView2<'_, f64>>,
    ) -> Array2<f64> {
        let term = |p: f64, l: f64| match self.config.clamp_epsilon {
            Some(eps) => log_likelihood(p.clamp(eps, 1.0 - eps), l),
            None => log_likelihood(p, l),
        };

        if let Some(eps) = self.config.clamp_epsilon {
            let clamped = clamped_entries(pred, mask, eps);
            tracing::trace!(clamped, epsilon = eps, "clamped predictions");
        }

        match mask {
            Some(mask) => Zip::from(pred).and(label).and(mask).map_collect(|&p, &l, &m| {
                if m == 0.0 {
                    0.0
                } else {
                    m * term(p, l)
                }
            }),
            None => Zip::from(pred).and(label).map_collect(|&p, &l| term(p, l)),
        }
    }
}

/// Predictions the clamp will move, counting only entries the mask keeps.
fn clamped_entries(
    pred: &ArrayView2<'_, f64>,
    mask: Option<&ArrayView2<'_, f64>>,
    eps: f64,
) -> usize {
    let outside = |p: f64| p < eps || p > 1.0 - eps;
    match mask {
        Some(mask) => Zip::from(pred)
            .and(mask)
            .fold(0, |n, &p, &m| n + usize::from(m != 0.0 && outside(p))),
        None => pred.iter().filter(|&&p| outside(p)).count(),
    }
}

fn normalizer(shape: (usize, usize), mask: Option<&ArrayView2<'_, f64>>) -> Result<f64> {
    match mask {
        Some(mask) => {
            let count = mask.sum();
            if count == 0.0 {
                return Err(LossError::EmptyMask);
            }
            Ok(count)
        }
        None => {
            let count = shape.0 * shape.1;
            if count == 0 {
                return Err(LossError::EmptyInput(shape));
            }
            Ok(count as f64)
        }
    }
}

/// Mean binary cross-entropy of `pred` against `label`, restricted to the
/// entries where `mask` is 1. Uses the default [`LossConfig`]: inputs are
/// validated and predictions are not clamped.
pub fn compute_masked_cross_entropy_loss(
    pred: ArrayView2<'_, f64>,
    label: ArrayView2<'_, f64>,
    mask: Option<ArrayView2<'_, f64>>,
) -> Result<f64> {
    MaskedCrossEntropy::default().compute(pred, label, mask)
}
