use ndarray::ArrayView2;

use crate::error::{LossError, Operand, Result};

pub(crate) fn check_shape(
    operand: Operand,
    expected: (usize, usize),
    values: &ArrayView2<'_, f64>,
) -> Result<()> {
    let found = values.dim();
    if found != expected {
        return Err(LossError::ShapeMismatch {
            operand,
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn is_binary(value: f64) -> bool {
    value == 0.0 || value == 1.0
}

/// Predictions must be strictly inside (0, 1), or inside [0, 1] when they
/// will be clamped afterwards. NaN fails both.
pub(crate) fn is_probability(value: f64, clamped: bool) -> bool {
    if clamped {
        (0.0..=1.0).contains(&value)
    } else {
        value > 0.0 && value < 1.0
    }
}

/// Find the first entry, in row-major order, that `allowed` rejects. Entries
/// the mask excludes are skipped.
pub(crate) fn check_domain<F>(
    operand: Operand,
    values: &ArrayView2<'_, f64>,
    mask: Option<&ArrayView2<'_, f64>>,
    allowed: F,
) -> Result<()>
where
    F: Fn(f64) -> bool,
{
    for ((row, col), &value) in values.indexed_iter() {
        let selected = mask.map_or(true, |m| m[[row, col]] != 0.0);
        if selected && !allowed(value) {
            return Err(LossError::DomainViolation {
                operand,
                row,
                col,
                value,
            });
        }
    }
    Ok(())
}
