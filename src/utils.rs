use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Operand, Result};
use crate::validate;

/// Keep the `pred` and `label` entries whose mask is non-zero.
///
/// Entries are taken in row-major order and returned as two arrays of shape
/// (1, k), k being the number of selected entries. The unmasked loss over the
/// returned pair equals the masked loss over the inputs.
///
/// ```
/// use ndarray::array;
/// use masked_bce::select_by_mask;
///
/// let pred = array![[0.9, 0.3, 0.5], [0.1, 0.4, 0.6]];
/// let label = array![[1., 0., 0.], [0., 1., 1.]];
/// let mask = array![[1., 1., 0.], [0., 0., 1.]];
///
/// let (pred, label) = select_by_mask(pred.view(), label.view(), mask.view()).unwrap();
/// assert_eq!(pred, array![[0.9, 0.3, 0.6]]);
/// assert_eq!(label, array![[1., 0., 1.]]);
/// ```
pub fn select_by_mask(
    pred: ArrayView2<'_, f64>,
    label: ArrayView2<'_, f64>,
    mask: ArrayView2<'_, f64>,
) -> Result<(Array2<f64>, Array2<f64>)> {
    let shape = pred.dim();
    validate::check_shape(Operand::Label, shape, &label)?;
    validate::check_shape(Operand::Mask, shape, &mask)?;

    let (selected_pred, selected_label): (Vec<f64>, Vec<f64>) = pred
        .iter()
        .zip(label.iter())
        .zip(mask.iter())
        .filter(|(_, m)| **m != 0.0)
        .map(|((&p, &l), _)| (p, l))
        .unzip();

    Ok((as_row(selected_pred), as_row(selected_label)))
}

fn as_row(values: Vec<f64>) -> Array2<f64> {
    Array1::from_vec(values).insert_axis(Axis(0))
}
