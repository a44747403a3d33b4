//! Error types for masked loss computation

/// Result type for loss computation
pub type Result<T> = std::result::Result<T, LossError>;

/// Array the error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Pred,
    Label,
    Mask,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operand::Pred => "pred",
            Operand::Label => "label",
            Operand::Mask => "mask",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while reducing a masked loss
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LossError {
    /// Label or mask shape differs from the prediction shape
    #[error("shape mismatch: {operand} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        operand: Operand,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Mask was supplied but marks no entry as valid
    #[error("mask has no valid entries")]
    EmptyMask,

    /// Arrays have zero entries and no mask was supplied
    #[error("cannot reduce loss over an empty array of shape {0:?}")]
    EmptyInput((usize, usize)),

    /// An entry lies outside the domain its array allows
    #[error("{operand}[{row}, {col}] = {value} is outside the allowed domain")]
    DomainViolation {
        operand: Operand,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Clamping epsilon must lie in (0, 0.5)
    #[error("invalid clamp epsilon {0}: must lie in (0, 0.5)")]
    InvalidEpsilon(f64),
}
