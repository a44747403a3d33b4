use crate::error::{LossError, Result};

/// Settings for the masked cross-entropy reducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossConfig {
    /// Reject predictions outside (0, 1) and labels/masks outside {0, 1}
    pub validate_domain: bool,

    /// Clamp predictions to [eps, 1 - eps] before taking logs
    pub clamp_epsilon: Option<f64>,
}

impl Default for LossConfig {
    fn default() -> Self {
        LossConfig {
            validate_domain: true,
            clamp_epsilon: None,
        }
    }
}

impl LossConfig {
    /// Skip domain checks. Boundary predictions then yield non-finite losses.
    pub fn unchecked() -> Self {
        LossConfig {
            validate_domain: false,
            clamp_epsilon: None,
        }
    }

    pub fn with_clamp_epsilon(mut self, epsilon: f64) -> Result<Self> {
        self.clamp_epsilon = Some(epsilon);
        self.check()?;
        Ok(self)
    }

    /// Reject a clamp epsilon outside (0, 0.5).
    pub fn check(&self) -> Result<()> {
        match self.clamp_epsilon {
            Some(eps) if !(eps > 0.0 && eps < 0.5) => Err(LossError::InvalidEpsilon(eps)),
            _ => Ok(()),
        }
    }
}
