mod config;
mod error;
mod loss;
mod utils;
mod validate;

pub use config::LossConfig;
pub use error::{LossError, Operand, Result};
pub use loss::{binary_cross_entropy_term, compute_masked_cross_entropy_loss, MaskedCrossEntropy};
pub use utils::select_by_mask;
