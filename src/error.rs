use thiserror::Error;

/// Errors reported while constructing a policy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    /// The resident-key budget was zero.
    #[error("budget must be greater than 0")]
    ZeroBudget,

    /// The hybrid learning rate was zero, negative, or not finite.
    #[error("learning rate must be finite and greater than 0, got {0}")]
    InvalidLearningRate(f64),
}
