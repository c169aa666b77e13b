use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The input could not be read or does not have the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A bounded loop ran out of budget before reaching a terminal state.
    #[error("simulation did not converge after {steps} steps")]
    DidNotConverge { steps: usize },
}

impl PuzzleError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
