use thiserror::Error;

/// Error types for the catirt library.
#[derive(Error, Debug)]
pub enum IrtError {
    /// Error thrown when input dimensions (shapes) do not match expectation.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error thrown when a polytomous category count is invalid (K < 2).
    #[error("Bad category count: {0}")]
    BadCategoryCount(String),

    /// Error thrown when a required dimension (N, M, or J) is zero.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Error thrown when `resp` contains a non-finite value where finiteness is required.
    #[error("Responses must be finite")]
    NonFiniteResponses,

    /// Error thrown when `params` contains a non-finite value.
    #[error("Item parameters must be finite")]
    NonFiniteParams,

    /// Error thrown when `range` does not straddle zero (range[0] < 0 < range[1]).
    #[error("Bad range: {0}")]
    BadRange(String),

    /// Error thrown when Fisher information of kind EXPECTED is requested with non-empty responses.
    #[error("Expected Fisher information does not take responses")]
    ExpectedWithResponses,

    /// Error thrown when Fisher information of kind OBSERVED is requested without responses.
    #[error("Observed Fisher information requires responses")]
    ObservedWithoutResponses,
}
