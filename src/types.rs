/// Which term the log-likelihood derivative engines compute: the raw
/// maximum-likelihood score, or Warm's weighted-likelihood score (MLE score
/// plus the bias-correction term).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LderType {
    /// Maximum likelihood: plain score, no correction.
    Mle,
    /// Warm's weighted likelihood: score plus `H / (2I)` correction.
    Wle,
}

/// Which flavor of Fisher information `fi` should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiKind {
    /// Expected information, `E[(∂ℓ/∂θ)²]`; takes no responses.
    Expected,
    /// Observed information, `−∂²ℓ/∂θ²`; requires responses.
    Observed,
}

/// Which item response family a set of parameters belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Dichotomous 3-parameter logistic (Binary Response Model).
    Brm,
    /// Polytomous graded response model.
    Grm,
}
