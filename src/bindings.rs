//! Host-buffer adapter: converts flat row-major `&[f64]` buffers (the shape
//! a foreign-function or WASM boundary actually hands across) into the
//! internal `ndarray` types used throughout the rest of the crate, and back.
//!
//! This module knows nothing about any specific host runtime; it only
//! establishes the flat-buffer <-> `ndarray` seam.

use ndarray::{Array1, Array2};

use crate::error::IrtError;

/// Wraps a flat ability buffer as an `Array1`.
pub fn theta_from_slice(theta: &[f64]) -> Array1<f64> {
    Array1::from_vec(theta.to_vec())
}

/// Parses a flat row-major BRM parameter buffer (`m` rows of `(a, b, c)`).
pub fn brm_params_from_rowmajor(data: &[f64], m: usize) -> Result<Array2<f64>, IrtError> {
    if m == 0 {
        return Err(IrtError::EmptyInput("brm params require m >= 1".to_string()));
    }
    if data.len() != m * 3 {
        return Err(IrtError::DimensionMismatch(format!(
            "expected {} entries for {m} BRM rows, got {}",
            m * 3,
            data.len()
        )));
    }
    Array2::from_shape_vec((m, 3), data.to_vec())
        .map_err(|e| IrtError::DimensionMismatch(e.to_string()))
}

/// Parses a flat row-major GRM parameter buffer (`m` rows of `k` columns:
/// discrimination plus `k - 1` thresholds).
pub fn grm_params_from_rowmajor(data: &[f64], m: usize, k: usize) -> Result<Array2<f64>, IrtError> {
    if m == 0 {
        return Err(IrtError::EmptyInput("grm params require m >= 1".to_string()));
    }
    if k < 2 {
        return Err(IrtError::BadCategoryCount(format!(
            "category count must be >= 2, got {k}"
        )));
    }
    if data.len() != m * k {
        return Err(IrtError::DimensionMismatch(format!(
            "expected {} entries for {m} GRM rows of {k} columns, got {}",
            m * k,
            data.len()
        )));
    }
    Array2::from_shape_vec((m, k), data.to_vec())
        .map_err(|e| IrtError::DimensionMismatch(e.to_string()))
}

/// Parses a flat row-major response buffer, (n, m).
pub fn responses_from_rowmajor(data: &[f64], n: usize, m: usize) -> Result<Array2<f64>, IrtError> {
    if n == 0 || m == 0 {
        return Err(IrtError::EmptyInput("responses require n >= 1 and m >= 1".to_string()));
    }
    if data.len() != n * m {
        return Err(IrtError::DimensionMismatch(format!(
            "expected {} entries for a {n}x{m} response matrix, got {}",
            n * m,
            data.len()
        )));
    }
    Array2::from_shape_vec((n, m), data.to_vec())
        .map_err(|e| IrtError::DimensionMismatch(e.to_string()))
}

/// Flattens a matrix back into a row-major buffer.
pub fn to_rowmajor(matrix: &Array2<f64>) -> Vec<f64> {
    matrix.iter().copied().collect()
}

/// Flattens a vector back into a plain buffer.
pub fn to_slice(vector: &Array1<f64>) -> Vec<f64> {
    vector.iter().copied().collect()
}
