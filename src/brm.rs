//! Binary Response Model (3-parameter logistic) probability kernels and
//! log-likelihood derivative engines.
//!
//! Port of: p.brm / pder1.brm / pder2.brm / lder1.brm / lder2.brm.

use ndarray::{Array1, Array2, Axis};

use crate::types::LderType;

/// Item response probability matrix for BRM items.
///
/// `theta` has length N, `params` is (M, 3) with columns (a, b, c).
/// Returns an (N, M) matrix of `P(θ_i, item_j) = c_j + (1 - c_j) * σ(a_j(θ_i - b_j))`.
pub fn p(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let mut result = Array2::<f64>::zeros((n, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];
            let b = params[[j, 1]];
            let c = params[[j, 2]];
            let p_exp = (-a * (theta[i] - b)).exp();
            result[[i, j]] = c + (1.0 - c) / (1.0 + p_exp);
        }
    }

    result
}

/// First derivative of the BRM probability matrix with respect to θ.
///
/// `P'_ij = (1 - c_j) * a_j * p * (1 - p)` where `p = σ(a_j(θ_i - b_j))`.
pub fn p_der1(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let mut result = Array2::<f64>::zeros((n, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];
            let b = params[[j, 1]];
            let c = params[[j, 2]];
            let p_exp = (-a * (theta[i] - b)).exp();
            let p_val = 1.0 / (1.0 + p_exp);
            result[[i, j]] = (1.0 - c) * a * p_val * (1.0 - p_val);
        }
    }

    result
}

/// Second derivative of the BRM probability matrix with respect to θ.
///
/// Uses the alternate `e^{+z}` parameterization deliberately — `lder2` and
/// the observed-information formulas depend on this exact cancellation
/// pattern at extreme θ, so it is not simplified to match `p_der1`'s form.
pub fn p_der2(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let mut result = Array2::<f64>::zeros((n, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];
            let b = params[[j, 1]];
            let c = params[[j, 2]];
            let p_exp = (a * (theta[i] - b)).exp();
            let p_val = p_exp / (1.0 + p_exp);
            let p_der1_raw = (1.0 - c) * a * p_val * (1.0 - p_val);
            result[[i, j]] = a * (1.0 - p_exp) * (1.0 - p_val) * p_der1_raw;
        }
    }

    result
}

/// First derivative of the log-likelihood for each person, for BRM items.
///
/// `u` is (N, M) responses, `theta` is length N, `params` is (M, 3).
/// With `ltype = Wle`, adds Warm's bias-correction term to the raw MLE score
/// before summing across items.
pub fn lder1(u: &Array2<f64>, theta: &Array1<f64>, params: &Array2<f64>, ltype: LderType) -> Array1<f64> {
    let n = theta.len();
    let m = params.nrows();

    let prob = p(theta, params);
    let pd1 = p_der1(theta, params);

    let mut score = Array2::<f64>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            let pij = prob[[i, j]];
            let qij = 1.0 - pij;
            score[[i, j]] = (u[[i, j]] - pij) * pd1[[i, j]] / (pij * qij);
        }
    }

    if ltype == LderType::Wle {
        let pd2 = p_der2(theta, params);

        let mut info = Array1::<f64>::zeros(n);
        for i in 0..n {
            for j in 0..m {
                let pij = prob[[i, j]];
                let qij = 1.0 - pij;
                info[i] += pd1[[i, j]].powi(2) / (pij * qij);
            }
        }

        for i in 0..n {
            for j in 0..m {
                let pij = prob[[i, j]];
                let qij = 1.0 - pij;
                let h = pd1[[i, j]] * pd2[[i, j]] / (pij * qij);
                score[[i, j]] += h / (2.0 * info[i]);
            }
        }
    }

    score.sum_axis(Axis(1))
}

/// Second derivative of the log-likelihood, elementwise per (person, item), for BRM items.
pub fn lder2(u: &Array2<f64>, theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();

    let prob = p(theta, params);
    let pd1 = p_der1(theta, params);
    let pd2 = p_der2(theta, params);

    let mut result = Array2::<f64>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            let pij = prob[[i, j]];
            let qij = 1.0 - pij;
            let d1 = pd1[[i, j]];
            let d2 = pd2[[i, j]];

            let term_correct = -d1.powi(2) / pij.powi(2) + d2 / pij;
            let term_incorrect = d1.powi(2) / qij.powi(2) + d2 / qij;

            result[[i, j]] = u[[i, j]] * term_correct - (1.0 - u[[i, j]]) * term_incorrect;
        }
    }

    result
}
