//! Graded Response Model (polytomous) probability kernels and
//! log-likelihood derivative engines.
//!
//! Port of: p.grm / pder1.grm / pder2.grm / lder1.grm / lder2.grm.
//!
//! Probabilities are returned in the stacked (N*K, M) layout: rows
//! `[i*K, i*K+K)` hold the K category probabilities for person `i`, item
//! columns run 0..M. Each such (K-row) column block sums to 1 by construction.

use ndarray::{Array1, Array2};

use crate::error::IrtError;
use crate::select::sel_prm;
use crate::types::LderType;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Number of ordered categories implied by a GRM parameter matrix: one
/// discrimination column plus K-1 threshold columns.
pub fn category_count(params: &Array2<f64>) -> usize {
    params.ncols()
}

/// Category probability matrix for GRM items, stacked (N*K, M).
///
/// `params` is (M, K): column 0 is discrimination `a`, columns `1..K` are
/// the K-1 ordered thresholds `b_1..b_{K-1}`.
pub fn p(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let k = category_count(params);

    let mut result = Array2::<f64>::zeros((n * k, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];

            // P*_0 = 1, P*_K = 0, interior P*_k = sigma(a*(theta - b_k)).
            let mut p_star = vec![0.0_f64; k + 1];
            p_star[0] = 1.0;
            p_star[k] = 0.0;
            for kk in 1..k {
                let b_k = params[[j, kk]];
                p_star[kk] = sigmoid(a * (theta[i] - b_k));
            }

            for slot in 0..k {
                result[[i * k + slot, j]] = p_star[slot] - p_star[slot + 1];
            }
        }
    }

    result
}

/// First derivative of the GRM category probability matrix, stacked (N*K, M).
pub fn p_der1(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let k = category_count(params);

    let mut result = Array2::<f64>::zeros((n * k, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];

            let mut p_star_der1 = vec![0.0_f64; k + 1];
            for kk in 1..k {
                let b_k = params[[j, kk]];
                let sig = sigmoid(a * (theta[i] - b_k));
                p_star_der1[kk] = a * sig * (1.0 - sig);
            }

            for slot in 0..k {
                result[[i * k + slot, j]] = p_star_der1[slot] - p_star_der1[slot + 1];
            }
        }
    }

    result
}

/// Second derivative of the GRM category probability matrix, stacked (N*K, M).
pub fn p_der2(theta: &Array1<f64>, params: &Array2<f64>) -> Array2<f64> {
    let n = theta.len();
    let m = params.nrows();
    let k = category_count(params);

    let mut result = Array2::<f64>::zeros((n * k, m));

    for i in 0..n {
        for j in 0..m {
            let a = params[[j, 0]];

            let mut p_star_der2 = vec![0.0_f64; k + 1];
            for kk in 1..k {
                let b_k = params[[j, kk]];
                let sig = sigmoid(a * (theta[i] - b_k));
                p_star_der2[kk] = a * a * sig * (1.0 - sig) * (1.0 - 2.0 * sig);
            }

            for slot in 0..k {
                result[[i * k + slot, j]] = p_star_der2[slot] - p_star_der2[slot + 1];
            }
        }
    }

    result
}

/// First derivative of the log-likelihood for each person, for GRM items.
///
/// `u` is (N, M) responses in `{1, ..., K}` (NaN for omitted). A person with
/// any omitted response gets a NaN score — see the module-level NaN policy
/// note below.
///
/// # NaN policy
///
/// `sel_prm` places NaN wherever a response is omitted or invalid; summing a
/// row that contains NaN produces NaN, so that person's entire score,
/// uniroot search, and downstream ability estimate become NaN. This is
/// intentional: callers who want partial credit for omitted items must
/// filter those items out of `u`/`params` before calling.
pub fn lder1(u: &Array2<f64>, theta: &Array1<f64>, params: &Array2<f64>, ltype: LderType) -> Result<Array1<f64>, IrtError> {
    let n = theta.len();
    let m = params.nrows();
    let k = category_count(params);

    let prob = p(theta, params);
    let pd1 = p_der1(theta, params);

    let ratio = &pd1 / &prob;
    let mle_matrix = sel_prm(&ratio, u, k, false)?;
    let mut score = mle_matrix.sum_axis(ndarray::Axis(1));

    if ltype == LderType::Wle {
        let pd2 = p_der2(theta, params);

        for i in 0..n {
            let mut info_i = 0.0;
            let mut h_i = 0.0;
            for j in 0..m {
                for slot in 0..k {
                    let row = i * k + slot;
                    let p_val = prob[[row, j]];
                    let d1 = pd1[[row, j]];
                    let d2 = pd2[[row, j]];
                    info_i += d1.powi(2) / p_val;
                    h_i += d1 * d2 / p_val;
                }
            }
            score[i] += h_i / (2.0 * info_i);
        }
    }

    Ok(score)
}

/// Second derivative of the log-likelihood, selected per observed category, for GRM items.
///
/// Returns an (N, M) matrix: column j, row i holds `sel_prm(L, u, K)[i, j]`
/// where `L = -p'^2/p^2 + p''/p` on the stacked (N*K, M) matrices.
pub fn lder2(u: &Array2<f64>, theta: &Array1<f64>, params: &Array2<f64>) -> Result<Array2<f64>, IrtError> {
    let k = category_count(params);

    let prob = p(theta, params);
    let pd1 = p_der1(theta, params);
    let pd2 = p_der2(theta, params);

    let l = (-(&pd1 * &pd1) / (&prob * &prob)) + &pd2 / &prob;

    sel_prm(&l, u, k, false)
}
