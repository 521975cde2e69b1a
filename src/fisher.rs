//! Fisher Information aggregation for BRM and GRM items.
//!
//! Port of: FI.brm.R / FI.grm.R

use ndarray::{Array1, Array2, Axis};

use crate::error::IrtError;
use crate::types::FiKind;
use crate::{brm, grm};

/// Result of a Fisher information computation.
#[derive(Debug, Clone)]
pub struct FiResult {
    /// Per-person, per-item information, (N, M).
    pub item: Array2<f64>,
    /// Test information per person: `test_i = Σ_j item[i,j]`, length N.
    pub test: Array1<f64>,
    /// Standard error of measurement per person: `sem_i = 1/√test_i`, length N.
    pub sem: Array1<f64>,
    /// Which kind of information was requested.
    pub kind: FiKind,
}

fn finish(item: Array2<f64>, kind: FiKind) -> FiResult {
    let test = item.sum_axis(Axis(1));
    let sem = test.mapv(|t| 1.0 / t.sqrt());
    FiResult { item, test, sem, kind }
}

/// Fisher information for BRM items.
///
/// `resp` must be `None` for [`FiKind::Expected`] and `Some` for
/// [`FiKind::Observed`].
pub fn fi_brm(
    theta: &Array1<f64>,
    params: &Array2<f64>,
    kind: FiKind,
    resp: Option<&Array2<f64>>,
) -> Result<FiResult, IrtError> {
    match kind {
        FiKind::Expected => {
            if resp.is_some() {
                return Err(IrtError::ExpectedWithResponses);
            }
            let p = brm::p(theta, params);
            let pd1 = brm::p_der1(theta, params);
            let item = &pd1 * &pd1 / (&p * &(1.0 - &p));
            Ok(finish(item, kind))
        }
        FiKind::Observed => {
            let resp = resp.ok_or(IrtError::ObservedWithoutResponses)?;
            let item = -brm::lder2(resp, theta, params);
            Ok(finish(item, kind))
        }
    }
}

/// Fisher information for GRM items.
///
/// `resp` must be `None` for [`FiKind::Expected`] and `Some` for
/// [`FiKind::Observed`].
pub fn fi_grm(
    theta: &Array1<f64>,
    params: &Array2<f64>,
    kind: FiKind,
    resp: Option<&Array2<f64>>,
) -> Result<FiResult, IrtError> {
    match kind {
        FiKind::Expected => {
            if resp.is_some() {
                return Err(IrtError::ExpectedWithResponses);
            }
            let n = theta.len();
            let m = params.nrows();
            let k = grm::category_count(params);

            let p = grm::p(theta, params);
            let pd1 = grm::p_der1(theta, params);

            let mut item = Array2::<f64>::zeros((n, m));
            for i in 0..n {
                for j in 0..m {
                    let mut acc = 0.0;
                    for slot in 0..k {
                        let row = i * k + slot;
                        acc += pd1[[row, j]].powi(2) / p[[row, j]];
                    }
                    item[[i, j]] = acc;
                }
            }
            Ok(finish(item, kind))
        }
        FiKind::Observed => {
            let resp = resp.ok_or(IrtError::ObservedWithoutResponses)?;
            let item = -grm::lder2(resp, theta, params)?;
            Ok(finish(item, kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn expected_rejects_responses() {
        let theta = array![0.0];
        let params = array![[1.0, 0.0, 0.0]];
        let resp = array![[1.0]];

        let err = fi_brm(&theta, &params, FiKind::Expected, Some(&resp)).unwrap_err();
        assert!(matches!(err, IrtError::ExpectedWithResponses));
    }

    #[test]
    fn observed_requires_responses() {
        let theta = array![0.0];
        let params = array![[1.0, 0.0, 0.0]];

        let err = fi_brm(&theta, &params, FiKind::Observed, None).unwrap_err();
        assert!(matches!(err, IrtError::ObservedWithoutResponses));
    }

    #[test]
    fn sem_is_inverse_sqrt_of_test() {
        let theta = array![0.5, -0.3];
        let params = array![[1.0, 0.0, 0.0], [1.2, 0.3, 0.1]];

        let result = fi_brm(&theta, &params, FiKind::Expected, None).unwrap();
        for i in 0..theta.len() {
            let expected_sem = 1.0 / result.test[i].sqrt();
            assert!((result.sem[i] - expected_sem).abs() < 1e-12);
        }
    }

    #[test]
    fn expected_matches_closed_form_sum() {
        let theta = array![0.5];
        let params = array![[1.0, 0.0, 0.0], [1.2, 0.3, 0.1]];

        let result = fi_brm(&theta, &params, FiKind::Expected, None).unwrap();

        let p = brm::p(&theta, &params);
        let pd1 = brm::p_der1(&theta, &params);
        let mut expected_test = 0.0;
        for j in 0..2 {
            let pij = p[[0, j]];
            expected_test += pd1[[0, j]].powi(2) / (pij * (1.0 - pij));
        }
        assert!((result.test[0] - expected_test).abs() < 1e-12);
    }

    #[test]
    fn observed_equals_negative_lder2_s6() {
        let theta = array![0.3, -0.2];
        let params = array![[1.0, 0.0, 0.0], [1.3, -0.4, 0.15]];
        let resp = array![[1.0, 0.0], [0.0, 1.0]];

        let result = fi_brm(&theta, &params, FiKind::Observed, Some(&resp)).unwrap();
        let l2 = brm::lder2(&resp, &theta, &params);

        for i in 0..2 {
            for j in 0..2 {
                assert!((result.item[[i, j]] - (-l2[[i, j]])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn grm_expected_slots_are_finite_and_positive() {
        let theta = array![0.1];
        let params = array![[1.0, -1.0, 0.0, 1.0]];

        let result = fi_grm(&theta, &params, FiKind::Expected, None).unwrap();
        assert!(result.test[0].is_finite());
        assert!(result.test[0] > 0.0);
    }
}
