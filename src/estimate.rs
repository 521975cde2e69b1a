//! Ability estimation driver: composes the root finder, derivative engines,
//! and Fisher information into a single per-person WLE/MLE pipeline.
//!
//! Port of: wle.est.R

use ndarray::{s, Array1, Array2};

use crate::error::IrtError;
use crate::fisher;
use crate::types::{FiKind, LderType, ModelType};
use crate::uniroot::uniroot_lder1;
use crate::{brm, grm};

/// Per-person ability estimates.
#[derive(Debug, Clone)]
pub struct EstResult {
    /// Estimated ability, clamped to the caller's range.
    pub theta: Array1<f64>,
    /// Observed Fisher information at the estimate.
    pub info: Array1<f64>,
    /// Standard error of measurement, Warm-corrected.
    pub sem: Array1<f64>,
}

fn validate(resp: &Array2<f64>, params: &Array2<f64>, range: (f64, f64)) -> Result<(), IrtError> {
    if resp.iter().any(|v| !v.is_finite()) {
        return Err(IrtError::NonFiniteResponses);
    }
    if params.iter().any(|v| !v.is_finite()) {
        return Err(IrtError::NonFiniteParams);
    }
    if resp.ncols() != params.nrows() {
        return Err(IrtError::DimensionMismatch(format!(
            "resp has {} columns but params has {} rows",
            resp.ncols(),
            params.nrows()
        )));
    }
    let (lo, hi) = range;
    if !(lo < 0.0 && 0.0 < hi) {
        return Err(IrtError::BadRange(format!(
            "range must straddle zero, got [{lo}, {hi}]"
        )));
    }
    Ok(())
}

fn score_wle(model: ModelType, u_row: &Array2<f64>, params: &Array2<f64>, theta: f64) -> f64 {
    let theta_arr = Array1::from_elem(1, theta);
    match model {
        ModelType::Brm => brm::lder1(u_row, &theta_arr, params, LderType::Wle)[0],
        ModelType::Grm => grm::lder1(u_row, &theta_arr, params, LderType::Wle)
            .expect("dimensions validated in wle_est")[0],
    }
}

fn score_mle(model: ModelType, u_row: &Array2<f64>, params: &Array2<f64>, theta: f64) -> f64 {
    let theta_arr = Array1::from_elem(1, theta);
    match model {
        ModelType::Brm => brm::lder1(u_row, &theta_arr, params, LderType::Mle)[0],
        ModelType::Grm => grm::lder1(u_row, &theta_arr, params, LderType::Mle)
            .expect("dimensions validated in wle_est")[0],
    }
}

fn observed_info(model: ModelType, u_row: &Array2<f64>, params: &Array2<f64>, theta: f64) -> f64 {
    let theta_arr = Array1::from_elem(1, theta);
    let result = match model {
        ModelType::Brm => fisher::fi_brm(&theta_arr, params, FiKind::Observed, Some(u_row)),
        ModelType::Grm => fisher::fi_grm(&theta_arr, params, FiKind::Observed, Some(u_row)),
    }
    .expect("dimensions validated in wle_est");
    result.test[0]
}

fn wle_est_inner(
    model: ModelType,
    resp: &Array2<f64>,
    params: &Array2<f64>,
    range: (f64, f64),
    tol: Option<f64>,
    maxit: Option<u32>,
) -> Result<(EstResult, Array1<i64>), IrtError> {
    validate(resp, params, range)?;
    let (lo, hi) = range;
    let n = resp.nrows();

    let mut theta = Array1::<f64>::zeros(n);
    let mut info = Array1::<f64>::zeros(n);
    let mut sem = Array1::<f64>::zeros(n);
    let mut iter = Array1::<i64>::zeros(n);

    for i in 0..n {
        let u_row = resp.slice(s![i..i + 1, ..]).to_owned();

        let root_result = uniroot_lder1(|theta| score_wle(model, &u_row, params, theta), lo, hi, tol, maxit);
        let theta_hat = root_result.root;
        iter[i] = root_result.iter;

        let d_i = score_wle(model, &u_row, params, theta_hat) - score_mle(model, &u_row, params, theta_hat);

        let clamped = theta_hat.clamp(lo, hi);
        theta[i] = clamped;

        let info_i = observed_info(model, &u_row, params, clamped);
        info[i] = info_i;
        sem[i] = ((info_i + d_i.powi(2)) / info_i.powi(2)).sqrt();
    }

    Ok((EstResult { theta, info, sem }, iter))
}

/// Estimates ability for each person via Warm's weighted likelihood.
///
/// `resp` is (N, M) and must contain only finite values; `params` is (M, 3)
/// for [`ModelType::Brm`] or (M, K) for [`ModelType::Grm`] and must also be
/// finite. `range = (lo, hi)` must straddle zero and bounds both the root
/// search and the final clamped estimate.
pub fn wle_est(
    model: ModelType,
    resp: &Array2<f64>,
    params: &Array2<f64>,
    range: (f64, f64),
    tol: Option<f64>,
    maxit: Option<u32>,
) -> Result<EstResult, IrtError> {
    wle_est_inner(model, resp, params, range, tol, maxit).map(|(result, _)| result)
}

/// Like [`wle_est`], but also returns the per-person root-finder iteration
/// count (`-1` where the search did not converge within `maxit`).
pub fn wle_est_with_diagnostics(
    model: ModelType,
    resp: &Array2<f64>,
    params: &Array2<f64>,
    range: (f64, f64),
    tol: Option<f64>,
    maxit: Option<u32>,
) -> Result<(EstResult, Array1<i64>), IrtError> {
    wle_est_inner(model, resp, params, range, tol, maxit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn brm_perfect_discriminator_centers_near_zero_s2() {
        let params = array![
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
        ];
        let resp = array![[1.0, 1.0, 1.0, 0.0, 0.0]];

        let result = wle_est(ModelType::Brm, &resp, &params, (-4.0, 4.0), None, None).unwrap();

        assert!((result.theta[0]).abs() < 1e-3);
        assert!(result.sem[0].is_finite());
        assert!(result.sem[0] > 0.0);
        assert!(result.info[0] > 0.0);
    }

    #[test]
    fn rejects_non_finite_responses() {
        let params = array![[1.0, 0.0, 0.0]];
        let resp = array![[f64::NAN]];

        let err = wle_est(ModelType::Brm, &resp, &params, (-4.0, 4.0), None, None).unwrap_err();
        assert!(matches!(err, IrtError::NonFiniteResponses));
    }

    #[test]
    fn rejects_non_finite_params() {
        let params = array![[1.0, f64::NAN, 0.0]];
        let resp = array![[1.0]];

        let err = wle_est(ModelType::Brm, &resp, &params, (-4.0, 4.0), None, None).unwrap_err();
        assert!(matches!(err, IrtError::NonFiniteParams));
    }

    #[test]
    fn rejects_bad_range() {
        let params = array![[1.0, 0.0, 0.0]];
        let resp = array![[1.0]];

        let err = wle_est(ModelType::Brm, &resp, &params, (0.0, 4.0), None, None).unwrap_err();
        assert!(matches!(err, IrtError::BadRange(_)));
    }

    #[test]
    fn clamps_theta_to_range_s10() {
        // Every item answered correctly against easy items should push theta
        // to the upper bound of a tight range.
        let params = array![[1.0, -5.0, 0.0], [1.0, -5.0, 0.0], [1.0, -5.0, 0.0]];
        let resp = array![[1.0, 1.0, 1.0]];

        let result = wle_est(ModelType::Brm, &resp, &params, (-1.0, 1.0), None, None).unwrap();
        assert!(result.theta[0] <= 1.0 && result.theta[0] >= -1.0);
    }

    #[test]
    fn is_invariant_under_item_permutation_s9() {
        let params = array![[1.0, 0.0, 0.0], [1.2, 0.5, 0.1], [0.9, -0.3, 0.05]];
        let resp = array![[1.0, 0.0, 1.0]];

        let result_a = wle_est(ModelType::Brm, &resp, &params, (-4.0, 4.0), None, None).unwrap();

        let params_perm = array![[0.9, -0.3, 0.05], [1.0, 0.0, 0.0], [1.2, 0.5, 0.1]];
        let resp_perm = array![[1.0, 1.0, 0.0]];
        let result_b = wle_est(ModelType::Brm, &resp_perm, &params_perm, (-4.0, 4.0), None, None).unwrap();

        assert!((result_a.theta[0] - result_b.theta[0]).abs() < 1e-8);
    }

    #[test]
    fn diagnostics_report_per_person_iteration_counts() {
        let params = array![[1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let resp = array![[1.0, 0.0], [0.0, 1.0]];

        let (result, iter) = wle_est_with_diagnostics(ModelType::Brm, &resp, &params, (-4.0, 4.0), None, None).unwrap();
        assert_eq!(iter.len(), 2);
        assert_eq!(result.theta.len(), 2);
        for &it in iter.iter() {
            assert!(it >= 0);
        }
    }

    #[test]
    fn grm_estimates_are_finite() {
        let params = array![[1.0, -1.0, 0.0, 1.0]];
        let resp = array![[3.0]];

        let result = wle_est(ModelType::Grm, &resp, &params, (-4.0, 4.0), None, None).unwrap();
        assert!(result.theta[0].is_finite());
        assert!(result.sem[0].is_finite());
    }
}
