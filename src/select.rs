//! Category selector for stacked polytomous value matrices.
//!
//! Port of: sel.prm.R

use ndarray::Array2;

use crate::error::IrtError;

/// Selects, for each person/item, the value stored at the observed response
/// category from a stacked (M*K, J) value matrix `v`.
///
/// `u` is (N, J) response categories in `{1, ..., K}` (NaN for omitted).
/// `k` is the category count (K >= 2).
///
/// `single_person_as_items` reproduces a source asymmetry: when it is `true`
/// and `u` has exactly one row, the output instead has one row per item in
/// `v` (`T = v.nrows() / k`) rather than one row per person. Internal engines
/// in this crate always pass `false` — they need stable per-person indexing
/// even when processing a single person, and the ambiguous row-count
/// inference is a footgun better left to an explicit opt-in.
///
/// Output is (T, J), `T = if single_person_as_items && u.nrows() == 1 { v.nrows() / k } else { u.nrows() }`.
/// For output row `t`: `i = t mod u.nrows()`; for column `j`, let `cat = u[(i, j)]` truncated to
/// an integer (NaN maps to the sentinel -1). If `1 <= cat <= k`, the result is
/// `v[(t * k + (cat - 1), j)]`; otherwise it is NaN.
pub fn sel_prm(
    v: &Array2<f64>,
    u: &Array2<f64>,
    k: usize,
    single_person_as_items: bool,
) -> Result<Array2<f64>, IrtError> {
    let n = u.nrows();
    let j_cols = u.ncols();
    let m_rows = v.nrows();

    if k < 2 {
        return Err(IrtError::BadCategoryCount(format!(
            "category count must be >= 2, got {k}"
        )));
    }
    if n == 0 || j_cols == 0 || m_rows == 0 {
        return Err(IrtError::EmptyInput(
            "sel_prm requires non-empty u and v".to_string(),
        ));
    }
    if j_cols != v.ncols() {
        return Err(IrtError::DimensionMismatch(format!(
            "u has {} columns but v has {}",
            j_cols,
            v.ncols()
        )));
    }
    if m_rows % k != 0 {
        return Err(IrtError::DimensionMismatch(format!(
            "v has {m_rows} rows, not a multiple of K={k}"
        )));
    }
    if m_rows % n != 0 {
        return Err(IrtError::DimensionMismatch(format!(
            "v has {m_rows} rows, not a multiple of N={n}"
        )));
    }

    let t_rows = if single_person_as_items && n == 1 {
        m_rows / k
    } else {
        n
    };

    let mut result = Array2::<f64>::zeros((t_rows, j_cols));

    for t in 0..t_rows {
        let i = t % n;
        for j in 0..j_cols {
            let cat_f = u[[i, j]];
            let cat = if cat_f.is_nan() {
                -1
            } else {
                cat_f as i64
            };

            result[[t, j]] = if cat >= 1 && (cat as usize) <= k {
                v[[t * k + (cat as usize - 1), j]]
            } else {
                f64::NAN
            };
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn selects_the_observed_category_slot() {
        // 1 person, 1 item, K = 3: v stacks the 3 category values for the item.
        let v = array![[10.0], [20.0], [30.0]];
        let u = array![[2.0]];

        let result = sel_prm(&v, &u, 3, false).unwrap();
        assert_eq!(result.nrows(), 1);
        assert_eq!(result[[0, 0]], 20.0);
    }

    #[test]
    fn nan_response_produces_nan_output() {
        let v = array![[10.0], [20.0], [30.0]];
        let u = array![[f64::NAN]];

        let result = sel_prm(&v, &u, 3, false).unwrap();
        assert!(result[[0, 0]].is_nan());
    }

    #[test]
    fn out_of_range_category_produces_nan() {
        let v = array![[10.0], [20.0], [30.0]];
        let u = array![[4.0]];

        let result = sel_prm(&v, &u, 3, false).unwrap();
        assert!(result[[0, 0]].is_nan());
    }

    #[test]
    fn single_person_as_items_flag_changes_row_count() {
        // 3 items stacked (M=3), K=2, single person (N=1).
        let v = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]];
        let u = array![[1.0]];

        let legacy = sel_prm(&v, &u, 2, true).unwrap();
        assert_eq!(legacy.nrows(), 3); // M = 6/2

        let standard = sel_prm(&v, &u, 2, false).unwrap();
        assert_eq!(standard.nrows(), 1); // N
    }

    #[test]
    fn rejects_bad_category_count() {
        let v = array![[1.0]];
        let u = array![[1.0]];
        assert!(matches!(
            sel_prm(&v, &u, 1, false),
            Err(IrtError::BadCategoryCount(_))
        ));
    }

    #[test]
    fn rejects_mismatched_columns() {
        let v = array![[1.0, 2.0], [3.0, 4.0]];
        let u = array![[1.0]];
        assert!(matches!(
            sel_prm(&v, &u, 2, false),
            Err(IrtError::DimensionMismatch(_))
        ));
    }
}
