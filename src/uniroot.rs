//! Bracketed root finder: a direct port of the classic `zeroin` algorithm
//! (Forsythe/Malcolm/Moler's inverse-quadratic-interpolation + bisection
//! hybrid, as popularized by Brent and used by R's `uniroot`).
//!
//! The algorithm is ported as-is, including its exact sign bookkeeping and
//! its refusal to check or extend the bracket at entry — the caller is
//! responsible for supplying an interval that brackets a sign change.

/// Outcome of a bracketed root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnirootResult {
    /// The best approximation to the root found.
    pub root: f64,
    /// `f(root)`.
    pub f_root: f64,
    /// Number of iterations performed, or `-1` if the iteration cap was
    /// reached without converging (the root is still the best `b` found).
    pub iter: i64,
    /// Final bracket half-width, `|c - b|`.
    pub estim_prec: f64,
}

/// Default tolerance: `ε^(1/4)` where ε is `f64::EPSILON`.
pub fn default_tol() -> f64 {
    f64::EPSILON.powf(0.25)
}

/// Default iteration cap.
pub const DEFAULT_MAXIT: u32 = 1000;

/// Finds a root of `f` on `[lo, hi]` using the `zeroin` algorithm.
///
/// `tol` defaults to [`default_tol`] and `maxit` to [`DEFAULT_MAXIT`] when
/// `None`. No check is performed that `f(lo)` and `f(hi)` have opposite
/// signs; a caller that violates the bracket invariant gets whatever the
/// algorithm's bisection fallback converges to.
pub fn uniroot_lder1<F>(mut f: F, lo: f64, hi: f64, tol: Option<f64>, maxit: Option<u32>) -> UnirootResult
where
    F: FnMut(f64) -> f64,
{
    let tol = tol.unwrap_or_else(default_tol);
    let maxit = maxit.unwrap_or(DEFAULT_MAXIT);
    let eps = f64::EPSILON;

    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);
    let mut c = a;
    let mut fc = fa;

    if fa == 0.0 {
        return UnirootResult { root: a, f_root: fa, iter: 0, estim_prec: (b - a).abs() };
    }
    if fb == 0.0 {
        return UnirootResult { root: b, f_root: fb, iter: 0, estim_prec: (b - a).abs() };
    }

    for iter_num in 1..=maxit {
        let prev_step = b - a;

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol_act = 2.0 * eps * b.abs() + tol / 2.0;
        let mut new_step = (c - b) / 2.0;

        if new_step.abs() <= tol_act || fb == 0.0 {
            return UnirootResult {
                root: b,
                f_root: fb,
                iter: iter_num as i64,
                estim_prec: (c - b).abs(),
            };
        }

        if prev_step.abs() >= tol_act && fa.abs() > fb.abs() {
            let cb = c - b;

            let (mut p, mut q) = if a == c {
                let t1 = fb / fa;
                (cb * t1, 1.0 - t1)
            } else {
                let q0 = fa / fc;
                let t1 = fb / fc;
                let t2 = fb / fa;
                let p = t2 * (cb * q0 * (q0 - t1) - (b - a) * (t1 - 1.0));
                let q = (q0 - 1.0) * (t1 - 1.0) * (t2 - 1.0);
                (p, q)
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            if p < 0.75 * cb * q - (tol_act * q).abs() / 2.0 && p < (prev_step * q / 2.0).abs() {
                new_step = p / q;
            }
        }

        if new_step.abs() < tol_act {
            new_step = if new_step > 0.0 { tol_act } else { -tol_act };
        }

        a = b;
        fa = fb;
        b += new_step;
        fb = f(b);

        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
        }
    }

    UnirootResult {
        root: b,
        f_root: fb,
        iter: -1,
        estim_prec: (c - b).abs(),
    }
}
