// src/nmf/solver.rs

//! Coordinate-descent solvers for `min ||X - W H||² s.t. W, H ≥ 0`.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};

use crate::ops::EPS;

/// How a fit ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub n_iter: usize,
    pub reconstruction_error: f64,
    pub converged: bool,
}

/// Frobenius norm of `X - W H`.
pub fn reconstruction_error(x: &ArrayView2<f64>, w: &ArrayView2<f64>, h: &ArrayView2<f64>) -> f64 {
    let residual = x - &w.dot(h);
    residual.mapv(|a| a * a).sum().sqrt()
}

/// One HALS sweep over the columns of `w` with `h` fixed.
///
/// `xht` is `X Hᵀ` and `hht` is `H Hᵀ`. Rows are updated in place, so later
/// components see the already-updated earlier ones.
fn update_factor(w: &mut Array2<f64>, xht: &Array2<f64>, hht: &Array2<f64>) {
    let k = hht.nrows();
    for c in 0..k {
        let denom = hht[[c, c]];
        if denom <= EPS {
            continue;
        }
        for i in 0..w.nrows() {
            let mut num = xht[[i, c]];
            for j in 0..k {
                num -= w[[i, j]] * hht[[j, c]];
            }
            w[[i, c]] = (w[[i, c]] + num / denom).max(0.0);
        }
    }
}

/// Alternating HALS updates of `w` and `h` until the relative drop in
/// reconstruction error falls below `tol`.
pub fn fit_hals(
    x: &ArrayView2<f64>,
    w: &mut Array2<f64>,
    h: &mut Array2<f64>,
    max_iter: usize,
    tol: f64,
) -> FitReport {
    let initial = reconstruction_error(x, &w.view(), &h.view());
    let mut previous = initial;

    for iter in 1..=max_iter {
        let hht = h.dot(&h.t());
        let xht = x.dot(&h.t());
        update_factor(w, &xht, &hht);

        // the H update is the same sweep on the transposed problem
        let wtw = w.t().dot(&*w);
        let xtw = x.t().dot(&*w);
        let mut ht = h.t().to_owned();
        update_factor(&mut ht, &xtw, &wtw);
        h.assign(&ht.t());

        let error = reconstruction_error(x, &w.view(), &h.view());
        if error <= EPS || (previous - error).abs() <= tol * initial.max(EPS) {
            tracing::debug!(iter, error, "nmf fit converged");
            return FitReport {
                n_iter: iter,
                reconstruction_error: error,
                converged: true,
            };
        }
        previous = error;
    }

    FitReport {
        n_iter: max_iter,
        reconstruction_error: previous,
        converged: false,
    }
}

/// Non-negative least squares for one row: `min ||x - w H||²` over `w ≥ 0`.
///
/// A row with any NaN has no meaningful histogram and projects to NaN.
fn nnls_row(
    x: &ArrayView1<f64>,
    h: &ArrayView2<f64>,
    hht: &Array2<f64>,
    mut out: ArrayViewMut1<f64>,
    max_iter: usize,
    tol: f64,
) {
    if x.iter().any(|v| v.is_nan()) {
        out.fill(f64::NAN);
        return;
    }

    let k = h.nrows();
    let hx: Array1<f64> = h.dot(x);
    let mut w = Array1::<f64>::zeros(k);

    for _ in 0..max_iter {
        let mut max_step = 0.0_f64;
        for c in 0..k {
            let denom = hht[[c, c]];
            if denom <= EPS {
                continue;
            }
            let grad = hx[c] - hht.row(c).dot(&w);
            let updated = (w[c] + grad / denom).max(0.0);
            max_step = max_step.max((updated - w[c]).abs());
            w[c] = updated;
        }
        let scale = w.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        if max_step <= tol * scale {
            break;
        }
    }

    out.assign(&w);
}

/// Projects every row of `x` onto the fixed components `h`.
pub fn transform_rows(x: &ArrayView2<f64>, h: &ArrayView2<f64>, max_iter: usize, tol: f64) -> Array2<f64> {
    let hht = h.dot(&h.t());
    let mut out = Array2::zeros((x.nrows(), h.nrows()));
    let zip = Zip::from(out.rows_mut()).and(x.rows());

    #[cfg(feature = "parallel")]
    zip.par_for_each(|row_out, row| nnls_row(&row, h, &hht, row_out, max_iter, tol));

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|row_out, row| nnls_row(&row, h, &hht, row_out, max_iter, tol));

    out
}
