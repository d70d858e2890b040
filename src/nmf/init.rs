// src/nmf/init.rs

//! NNDSVD initialization (Boutsidis & Gallopoulos, 2008).
//!
//! The same input always produces the same factors; the `NndsvdAr` variant draws
//! its fill values from a seeded generator.

use ndarray::{s, Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::svd::truncated_svd;
use crate::config::Init;
use crate::ops::{l2_norm, negative_part, positive_part, EPS};

/// Initial `(W, H)` for `x ≈ W H` with `W: (m, k)` and `H: (k, n)`.
pub fn initialize(x: &ArrayView2<f64>, k: usize, init: Init) -> (Array2<f64>, Array2<f64>) {
    let (mut w, mut h) = nndsvd(x, k);
    let avg = x.mean().unwrap_or(0.0);

    match init {
        Init::Nndsvd => {}
        Init::NndsvdA => {
            w.mapv_inplace(|a| if a == 0.0 { avg } else { a });
            h.mapv_inplace(|a| if a == 0.0 { avg } else { a });
        }
        Init::NndsvdAr { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            w.mapv_inplace(|a| if a == 0.0 { avg * rng.gen::<f64>() / 100.0 } else { a });
            h.mapv_inplace(|a| if a == 0.0 { avg * rng.gen::<f64>() / 100.0 } else { a });
        }
    }

    (w, h)
}

fn nndsvd(x: &ArrayView2<f64>, k: usize) -> (Array2<f64>, Array2<f64>) {
    let (m, n) = x.dim();
    let mut w = Array2::zeros((m, k));
    let mut h = Array2::zeros((k, n));

    for (j, triplet) in truncated_svd(x, k).into_iter().enumerate() {
        if triplet.value <= EPS {
            continue;
        }

        if j == 0 {
            // the leading singular vectors of a non-negative matrix can be taken non-negative
            let scale = triplet.value.sqrt();
            w.slice_mut(s![.., 0]).assign(&(triplet.left.mapv(f64::abs) * scale));
            h.slice_mut(s![0, ..]).assign(&(triplet.right.mapv(f64::abs) * scale));
            continue;
        }

        let (xp, xn) = (positive_part(&triplet.left.view()), negative_part(&triplet.left.view()));
        let (yp, yn) = (positive_part(&triplet.right.view()), negative_part(&triplet.right.view()));
        let (xp_norm, yp_norm) = (l2_norm(&xp.view()), l2_norm(&yp.view()));
        let (xn_norm, yn_norm) = (l2_norm(&xn.view()), l2_norm(&yn.view()));

        let m_p = xp_norm * yp_norm;
        let m_n = xn_norm * yn_norm;

        // keep whichever sign pattern carries more mass
        let (u, v, sigma) = if m_p > m_n {
            (xp / xp_norm, yp / yp_norm, m_p)
        } else {
            (xn / xn_norm, yn / yn_norm, m_n)
        };
        if sigma <= EPS {
            continue;
        }

        let lbd = (triplet.value * sigma).sqrt();
        w.slice_mut(s![.., j]).assign(&(u * lbd));
        h.slice_mut(s![j, ..]).assign(&(v * lbd));
    }

    w.mapv_inplace(|a| if a < EPS { 0.0 } else { a });
    h.mapv_inplace(|a| if a < EPS { 0.0 } else { a });
    (w, h)
}
