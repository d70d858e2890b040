// src/nmf/svd.rs

//! Leading singular triplets used to seed the factorization.

use nalgebra::{DMatrix, SVD};
use ndarray::{Array1, ArrayView2};

use crate::ops::EPS;

#[derive(Debug, Clone, PartialEq)]
pub struct SingularTriplet {
    pub value: f64,
    pub left: Array1<f64>,
    pub right: Array1<f64>,
}

impl SingularTriplet {
    fn zeros(m: usize, n: usize) -> Self {
        Self {
            value: 0.0,
            left: Array1::zeros(m),
            right: Array1::zeros(n),
        }
    }
}

/// Sign of the largest-magnitude entry, so each pair of singular vectors has one
/// fixed orientation.
fn canonical_sign(v: &Array1<f64>) -> f64 {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |acc, a| if a.abs() > acc.abs() { a } else { acc });
    if pivot < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Leading `k` singular triplets of `x`, largest first.
///
/// Rank-deficient inputs yield zero triplets for the missing directions.
pub fn truncated_svd(x: &ArrayView2<f64>, k: usize) -> Vec<SingularTriplet> {
    let (m, n) = x.dim();
    let svd = SVD::new(DMatrix::from_fn(m, n, |i, j| x[[i, j]]), true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return (0..k).map(|_| SingularTriplet::zeros(m, n)).collect(),
    };

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

    (0..k)
        .map(|r| match order.get(r) {
            Some(&idx) if svd.singular_values[idx] > EPS => {
                let left: Array1<f64> = u.column(idx).iter().copied().collect();
                let right: Array1<f64> = v_t.row(idx).iter().copied().collect();
                let sign = canonical_sign(&right);
                SingularTriplet {
                    value: svd.singular_values[idx],
                    left: left * sign,
                    right: right * sign,
                }
            }
            _ => SingularTriplet::zeros(m, n),
        })
        .collect()
}
