use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Computes the squared norm of each row in a batched manner.
/// x: A 2D array of shape (batch_size, dim).
/// Returns a 1D array of shape (batch_size,) where each element is the squared L2 norm of a row.
pub fn norm_sq_batched(x: &ArrayView2<f64>) -> Array1<f64> {
    x.map_axis(Axis(1), |row| row.mapv(|a| a.powi(2)).sum())
}

/// Euclidean norm of each row, e.g. the magnitude of (Δx, Δy) deltas.
pub fn norm_batched(x: &ArrayView2<f64>) -> Array1<f64> {
    norm_sq_batched(x).mapv(f64::sqrt)
}

pub fn l2_norm(v: &ArrayView1<f64>) -> f64 {
    v.dot(v).sqrt()
}
