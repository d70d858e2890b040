use ndarray::{Array1, ArrayView1};

pub const EPS: f64 = 1e-12;

/// Elementwise positive part, `max(x, 0)`.
pub fn positive_part(x: &ArrayView1<f64>) -> Array1<f64> {
    x.mapv(|a| if a > 0.0 { a } else { 0.0 })
}

/// Elementwise negative part, `max(-x, 0)`.
pub fn negative_part(x: &ArrayView1<f64>) -> Array1<f64> {
    x.mapv(|a| if a < 0.0 { -a } else { 0.0 })
}

/// Evenly spaced edges covering [0, 1] with `n_bins` bins.
///
/// Edges are computed as `i / n_bins` so interior edges are the closest doubles
/// to their decimal value (0.3 rather than 0.30000000000000004).
pub fn unit_edges(n_bins: usize) -> Vec<f64> {
    (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect()
}
