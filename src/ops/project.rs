use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Column-wise maximum of a (rows, components) projection.
///
/// NaN rows are ignored so a degenerate feature never becomes the reference.
pub fn column_max(x: &ArrayView2<f64>) -> Array1<f64> {
    x.map_axis(Axis(0), |col| {
        col.iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Divides every column by its reference maximum.
///
/// The projection is non-negative, so no minimum needs subtracting: after this the
/// reference rows have a maximum of exactly 1 per axis.
pub fn rescale_to_reference(x: &ArrayView2<f64>, reference_max: &ArrayView1<f64>) -> Array2<f64> {
    let scale = reference_max.view().insert_axis(Axis(0));
    x / &scale
}
