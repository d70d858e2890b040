//! # Binning of fraction-valued columns
//!
//! Turns a (samples, features) matrix into a (bins, features) matrix whose columns
//! are probability mass functions over fixed-width bins.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::error::{Result, WaypointError};

/// Makes a list of strings of the bin ranges, e.g. `(0, 0.5, 1)` -> `["0-0.5", "0.5-1"]`.
pub fn bin_range_strings(edges: &[f64]) -> Vec<String> {
    edges
        .windows(2)
        .map(|pair| format!("{}-{}", pair[0], pair[1]))
        .collect()
}

/// Bin edges must hold at least one bin and be strictly ascending.
pub fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(WaypointError::EmptyBinEdges);
    }
    for (index, pair) in edges.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(WaypointError::UnsortedBinEdges {
                index: index + 1,
                value: pair[1],
            });
        }
    }
    Ok(())
}

/// Index of the bin holding `value`, or `None` if it is missing or out of range.
///
/// Bins are half-open `[a, b)` except the last one, which also holds its right edge.
fn bin_index(value: f64, edges: &[f64]) -> Option<usize> {
    let first = edges[0];
    let last = edges[edges.len() - 1];
    if value.is_nan() || value < first || value > last {
        return None;
    }
    if value == last {
        return Some(edges.len() - 2);
    }
    Some(edges.partition_point(|&e| e <= value) - 1)
}

fn count_bins(values: &ArrayView1<f64>, edges: &[f64]) -> Array1<f64> {
    let mut counts = Array1::zeros(edges.len() - 1);
    for &v in values.iter() {
        if let Some(i) = bin_index(v, edges) {
            counts[i] += 1.0;
        }
    }
    counts
}

/// Raw counts of one column over `edges`. Missing values are not counted.
pub fn histogram(values: &ArrayView1<f64>, edges: &[f64]) -> Result<Array1<f64>> {
    validate_edges(edges)?;
    Ok(count_bins(values, edges))
}

/// Makes a histogram of each column with the provided bin edges.
///
/// `data` is (samples, features); the result is (n_bins, features) where each
/// column is divided by its sum. A column with no counted values divides 0 by 0 and
/// comes out as NaN; callers are expected to drop all-missing columns beforehand.
/// The range of the values is not checked here.
pub fn binify(data: &ArrayView2<f64>, edges: &[f64]) -> Result<Array2<f64>> {
    validate_edges(edges)?;

    let n_bins = edges.len() - 1;
    let mut binned = Array2::zeros((n_bins, data.ncols()));
    Zip::from(binned.axis_iter_mut(Axis(1)))
        .and(data.axis_iter(Axis(1)))
        .for_each(|mut out, column| {
            let counts = count_bins(&column, edges);
            let total = counts.sum();
            out.assign(&(counts / total));
        });

    Ok(binned)
}
