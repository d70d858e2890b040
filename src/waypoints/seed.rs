use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Reference binned matrix the factorization is fitted on.
///
/// Rows are the archetypes "all values near 0" (twice) and "all values near 1".
/// Duplicating the near-0 row makes it the dominant direction of the matrix, which
/// pins component 0 to near-0 and component 1 to near-1.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedBasis {
    values: Array2<f64>,
}

impl SeedBasis {
    pub fn new(n_bins: usize) -> Self {
        let near0 = Self::near0(n_bins);
        let near1 = Self::near1(n_bins);
        let mut values = Array2::zeros((3, n_bins));
        values.row_mut(0).assign(&near0);
        values.row_mut(1).assign(&near0);
        values.row_mut(2).assign(&near1);
        Self { values }
    }

    /// All mass in the lowest bin
    pub fn near0(n_bins: usize) -> Array1<f64> {
        let mut binned = Array1::zeros(n_bins);
        if n_bins > 0 {
            binned[0] = 1.0;
        }
        binned
    }

    /// All mass in the highest bin
    pub fn near1(n_bins: usize) -> Array1<f64> {
        let mut binned = Self::near0(n_bins);
        binned.invert_axis(Axis(0));
        binned
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn n_bins(&self) -> usize {
        self.values.ncols()
    }
}

impl Default for SeedBasis {
    fn default() -> Self {
        Self::new(10)
    }
}
