//! # Tabular inputs and the binned representation
//!
//! `FeatureMatrix` is what callers hand in: samples as rows, features as columns,
//! values in [0, 1] and NaN for missing. `BinnedMatrix` is the discretized form that
//! the factorization consumes.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Result, WaypointError};

/// A (samples, features) matrix of fractions with feature ids.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    values: Array2<f64>,
    feature_ids: Vec<String>,
    sample_ids: Option<Vec<String>>,
}

impl FeatureMatrix {
    pub fn new<S: Into<String>>(values: Array2<f64>, feature_ids: Vec<S>) -> Result<Self> {
        let feature_ids: Vec<String> = feature_ids.into_iter().map(Into::into).collect();
        if feature_ids.len() != values.ncols() {
            return Err(WaypointError::ShapeMismatch {
                what: "feature ids",
                expected: values.ncols(),
                actual: feature_ids.len(),
            });
        }
        Ok(Self {
            values,
            feature_ids,
            sample_ids: None,
        })
    }

    /// Feature ids default to the column positions "0", "1", ...
    pub fn from_array(values: Array2<f64>) -> Self {
        let feature_ids = (0..values.ncols()).map(|j| j.to_string()).collect();
        Self {
            values,
            feature_ids,
            sample_ids: None,
        }
    }

    pub fn with_sample_ids<S: Into<String>>(mut self, sample_ids: Vec<S>) -> Result<Self> {
        let sample_ids: Vec<String> = sample_ids.into_iter().map(Into::into).collect();
        if sample_ids.len() != self.values.nrows() {
            return Err(WaypointError::ShapeMismatch {
                what: "sample ids",
                expected: self.values.nrows(),
                actual: sample_ids.len(),
            });
        }
        self.sample_ids = Some(sample_ids);
        Ok(self)
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    pub fn sample_ids(&self) -> Option<&[String]> {
        self.sample_ids.as_deref()
    }

    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }

    /// A new matrix holding only the given sample rows, in the given order.
    pub fn select_samples(&self, rows: &[usize]) -> Self {
        Self {
            values: self.values.select(Axis(0), rows),
            feature_ids: self.feature_ids.clone(),
            sample_ids: self
                .sample_ids
                .as_ref()
                .map(|ids| rows.iter().map(|&i| ids[i].clone()).collect()),
        }
    }

    /// A new matrix without the columns whose values are all missing.
    pub fn drop_empty_columns(&self) -> Self {
        let keep: Vec<usize> = self
            .values
            .axis_iter(Axis(1))
            .enumerate()
            .filter(|(_, col)| col.iter().any(|v| !v.is_nan()))
            .map(|(j, _)| j)
            .collect();
        Self {
            values: self.values.select(Axis(1), &keep),
            feature_ids: keep.iter().map(|&j| self.feature_ids[j].clone()).collect(),
            sample_ids: self.sample_ids.clone(),
        }
    }
}

/// Samples of a single named feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub name: String,
    pub values: Array1<f64>,
}

impl FeatureVector {
    pub fn new<S: Into<String>>(name: S, values: Array1<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn into_matrix(self) -> FeatureMatrix {
        FeatureMatrix {
            values: self.values.insert_axis(Axis(1)),
            feature_ids: vec![self.name],
            sample_ids: None,
        }
    }
}

/// Per-feature histograms, stored as (n_bins, features).
///
/// Each column is a probability mass function over the bins, or all NaN when the
/// source column had nothing to count.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedMatrix {
    values: Array2<f64>,
    bin_labels: Vec<String>,
    feature_ids: Vec<String>,
}

impl BinnedMatrix {
    pub fn new(values: Array2<f64>, bin_labels: Vec<String>, feature_ids: Vec<String>) -> Result<Self> {
        if bin_labels.len() != values.nrows() {
            return Err(WaypointError::ShapeMismatch {
                what: "bin labels",
                expected: values.nrows(),
                actual: bin_labels.len(),
            });
        }
        if feature_ids.len() != values.ncols() {
            return Err(WaypointError::ShapeMismatch {
                what: "feature ids",
                expected: values.ncols(),
                actual: feature_ids.len(),
            });
        }
        Ok(Self {
            values,
            bin_labels,
            feature_ids,
        })
    }

    /// (n_bins, features)
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// (features, n_bins), one histogram per row
    pub fn feature_rows(&self) -> ArrayView2<'_, f64> {
        self.values.t()
    }

    pub fn bin_labels(&self) -> &[String] {
        &self.bin_labels
    }

    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    pub fn n_bins(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    pub fn histogram(&self, feature_id: &str) -> Option<ArrayView1<'_, f64>> {
        self.feature_ids
            .iter()
            .position(|id| id == feature_id)
            .map(|j| self.values.column(j))
    }
}
